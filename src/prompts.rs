pub const READING_SYSTEM: &str = include_str!("../data/prompts/reading_system.txt");
pub const READING_USER: &str = include_str!("../data/prompts/reading_user.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Build the user prompt for one reading from the question and the
/// non-empty card names in draw order.
pub fn reading_prompt(question: &str, cards: &[String]) -> String {
    let cards_str = cards.join(", ");
    render(
        READING_USER,
        &[("question", question), ("cards", &cards_str)],
    )
}
