use super::client::OpenAiHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage};
use crate::ai::ReadingService;
use crate::{prompts, Error, Result};
use async_trait::async_trait;

// Fixed sampling parameters for every reading.
const MAX_COMPLETION_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;

pub struct OpenAiReadingClient {
    http: OpenAiHttpClient,
    model: String,
}

impl OpenAiReadingClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: OpenAiHttpClient::new_with_client(api_key, client),
            model,
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl ReadingService for OpenAiReadingClient {
    async fn generate_reading(&self, question: &str, cards: &[String]) -> Result<String> {
        let system_message = ChatMessage {
            role: "system".to_string(),
            content: Some(prompts::READING_SYSTEM.to_string()),
        };

        let user_message = ChatMessage {
            role: "user".to_string(),
            content: Some(prompts::reading_prompt(question, cards)),
        };

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![system_message, user_message],
            max_completion_tokens: MAX_COMPLETION_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self.http.chat_completion(request).await?;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| Error::AiProvider("No response from OpenAI chat API".to_string()))
    }
}
