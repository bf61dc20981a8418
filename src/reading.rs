//! Reading session state and submit lifecycle.
//!
//! Holds the form a visitor fills in (question plus drawn card names),
//! applies edits as events, and sequences the loading phase around a
//! single generation attempt per submit. Pure state, no I/O, so every
//! transition is testable without the web layer.

use crate::{Error, Result};

pub const MIN_CARDS: usize = 1;
pub const MAX_CARDS: usize = 10;

/// The conventional three-card spread.
pub const DEFAULT_CARD_COUNT: usize = 3;

/// Shown when the provider answers with blank text.
pub const FALLBACK_READING: &str =
    "The cards are quiet today. Shuffle, take a breath, and ask again.";

/// Shown for any transport or provider failure.
pub const GENERATION_FAILED: &str = "The reading could not be completed. Please try again.";

/// Where a session stands with respect to its latest submit.
///
/// Reading text and failure message are mutually exclusive by
/// construction; a fresh session carries neither.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Complete(String),
    Failed(String),
}

/// One edit to the form, applied through [`ReadingSession::apply`].
#[derive(Debug, Clone)]
pub enum ReadingEvent {
    QuestionChanged(String),
    CardCountChanged(usize),
    CardNameChanged { index: usize, name: String },
}

/// Handle for one in-flight generation attempt.
///
/// Carries the validated question and the non-empty card names in draw
/// order, plus the attempt generation used to discard stale completions.
#[derive(Debug, Clone)]
pub struct PendingReading {
    pub question: String,
    pub cards: Vec<String>,
    generation: u64,
}

#[derive(Debug)]
pub struct ReadingSession {
    question: String,
    card_names: Vec<String>,
    phase: Phase,
    generation: u64,
}

impl Default for ReadingSession {
    fn default() -> Self {
        Self {
            question: String::new(),
            card_names: vec![String::new(); DEFAULT_CARD_COUNT],
            phase: Phase::Idle,
            generation: 0,
        }
    }
}

impl ReadingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn card_names(&self) -> &[String] {
        &self.card_names
    }

    pub fn card_count(&self) -> usize {
        self.card_names.len()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn reading(&self) -> Option<&str> {
        match &self.phase {
            Phase::Complete(text) => Some(text),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Apply one form edit. Invalid edits leave the state untouched.
    pub fn apply(&mut self, event: ReadingEvent) -> Result<()> {
        match event {
            ReadingEvent::QuestionChanged(question) => {
                self.question = question;
                Ok(())
            }
            ReadingEvent::CardCountChanged(count) => self.set_card_count(count),
            ReadingEvent::CardNameChanged { index, name } => self.set_card_name(index, name),
        }
    }

    /// Resize the draw to `count` cards, keeping existing names at their
    /// positions and filling new slots with empty text.
    fn set_card_count(&mut self, count: usize) -> Result<()> {
        if !(MIN_CARDS..=MAX_CARDS).contains(&count) {
            return Err(Error::Validation(format!(
                "Card count must be between {} and {}, got {}",
                MIN_CARDS, MAX_CARDS, count
            )));
        }

        self.card_names.resize(count, String::new());
        Ok(())
    }

    fn set_card_name(&mut self, index: usize, name: String) -> Result<()> {
        match self.card_names.get_mut(index) {
            Some(slot) => {
                *slot = name;
                Ok(())
            }
            None => Err(Error::Validation(format!(
                "No card at position {} in a {}-card draw",
                index + 1,
                self.card_names.len()
            ))),
        }
    }

    /// Validate the form and enter the loading phase.
    ///
    /// A submit issued while another attempt is outstanding supersedes it:
    /// the returned handle carries a fresh generation, and completions
    /// from older attempts are discarded by [`ReadingSession::complete`].
    pub fn begin_submit(&mut self) -> Result<PendingReading> {
        if self.question.trim().is_empty() {
            return Err(self.fail_validation("Please enter a question for the cards."));
        }

        let cards: Vec<String> = self
            .card_names
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        if cards.is_empty() {
            return Err(self.fail_validation("Please name at least one card you drew."));
        }

        self.generation += 1;
        self.phase = Phase::Loading;

        Ok(PendingReading {
            question: self.question.trim().to_string(),
            cards,
            generation: self.generation,
        })
    }

    /// Record the outcome of an attempt.
    ///
    /// Blank text from the provider becomes [`FALLBACK_READING`]; any
    /// error becomes the generic [`GENERATION_FAILED`] message with the
    /// underlying cause logged. A handle whose generation is stale is
    /// ignored so a slow response can never overwrite a newer attempt.
    pub fn complete(&mut self, pending: &PendingReading, outcome: Result<String>) {
        if pending.generation != self.generation {
            tracing::debug!("Discarding completion from superseded attempt");
            return;
        }

        self.phase = match outcome {
            Ok(text) if text.trim().is_empty() => Phase::Complete(FALLBACK_READING.to_string()),
            Ok(text) => Phase::Complete(text),
            Err(e) => {
                tracing::error!("Reading generation failed: {}", e);
                Phase::Failed(GENERATION_FAILED.to_string())
            }
        };
    }

    fn fail_validation(&mut self, message: &str) -> Error {
        self.phase = Phase::Failed(message.to_string());
        Error::Validation(message.to_string())
    }
}
