//! AI service integration for reading generation
//!
//! Provides the interface to OpenAI's chat completions API used to turn
//! a question and a card draw into an interpretive reading.

pub mod mock;
pub mod openai;

pub use mock::MockReadingClient;
pub use openai::OpenAiReadingClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ReadingService: Send + Sync {
    async fn generate_reading(&self, question: &str, cards: &[String]) -> Result<String>;
}
