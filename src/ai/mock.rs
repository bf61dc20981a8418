use super::ReadingService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// One recorded call to the mock service.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub question: String,
    pub cards: Vec<String>,
}

/// In-memory [`ReadingService`] for tests.
///
/// Queued responses are cycled; with no queue, a deterministic reading is
/// built from the input. Every call is recorded for assertions.
#[derive(Clone)]
pub struct MockReadingClient {
    responses: Arc<Mutex<Vec<std::result::Result<String, String>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockReadingClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_reading_response(self, response: String) -> Self {
        self.responses.lock().unwrap().push(Ok(response));
        self
    }

    pub fn with_error_response(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockReadingClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadingService for MockReadingClient {
    async fn generate_reading(&self, question: &str, cards: &[String]) -> Result<String> {
        let count = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RecordedCall {
                question: question.to_string(),
                cards: cards.to_vec(),
            });
            calls.len()
        };

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response
            Ok(format!(
                "The cards {} speak to your question: {}",
                cards.join(", "),
                question
            ))
        } else {
            let index = (count - 1) % responses.len();
            match &responses[index] {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(Error::AiProvider(message.clone())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_response_mentions_question_and_cards() {
        let client = MockReadingClient::new();

        let reading = client
            .generate_reading(
                "What awaits me?",
                &["The Fool".to_string(), "The Tower".to_string()],
            )
            .await
            .unwrap();

        assert!(reading.contains("What awaits me?"));
        assert!(reading.contains("The Fool, The Tower"));
    }

    #[tokio::test]
    async fn test_custom_responses_cycle() {
        let client = MockReadingClient::new()
            .with_reading_response("First reading".to_string())
            .with_reading_response("Second reading".to_string());

        let cards = vec!["The Sun".to_string()];
        assert_eq!(
            client.generate_reading("q", &cards).await.unwrap(),
            "First reading"
        );
        assert_eq!(
            client.generate_reading("q", &cards).await.unwrap(),
            "Second reading"
        );

        // Should cycle back
        assert_eq!(
            client.generate_reading("q", &cards).await.unwrap(),
            "First reading"
        );
    }

    #[tokio::test]
    async fn test_error_response_maps_to_ai_provider() {
        let client = MockReadingClient::new().with_error_response("provider down".to_string());

        let err = client
            .generate_reading("q", &["The Sun".to_string()])
            .await
            .unwrap_err();

        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[tokio::test]
    async fn test_calls_are_recorded_in_order() {
        let client = MockReadingClient::new();
        assert_eq!(client.get_call_count(), 0);

        client
            .generate_reading("first question", &["The Fool".to_string()])
            .await
            .unwrap();
        client
            .generate_reading("second question", &["The Star".to_string()])
            .await
            .unwrap();

        let calls = client.recorded_calls();
        assert_eq!(client.get_call_count(), 2);
        assert_eq!(calls[0].question, "first question");
        assert_eq!(calls[1].cards, ["The Star"]);
    }
}
