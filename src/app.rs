//! Application wiring and submit orchestration.

use crate::ai::{OpenAiReadingClient, ReadingService};
use crate::models::{Config, ReadingRequest};
use crate::reading::{ReadingEvent, ReadingSession, GENERATION_FAILED};
use crate::{server, Error, Result};
use tracing::info;

/// Owns the configured AI service and drives one reading session per
/// submitted form.
pub struct App {
    reader: Box<dyn ReadingService>,
    host: String,
    port: u16,
}

/// Injectable service bundle used to construct [`App`] in tests/harnesses.
pub struct AppServices {
    pub reader: Box<dyn ReadingService>,
}

impl App {
    /// Build an app from concrete service dependencies.
    ///
    /// This is primarily useful for integration tests and local harnesses
    /// that need to inject mocks.
    pub fn with_services(services: AppServices, host: String, port: u16) -> Self {
        Self {
            reader: services.reader,
            host,
            port,
        }
    }

    /// Construct an app from environment configuration (`Config::from_env`).
    pub fn new() -> Result<Self> {
        let config = Config::from_env()?;
        info!("Chat model: {}", config.chat_model);

        let reader = Box::new(OpenAiReadingClient::new_with_client(
            config.openai_api_key.clone(),
            config.chat_model.clone(),
            reqwest::Client::new(),
        ));

        Ok(Self::with_services(
            AppServices { reader },
            config.host,
            config.port,
        ))
    }

    /// Bind and serve, with CLI overrides taking precedence over the
    /// environment.
    pub async fn run(self, host: Option<String>, port: Option<u16>) -> Result<()> {
        let host = host.unwrap_or_else(|| self.host.clone());
        let port = port.unwrap_or(self.port);
        let bind_addr = format!("{}:{}", host, port);

        server::serve(self, &bind_addr).await
    }

    /// Drive one submitted form through the session reducer and the
    /// configured service.
    ///
    /// Validation failures return before any provider call; provider
    /// failures surface as the generic failure message with the cause
    /// already logged.
    pub async fn perform_reading(&self, request: ReadingRequest) -> Result<String> {
        let mut session = ReadingSession::new();
        session.apply(ReadingEvent::QuestionChanged(request.question))?;
        session.apply(ReadingEvent::CardCountChanged(request.card_count))?;
        for (index, name) in request.card_names.into_iter().enumerate() {
            session.apply(ReadingEvent::CardNameChanged { index, name })?;
        }

        let pending = session.begin_submit()?;
        info!(
            "Generating reading for {} card(s)",
            pending.cards.len()
        );

        let outcome = self
            .reader
            .generate_reading(&pending.question, &pending.cards)
            .await;
        session.complete(&pending, outcome);

        if let Some(reading) = session.reading() {
            return Ok(reading.to_string());
        }

        Err(Error::AiProvider(
            session.error().unwrap_or(GENERATION_FAILED).to_string(),
        ))
    }
}
