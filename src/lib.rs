//! Tarot reading web app
//!
//! Serves a single-page form where a visitor enters a question and the
//! cards they drew, then turns the draw into an interpretive reading
//! through OpenAI's chat completions API.

pub mod ai;
pub mod app;
pub mod error;
pub mod models;
pub mod prompts;
pub mod reading;
pub mod server;

pub use error::{Error, Result};
