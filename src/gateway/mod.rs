//! Gateway to the language-model service.
//!
//! The rest of the crate only needs "question in, raw answer text out", so the
//! service sits behind the [`Gateway`] trait. [`AnthropicGateway`] is the real
//! implementation; tests plug in their own.

mod client;
mod prompt;

pub use client::AnthropicGateway;
pub use prompt::build_prompt;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from fetching an answer.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("No API key configured (set ANTHROPIC_API_KEY)")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unauthorized: API key rejected")]
    Unauthorized,

    #[error("Rate limited by the model service")]
    RateLimited,

    #[error("Model service error ({status}): {body}")]
    Service { status: u16, body: String },
}

impl GatewayError {
    /// Whether asking again later might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited => true,
            Self::Service { status, .. } => *status >= 500,
            Self::MissingApiKey | Self::Unauthorized => false,
        }
    }
}

/// Source of raw answer text for a question.
///
/// An `Ok` with an empty string is a valid answer; it parses to no tasks.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn fetch(&self, question: &str) -> Result<String, GatewayError>;
}
