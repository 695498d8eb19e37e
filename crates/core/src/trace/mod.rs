//! Screenshot matching via trace.moe.

mod client;
mod types;

pub use client::TraceMoeClient;
pub use types::{CatalogRef, EmbeddedMedia, MatchRecord};

use async_trait::async_trait;
use thiserror::Error;

use crate::input::SearchPayload;

/// Errors that can occur when searching for a match.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Payload carried neither a file nor a URL.
    #[error("Provide an image file or URL first.")]
    MissingInput,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Search quota or concurrency limit reached.
    #[error("Search quota or concurrency limit reached")]
    RateLimited,

    /// API returned an error status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The result list was empty or missing.
    #[error("No matches found. Try another frame.")]
    NotFound,

    /// The attempt exceeded its deadline.
    #[error("The matching service took too long to respond.")]
    Timeout,
}

impl MatchError {
    /// Message shown to the user, or `None` when the failure says nothing
    /// useful to them.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Self::MissingInput => Some("Provide an image file or URL first."),
            Self::NotFound => Some("No matches found. Try another frame."),
            Self::Timeout => Some("The matching service took too long to respond."),
            Self::HttpError(e) if e.is_timeout() => {
                Some("The matching service took too long to respond.")
            }
            Self::HttpError(_) | Self::RateLimited | Self::ApiError { .. } => {
                Some("Could not process this image.")
            }
            Self::ParseError(_) => None,
        }
    }
}

/// Trait for screenshot matching backends.
#[async_trait]
pub trait MatchSearcher: Send + Sync {
    /// Return the best match for the payload.
    async fn search(&self, payload: &SearchPayload) -> Result<MatchRecord, MatchError>;
}
