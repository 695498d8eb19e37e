//! AniList catalog lookup.
//!
//! Enriches a trace.moe match with titles, artwork, synopsis and score.
//! Lookup failures never reach the user: [`lookup_media`] logs them and
//! the merge continues with match data only.

mod client;
mod types;

pub use client::{AniListClient, MEDIA_QUERY};
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

/// Errors that can occur when querying AniList.
#[derive(Debug, Error)]
pub enum LookupError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded, please wait before retrying")]
    RateLimitExceeded,

    /// API returned an error status.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// GraphQL reported errors and returned no data.
    #[error("GraphQL error: {0}")]
    GraphQl(String),

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Trait for catalog clients that resolve an id to a media entry.
#[async_trait]
pub trait MediaLookup: Send + Sync {
    /// Fetch a media entry by AniList id.
    async fn fetch_media(&self, id: u64) -> Result<Option<CatalogRecord>, LookupError>;
}

/// Fetch a media entry, treating any failure as "no catalog data".
pub async fn lookup_media(lookup: &dyn MediaLookup, id: u64) -> Option<CatalogRecord> {
    match lookup.fetch_media(id).await {
        Ok(media) => media,
        Err(e) => {
            warn!("AniList lookup for id {} failed: {}", id, e);
            None
        }
    }
}
