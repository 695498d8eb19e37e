//! AniList GraphQL client.
//!
//! AniList allows unauthenticated queries; rate limits are around 90
//! requests per minute.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::CatalogRecord;
use super::{LookupError, MediaLookup};
use crate::config::AniListConfig;

/// Query for a single anime by AniList id.
pub const MEDIA_QUERY: &str = r#"
query ($id: Int) {
  Media (id: $id, type: ANIME) {
    id
    idMal
    title {
      english
      native
      romaji
    }
    description(asHtml: false)
    seasonYear
    coverImage {
      extraLarge
      large
      medium
    }
    bannerImage
    genres
    externalLinks {
      id
      url
      site
    }
    averageScore
    siteUrl
    episodes
  }
}
"#;

/// AniList API client.
pub struct AniListClient {
    client: Client,
    base_url: String,
}

impl AniListClient {
    /// Create a new AniList client.
    pub fn new(config: AniListConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
        })
    }

    /// Fetch a media entry by id. `Ok(None)` when AniList has no such entry.
    pub async fn fetch_media(&self, id: u64) -> Result<Option<CatalogRecord>, LookupError> {
        debug!("AniList media lookup: id={}", id);

        let body = GraphQlRequest {
            query: MEDIA_QUERY,
            variables: MediaVariables { id },
        };

        let response = self
            .client
            .post(&self.base_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status == 404 {
            debug!("AniList has no media with id {}", id);
            return Ok(None);
        }
        if status == 429 {
            return Err(LookupError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: GraphQlResponse = response.json().await.map_err(|e| {
            LookupError::ParseError(format!("Failed to parse media response: {}", e))
        })?;

        envelope.into_media()
    }
}

#[async_trait]
impl MediaLookup for AniListClient {
    async fn fetch_media(&self, id: u64) -> Result<Option<CatalogRecord>, LookupError> {
        AniListClient::fetch_media(self, id).await
    }
}

// ============================================================================
// GraphQL envelope (private)
// ============================================================================

#[derive(Debug, Serialize)]
struct GraphQlRequest {
    query: &'static str,
    variables: MediaVariables,
}

#[derive(Debug, Serialize)]
struct MediaVariables {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    #[serde(default)]
    data: Option<MediaData>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct MediaData {
    #[serde(rename = "Media", default)]
    media: Option<CatalogRecord>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl GraphQlResponse {
    fn into_media(self) -> Result<Option<CatalogRecord>, LookupError> {
        let media = self.data.and_then(|d| d.media);
        if media.is_none() && !self.errors.is_empty() {
            let messages: Vec<String> = self.errors.into_iter().map(|e| e.message).collect();
            return Err(LookupError::GraphQl(messages.join("; ")));
        }
        Ok(media)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = GraphQlRequest {
            query: MEDIA_QUERY,
            variables: MediaVariables { id: 42 },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["variables"]["id"], 42);
        assert!(value["query"].as_str().unwrap().contains("Media (id: $id"));
    }

    #[test]
    fn test_envelope_with_media() {
        let envelope: GraphQlResponse =
            serde_json::from_str(r#"{"data": {"Media": {"id": 5, "episodes": 24}}}"#).unwrap();
        let media = envelope.into_media().unwrap().unwrap();
        assert_eq!(media.id, 5);
        assert_eq!(media.episodes, Some(24));
    }

    #[test]
    fn test_envelope_null_media_is_none() {
        let envelope: GraphQlResponse =
            serde_json::from_str(r#"{"data": {"Media": null}}"#).unwrap();
        assert!(envelope.into_media().unwrap().is_none());
    }

    #[test]
    fn test_envelope_errors_without_data() {
        let envelope: GraphQlResponse = serde_json::from_str(
            r#"{"data": null, "errors": [{"message": "Invalid token"}, {"message": "Try later"}]}"#,
        )
        .unwrap();
        let err = envelope.into_media().unwrap_err();
        assert!(matches!(err, LookupError::GraphQl(ref m) if m == "Invalid token; Try later"));
    }
}
