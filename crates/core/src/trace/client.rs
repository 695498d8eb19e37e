//! trace.moe search client.
//!
//! Anonymous use is allowed with a small monthly quota; an API key raises
//! the quota and concurrency limit.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use tracing::debug;

use super::types::{MatchRecord, TraceResponse};
use super::{MatchError, MatchSearcher};
use crate::config::TraceConfig;
use crate::input::SearchPayload;

/// Query flag asking trace.moe to embed AniList info in each match.
const ANILIST_INFO: (&str, &str) = ("anilistInfo", "true");

/// trace.moe API client.
pub struct TraceMoeClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl TraceMoeClient {
    /// Create a new trace.moe client.
    pub fn new(config: TraceConfig) -> Result<Self, MatchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
            api_key: config.api_key.filter(|k| !k.is_empty()),
        })
    }

    /// Search for the scene in `payload` and return the best match.
    ///
    /// A file is uploaded as multipart field `image`; otherwise the URL is
    /// passed as a query parameter.
    pub async fn search(&self, payload: &SearchPayload) -> Result<MatchRecord, MatchError> {
        let request = if let Some(file) = &payload.file {
            debug!(
                "trace.moe upload search: {} bytes, type '{}'",
                file.bytes.len(),
                file.mime
            );
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.name.clone().unwrap_or_else(|| "image".to_string()))
                .mime_str(&file.mime)?;
            self.client
                .post(&self.base_url)
                .query(&[ANILIST_INFO])
                .multipart(Form::new().part("image", part))
        } else if let Some(url) = &payload.url {
            debug!("trace.moe URL search: url='{}'", url);
            self.client
                .get(&self.base_url)
                .query(&[ANILIST_INFO, ("url", url.as_str())])
        } else {
            return Err(MatchError::MissingInput);
        };

        let response = self.with_headers(request).send().await?;

        let status = response.status();
        if status == 402 || status == 429 {
            return Err(MatchError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MatchError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let data: TraceResponse = response.json().await.map_err(|e| {
            MatchError::ParseError(format!("Failed to parse search response: {}", e))
        })?;

        if let Some(error) = data.error.as_deref().filter(|e| !e.is_empty()) {
            debug!("trace.moe reported: {}", error);
        }

        let count = data.result.as_ref().map_or(0, Vec::len);
        let best = data
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or(MatchError::NotFound)?;

        debug!(
            "trace.moe returned {} matches, best similarity {:?}",
            count, best.similarity
        );
        Ok(best)
    }

    fn with_headers(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(reqwest::header::ACCEPT, "application/json");
        match &self.api_key {
            Some(key) => request.header("x-trace-key", key),
            None => request,
        }
    }
}

#[async_trait]
impl MatchSearcher for TraceMoeClient {
    async fn search(&self, payload: &SearchPayload) -> Result<MatchRecord, MatchError> {
        TraceMoeClient::search(self, payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_payload_fails_without_request() {
        // Unroutable endpoint: the check must happen before any I/O.
        let client = TraceMoeClient::new(TraceConfig {
            base_url: "http://127.0.0.1:9/search".to_string(),
            api_key: None,
            timeout_secs: 1,
        })
        .unwrap();

        let err = client.search(&SearchPayload::default()).await.unwrap_err();
        assert!(matches!(err, MatchError::MissingInput));
    }

    #[test]
    fn test_blank_api_key_ignored() {
        let client = TraceMoeClient::new(TraceConfig {
            api_key: Some(String::new()),
            ..TraceConfig::default()
        })
        .unwrap();
        assert!(client.api_key.is_none());
    }
}
