use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub trace: TraceConfig,
    #[serde(default)]
    pub anilist: AniListConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// trace.moe matching API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TraceConfig {
    /// Search endpoint (default: https://api.trace.moe/search)
    #[serde(default = "default_trace_url")]
    pub base_url: String,
    /// Optional access token, sent as the `x-trace-key` header
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            base_url: default_trace_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_trace_url() -> String {
    "https://api.trace.moe/search".to_string()
}

/// AniList GraphQL catalog configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AniListConfig {
    /// GraphQL endpoint (default: https://graphql.anilist.co)
    #[serde(default = "default_anilist_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for AniListConfig {
    fn default() -> Self {
        Self {
            base_url: default_anilist_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_anilist_url() -> String {
    "https://graphql.anilist.co".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Where the last result is kept between the search and results views
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Session directory for the file backend
    #[serde(default = "default_session_dir")]
    pub session_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            session_dir: default_session_dir(),
        }
    }
}

fn default_session_dir() -> PathBuf {
    std::env::temp_dir().join("anisauce")
}

/// Available result store backends
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    #[default]
    File,
    Memory,
    None,
}

/// Search attempt configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Deadline for the trace.moe match, in seconds (default: 60)
    #[serde(default = "default_search_timeout")]
    pub search_timeout_secs: u64,
    /// Deadline for the AniList lookup, in seconds (default: 15).
    /// Expiry drops the catalog data, not the result.
    #[serde(default = "default_lookup_timeout")]
    pub lookup_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_timeout_secs: default_search_timeout(),
            lookup_timeout_secs: default_lookup_timeout(),
        }
    }
}

fn default_search_timeout() -> u64 {
    60
}

fn default_lookup_timeout() -> u64 {
    15
}

/// Sanitized config for display (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub trace: SanitizedTraceConfig,
    pub anilist: AniListConfig,
    pub store: StoreConfig,
    pub search: SearchConfig,
}

/// Sanitized trace.moe config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTraceConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            trace: SanitizedTraceConfig {
                base_url: config.trace.base_url.clone(),
                api_key_configured: config
                    .trace
                    .api_key
                    .as_ref()
                    .is_some_and(|k| !k.is_empty()),
                timeout_secs: config.trace.timeout_secs,
            },
            anilist: config.anilist.clone(),
            store: config.store.clone(),
            search: config.search.clone(),
        }
    }
}
