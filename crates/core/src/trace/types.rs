//! Types for trace.moe search responses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::anilist::{CoverImage, MediaTitle};

/// Partial AniList entry embedded in a match when `anilistInfo` is requested.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddedMedia {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_mal: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<MediaTitle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<CoverImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episodes: Option<u32>,
}

/// How a match points at its AniList entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CatalogRef {
    /// Bare AniList id.
    Id(u64),
    /// Embedded partial entry.
    Embedded(EmbeddedMedia),
}

impl CatalogRef {
    /// The AniList id, from either form.
    pub fn id(&self) -> Option<u64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Embedded(media) => media.id,
        }
    }

    /// The embedded entry, if this reference carries one.
    pub fn embedded(&self) -> Option<&EmbeddedMedia> {
        match self {
            Self::Id(_) => None,
            Self::Embedded(media) => Some(media),
        }
    }
}

/// A single trace.moe match.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub anilist: Option<CatalogRef>,
    /// File name of the source video.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, deserialize_with = "lenient_episode")]
    pub episode: Option<u32>,
    /// Start of the matching scene, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<f64>,
    /// End of the matching scene, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<f64>,
    /// Confidence in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    /// Still frame of the matched scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Short clip of the matched scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

impl MatchRecord {
    /// Resolve the AniList id from either reference form.
    pub fn catalog_id(&self) -> Option<u64> {
        self.anilist.as_ref().and_then(CatalogRef::id)
    }

    pub fn embedded(&self) -> Option<&EmbeddedMedia> {
        self.anilist.as_ref().and_then(CatalogRef::embedded)
    }
}

/// Raw search response.
#[derive(Debug, Deserialize)]
pub(crate) struct TraceResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub result: Option<Vec<MatchRecord>>,
}

/// Values of an unexpected shape become `None` instead of failing the match.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// trace.moe reports episodes as numbers, numeric strings, or ranges.
fn lenient_episode<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        Value::Array(values) => values.first().and_then(|v| v.as_u64()).and_then(|n| u32::try_from(n).ok()),
        _ => None,
    })
}
