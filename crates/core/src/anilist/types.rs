//! Types for AniList catalog data.

use serde::{Deserialize, Deserializer, Serialize};

/// Title variants of a media entry. Any of them may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MediaTitle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub romaji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<String>,
}

/// Cover art at up to three resolutions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CoverImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_large: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
}

/// A link to an external site (streaming service, official page).
/// AniList sends `null` for links it has disabled.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExternalLink {
    #[serde(default)]
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

/// An AniList media entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    /// AniList ID.
    pub id: u64,
    /// MyAnimeList ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_mal: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<MediaTitle>,
    /// Synopsis; may contain HTML even when plain text was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<CoverImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_year: Option<i32>,
    /// Weighted average score (0-100).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    /// Total episode count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episodes: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub external_links: Vec<ExternalLink>,
}

impl CatalogRecord {
    /// A record carrying nothing but its id.
    pub fn bare(id: u64) -> Self {
        Self {
            id,
            id_mal: None,
            title: None,
            description: None,
            cover_image: None,
            banner_image: None,
            season_year: None,
            average_score: None,
            site_url: None,
            episodes: None,
            genres: vec![],
            external_links: vec![],
        }
    }
}

/// AniList returns `null` for empty lists on some entries.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
