//! Merges a trace.moe match and its AniList entry into one display record.
//!
//! Every field has a fixed list of sources in precedence order (catalog
//! first, then the entry embedded in the match, then match-only data).
//! The merge is pure: it never performs I/O.

mod fallback;
mod format;
mod text;

pub use fallback::{first_present, first_some};
pub use format::{build_video_url, format_similarity, format_timestamp};
pub use text::{sanitize_filename, strip_html, truncate};

use serde::{Deserialize, Serialize};

use crate::anilist::{CatalogRecord, CoverImage, MediaTitle};
use crate::input::PreviewRef;
use crate::trace::MatchRecord;

/// Title used when no source yields one.
pub const UNKNOWN_TITLE: &str = "Unknown title";

/// Synopsis used when AniList has none.
pub const DESCRIPTION_UNAVAILABLE: &str =
    "Synopsis unavailable on AniList right now. Try another frame or check again later.";

/// Maximum synopsis length, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 300;

/// Base of canonical AniList anime pages.
pub const ANILIST_SITE_BASE: &str = "https://anilist.co/anime";

/// The merged view model shown by the results view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisplayResult {
    pub anime_title: String,
    #[serde(default)]
    pub episode: Option<u32>,
    /// Start of the matched scene, in seconds.
    #[serde(default)]
    pub timestamp: Option<f64>,
    pub similarity: f64,
    pub description: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub banner_image: Option<String>,
    #[serde(default)]
    pub season_year: Option<i32>,
    #[serde(default)]
    pub average_score: Option<u32>,
    #[serde(default)]
    pub site_url: Option<String>,
    #[serde(default)]
    pub frame_image: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Build the display record for a match.
pub fn merge_result(
    record: &MatchRecord,
    media: Option<&CatalogRecord>,
    preview: Option<&PreviewRef>,
) -> DisplayResult {
    let embedded = record.embedded();
    let catalog_id = record.catalog_id();
    let preview = preview.map(PreviewRef::source);

    let anime_title = pick_title(
        media.and_then(|m| m.title.as_ref()),
        embedded.and_then(|e| e.title.as_ref()),
        record.filename.as_deref(),
    );

    let episode = first_some([
        record.episode,
        media.and_then(|m| m.episodes),
        embedded.and_then(|e| e.episodes),
    ]);

    let cover_image = {
        let catalog_cover = media.and_then(|m| m.cover_image.as_ref());
        let embedded_cover = embedded.and_then(|e| e.cover_image.as_ref());
        let mut candidates = cover_candidates(catalog_cover);
        candidates.extend(cover_candidates(embedded_cover));
        candidates.push(record.image.as_deref());
        candidates.push(preview.as_deref());
        first_present(candidates)
    };

    let banner_image = first_present([
        media.and_then(|m| m.banner_image.as_deref()),
        embedded.and_then(|e| e.banner_image.as_deref()),
        cover_image.as_deref(),
    ]);

    let constructed_site = catalog_id.map(|id| format!("{}/{}", ANILIST_SITE_BASE, id));
    let site_url = first_present([
        media.and_then(|m| m.site_url.as_deref()),
        embedded.and_then(|e| e.site_url.as_deref()),
        constructed_site.as_deref(),
    ]);

    DisplayResult {
        anime_title,
        episode,
        timestamp: record.from,
        similarity: record.similarity.unwrap_or(0.0),
        description: choose_description(media.and_then(|m| m.description.as_deref())),
        cover_image,
        banner_image,
        season_year: media.and_then(|m| m.season_year),
        average_score: media.and_then(|m| m.average_score),
        site_url,
        frame_image: first_present([record.image.as_deref(), preview.as_deref()]),
        video_url: first_present([record.video.as_deref()]),
    }
}

fn title_candidates(title: Option<&MediaTitle>) -> [Option<&str>; 3] {
    [
        title.and_then(|t| t.english.as_deref()),
        title.and_then(|t| t.romaji.as_deref()),
        title.and_then(|t| t.native.as_deref()),
    ]
}

fn cover_candidates(cover: Option<&CoverImage>) -> Vec<Option<&str>> {
    vec![
        cover.and_then(|c| c.extra_large.as_deref()),
        cover.and_then(|c| c.large.as_deref()),
        cover.and_then(|c| c.medium.as_deref()),
    ]
}

fn pick_title(
    catalog: Option<&MediaTitle>,
    embedded: Option<&MediaTitle>,
    filename: Option<&str>,
) -> String {
    let sanitized = filename.and_then(sanitize_filename);
    let candidates = title_candidates(catalog)
        .into_iter()
        .chain(title_candidates(embedded))
        .chain([sanitized.as_deref()]);
    first_present(candidates).unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}

fn choose_description(raw: Option<&str>) -> String {
    match raw.and_then(strip_html) {
        Some(text) => truncate(&text, DESCRIPTION_MAX_CHARS),
        None => DESCRIPTION_UNAVAILABLE.to_string(),
    }
}
