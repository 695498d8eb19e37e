//! Testing utilities and mock implementations.
//!
//! Mocks of both remote services, so the whole search lifecycle can be
//! exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use anisauce_core::testing::{fixtures, MockMatchSearcher, MockMediaLookup};
//!
//! let searcher = MockMatchSearcher::new();
//! let lookup = MockMediaLookup::new();
//!
//! searcher.set_results(vec![fixtures::match_record(Some(CatalogRef::Id(1)), None)]).await;
//! lookup.add_media(fixtures::catalog_record(1, "Cowboy Bebop")).await;
//! ```

mod mock_match_searcher;
mod mock_media_lookup;

pub use mock_match_searcher::{MockMatchSearcher, RecordedSearch};
pub use mock_media_lookup::MockMediaLookup;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::anilist::{CatalogRecord, CoverImage, MediaTitle};
    use crate::input::ImageFile;
    use crate::merge::DisplayResult;
    use crate::trace::{CatalogRef, MatchRecord};

    /// Create a match record with reasonable defaults.
    pub fn match_record(anilist: Option<CatalogRef>, filename: Option<&str>) -> MatchRecord {
        MatchRecord {
            anilist,
            filename: filename.map(str::to_string),
            episode: Some(2),
            from: Some(663.17),
            to: Some(665.42),
            similarity: Some(0.8234),
            image: Some("https://media.trace.moe/image/frame.jpg".to_string()),
            video: Some("https://media.trace.moe/video/clip.mp4".to_string()),
        }
    }

    /// Create a fully populated AniList entry.
    pub fn catalog_record(id: u64, english_title: &str) -> CatalogRecord {
        CatalogRecord {
            id,
            id_mal: Some(id + 1000),
            title: Some(MediaTitle {
                english: Some(english_title.to_string()),
                romaji: Some(format!("{} (romaji)", english_title)),
                native: None,
            }),
            description: Some(format!("The story of <b>{}</b>.", english_title)),
            cover_image: Some(CoverImage {
                extra_large: Some(format!("https://img.anili.st/{}/xl.jpg", id)),
                large: Some(format!("https://img.anili.st/{}/l.jpg", id)),
                medium: Some(format!("https://img.anili.st/{}/m.jpg", id)),
            }),
            banner_image: Some(format!("https://img.anili.st/{}/banner.jpg", id)),
            season_year: Some(1999),
            average_score: Some(88),
            site_url: Some(format!("https://anilist.co/anime/{}", id)),
            episodes: Some(24),
            genres: vec!["Action".to_string(), "Adventure".to_string()],
            external_links: vec![],
        }
    }

    /// Create a display result with the given title.
    pub fn display_result(title: &str) -> DisplayResult {
        DisplayResult {
            anime_title: title.to_string(),
            episode: Some(3),
            timestamp: Some(91.5),
            similarity: 0.93,
            description: format!("About {}.", title),
            cover_image: Some("https://img.anili.st/cover.jpg".to_string()),
            banner_image: Some("https://img.anili.st/banner.jpg".to_string()),
            season_year: Some(2004),
            average_score: Some(81),
            site_url: Some("https://anilist.co/anime/1".to_string()),
            frame_image: Some("https://media.trace.moe/image/frame.jpg".to_string()),
            video_url: Some("https://media.trace.moe/video/clip.mp4".to_string()),
        }
    }

    /// Create a small PNG file.
    pub fn png_file(name: &str) -> ImageFile {
        ImageFile::new(
            Some(name.to_string()),
            "image/png",
            vec![0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a],
        )
    }
}
