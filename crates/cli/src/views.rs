//! Terminal rendering of the results view.

use anisauce_core::merge::{build_video_url, format_similarity, format_timestamp};
use anisauce_core::{DisplayResult, StoredResult};

/// Shown under every result and when nothing is saved yet.
pub const NEW_SEARCH_HINT: &str = "new search: anisauce search <FILE|URL>";

/// Shown when the session store holds no result.
pub const NO_RESULT: &str = "No saved result yet.";

/// Render a result the way the results view lays it out.
pub fn render_result(result: &DisplayResult) -> String {
    let mut lines = vec![result.anime_title.clone()];

    let episode = result
        .episode
        .map(|ep| format!("Ep {}", ep))
        .unwrap_or_else(|| "unknown".to_string());
    let at = match result.timestamp {
        Some(_) => format!(" at {}", format_timestamp(result.timestamp)),
        None => String::new(),
    };
    lines.push(format!(
        "sauce: {}{} | {} Similarity",
        episode,
        at,
        format_similarity(result.similarity)
    ));

    let mut meta = Vec::new();
    if let Some(year) = result.season_year {
        meta.push(format!("Season Year: {}", year));
    }
    if let Some(score) = result.average_score {
        meta.push(format!("AniList Score: {}%", score));
    }
    if !meta.is_empty() {
        lines.push(meta.join(" | "));
    }

    lines.push(String::new());
    lines.push(result.description.clone());
    lines.push(String::new());

    let links = [
        ("cover", result.cover_image.clone()),
        ("frame", result.frame_image.clone()),
        ("clip", result.video_url.as_deref().and_then(build_video_url)),
        ("view on anilist", result.site_url.clone()),
    ];
    for (label, link) in links {
        if let Some(link) = link {
            lines.push(format!("{}: {}", label, link));
        }
    }

    lines.push(String::new());
    lines.push(NEW_SEARCH_HINT.to_string());
    lines.join("\n")
}

/// Render a stored entry, or the empty-store message.
pub fn render_entry(entry: Option<&StoredResult>) -> String {
    match entry {
        Some(entry) => {
            let mut out = render_result(&entry.result);
            if let Some(saved_at) = entry.saved_at() {
                out.push_str(&format!(
                    "\n(saved {})",
                    saved_at.format("%Y-%m-%d %H:%M:%S UTC")
                ));
            }
            out
        }
        None => format!("{}\n{}", NO_RESULT, NEW_SEARCH_HINT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anisauce_core::testing::fixtures;

    #[test]
    fn test_render_full_result() {
        let rendered = render_result(&fixtures::display_result("Cowboy Bebop"));

        assert!(rendered.starts_with("Cowboy Bebop\n"));
        assert!(rendered.contains("sauce: Ep 3 at 01:31 | 93.0% Similarity"));
        assert!(rendered.contains("Season Year: 2004 | AniList Score: 81%"));
        assert!(rendered.contains("About Cowboy Bebop."));
        assert!(rendered.contains("clip: https://media.trace.moe/video/clip.mp4?size=l"));
        assert!(rendered.contains("view on anilist: https://anilist.co/anime/1"));
        assert!(rendered.ends_with(NEW_SEARCH_HINT));
    }

    #[test]
    fn test_render_layout() {
        let rendered = render_result(&fixtures::display_result("Paprika"));
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 12);
        assert_eq!(lines[0], "Paprika");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "About Paprika.");
        assert_eq!(lines[6], "cover: https://img.anili.st/cover.jpg");
        assert_eq!(lines[10], "");
        assert_eq!(lines[11], NEW_SEARCH_HINT);
        assert!(!rendered.ends_with('\n'));
    }

    #[test]
    fn test_render_sparse_result() {
        let mut result = fixtures::display_result("Unknown title");
        result.episode = None;
        result.timestamp = None;
        result.season_year = None;
        result.average_score = None;
        result.video_url = None;
        result.site_url = None;

        let rendered = render_result(&result);

        assert!(rendered.contains("sauce: unknown | 93.0% Similarity"));
        assert!(!rendered.contains("Season Year"));
        assert!(!rendered.contains("clip:"));
        assert!(!rendered.contains("view on anilist"));
    }

    #[test]
    fn test_render_empty_store() {
        let rendered = render_entry(None);
        assert!(rendered.starts_with(NO_RESULT));
        assert!(rendered.ends_with(NEW_SEARCH_HINT));
    }

    #[test]
    fn test_render_stored_entry() {
        let entry = StoredResult {
            saved_at: 0,
            result: fixtures::display_result("Lain"),
        };
        let rendered = render_entry(Some(&entry));
        assert!(rendered.starts_with("Lain\n"));
        assert!(rendered.ends_with("(saved 1970-01-01 00:00:00 UTC)"));
    }
}
