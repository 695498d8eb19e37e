//! Text cleanup for synopses and release file names.

use once_cell::sync::Lazy;
use regex_lite::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
static EXTENSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.[a-z0-9]{2,4}$").expect("valid extension pattern"));
static GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\[(][^\])]+[\])]").expect("valid group pattern"));
static RELEASE_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(BD|WEB[- ]?DL|RAW|x264|x265|AAC|FLAC|1080p|720p|480p|HEVC|HDR|MP4|MKV)\b")
        .expect("valid release token pattern")
});
static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_.]").expect("valid separator pattern"));

/// Named entities AniList leaves in plain-text descriptions.
const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&mdash;", "-"),
    ("&ndash;", "-"),
    ("&amp;", "&"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

/// Remove tags and the common entities, collapse whitespace.
/// Returns `None` when nothing is left.
pub fn strip_html(value: &str) -> Option<String> {
    let mut text = TAG.replace_all(value, " ").into_owned();
    for (entity, replacement) in ENTITIES {
        text = text.replace(entity, replacement);
    }
    let text = collapse_whitespace(&text);
    (!text.is_empty()).then_some(text)
}

/// Cap `text` at `max_chars` characters, ending with `…` when cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if max_chars == 0 || text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars - 1).collect();
    cut.push('…');
    cut
}

/// Turn a release file name into something that reads like a title.
///
/// `[Group] Show Name - 01 [1080p][x264].mkv` becomes `Show Name 01`.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let value = EXTENSION.replace(name, " ");
    let value = GROUP.replace_all(&value, " ");
    let value = RELEASE_TOKEN.replace_all(&value, " ");
    let value = SEPARATOR.replace_all(&value, " ");
    let value = collapse_whitespace(&value);
    (!value.is_empty()).then_some(value)
}

fn collapse_whitespace(value: &str) -> String {
    WHITESPACE.replace_all(value, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_release_name() {
        assert_eq!(
            sanitize_filename("[Group] Show Name - 01 [1080p][x264].mkv").as_deref(),
            Some("Show Name 01")
        );
    }

    #[test]
    fn test_sanitize_tokens_and_parens() {
        assert_eq!(
            sanitize_filename("Mushishi_S01E03 (BD 720p HEVC FLAC).mp4").as_deref(),
            Some("Mushishi S01E03")
        );
        assert_eq!(
            sanitize_filename("Cowboy.Bebop.05.WEB-DL.x265.MKV").as_deref(),
            Some("Cowboy Bebop 05")
        );
        assert_eq!(
            sanitize_filename("Lain 03 web dl raw").as_deref(),
            Some("Lain 03")
        );
    }

    #[test]
    fn test_sanitize_keeps_words_containing_tokens() {
        // Whole-word match only.
        assert_eq!(
            sanitize_filename("Bakemonogatari 01.mp4").as_deref(),
            Some("Bakemonogatari 01")
        );
        assert_eq!(sanitize_filename("RAWR 2").as_deref(), Some("RAWR 2"));
    }

    #[test]
    fn test_sanitize_empty_result() {
        assert!(sanitize_filename("[SubsPlease] (1080p).mkv").is_none());
        assert!(sanitize_filename("").is_none());
        assert!(sanitize_filename("___").is_none());
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("A <b>bold</b> tale&nbsp;of&amp; &quot;friends&quot;&mdash;and <br><br>rivals&#39;").as_deref(),
            Some("A bold tale of& \"friends\"-and rivals'")
        );
        assert!(strip_html("<br> &nbsp; ").is_none());
    }

    #[test]
    fn test_truncate_long_text() {
        let text = "a".repeat(310);
        let cut = truncate(&text, 300);
        assert_eq!(cut.chars().count(), 300);
        assert!(cut.ends_with('…'));
        assert!(cut.starts_with(&"a".repeat(299)));
    }

    #[test]
    fn test_truncate_short_and_boundary() {
        let text = "b".repeat(50);
        assert_eq!(truncate(&text, 300), text);
        let exact = "c".repeat(300);
        assert_eq!(truncate(&exact, 300), exact);
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let text = "夏".repeat(301);
        let cut = truncate(&text, 300);
        assert_eq!(cut.chars().count(), 300);
    }
}
