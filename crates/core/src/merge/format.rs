//! Formatting for the results view.

/// `0.8234` becomes `82.3%`.
pub fn format_similarity(similarity: f64) -> String {
    format!("{:.1}%", similarity * 100.0)
}

/// Seconds as `mm:ss`; `unknown` when there is no offset.
pub fn format_timestamp(seconds: Option<f64>) -> String {
    match seconds {
        Some(value) if value.is_finite() => {
            let total = value.max(0.0).floor() as u64;
            format!("{:02}:{:02}", total / 60, total % 60)
        }
        _ => "unknown".to_string(),
    }
}

/// Ask trace.moe for the large clip size unless a size is already set.
pub fn build_video_url(base: &str) -> Option<String> {
    if base.is_empty() {
        return None;
    }
    if base.contains("size=") {
        return Some(base.to_string());
    }
    let separator = if base.contains('?') { '&' } else { '?' };
    Some(format!("{}{}size=l", base, separator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_similarity() {
        assert_eq!(format_similarity(0.8234), "82.3%");
        assert_eq!(format_similarity(1.0), "100.0%");
        assert_eq!(format_similarity(0.0), "0.0%");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(Some(663.17)), "11:03");
        assert_eq!(format_timestamp(Some(5.9)), "00:05");
        assert_eq!(format_timestamp(Some(-3.0)), "00:00");
        assert_eq!(format_timestamp(Some(f64::NAN)), "unknown");
        assert_eq!(format_timestamp(None), "unknown");
    }

    #[test]
    fn test_build_video_url() {
        assert_eq!(
            build_video_url("https://media.trace.moe/video/1/a.mp4").as_deref(),
            Some("https://media.trace.moe/video/1/a.mp4?size=l")
        );
        assert_eq!(
            build_video_url("https://media.trace.moe/video/1/a.mp4?t=1").as_deref(),
            Some("https://media.trace.moe/video/1/a.mp4?t=1&size=l")
        );
        assert_eq!(
            build_video_url("https://x/v.mp4?size=s").as_deref(),
            Some("https://x/v.mp4?size=s")
        );
        assert!(build_video_url("").is_none());
    }
}
