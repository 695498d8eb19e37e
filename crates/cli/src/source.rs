//! Turns a command-line argument into something the search view accepts.

use std::path::Path;

use anyhow::{Context, Result};
use anisauce_core::ImageFile;

/// What the `search` argument refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A local file, read into memory.
    File(ImageFile),
    /// Anything else is treated as URL text.
    Url(String),
}

/// Resolve `input`: an existing file path is read as a file, everything
/// else goes through URL validation.
pub fn read_input(input: &str) -> Result<InputSource> {
    let path = Path::new(input);
    if !path.is_file() {
        return Ok(InputSource::Url(input.to_string()));
    }

    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());

    Ok(InputSource::File(ImageFile::new(name, guess_mime(path), bytes)))
}

/// Media type from the file extension. Unknown extensions get a non-image
/// type so the normalizer rejects them.
pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" | "jfif" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "avif" => "image/avif",
        "tif" | "tiff" => "image/tiff",
        "mp4" => "video/mp4",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime(Path::new("shot.PNG")), "image/png");
        assert_eq!(guess_mime(Path::new("dir/frame.jpeg")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("clip.mp4")), "video/mp4");
        assert_eq!(guess_mime(Path::new("no_extension")), "application/octet-stream");
    }

    #[test]
    fn test_existing_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("frame.webp");
        std::fs::write(&path, b"RIFF....WEBP").unwrap();

        let source = read_input(path.to_str().unwrap()).unwrap();

        match source {
            InputSource::File(file) => {
                assert_eq!(file.name.as_deref(), Some("frame.webp"));
                assert_eq!(file.mime, "image/webp");
                assert_eq!(file.bytes.len(), 12);
            }
            other => panic!("expected file, got {:?}", other),
        }
    }

    #[test]
    fn test_other_input_is_url_text() {
        assert_eq!(
            read_input("https://example.com/shot.jpg").unwrap(),
            InputSource::Url("https://example.com/shot.jpg".to_string())
        );
        assert_eq!(
            read_input("/definitely/not/here.png").unwrap(),
            InputSource::Url("/definitely/not/here.png".to_string())
        );
    }
}
