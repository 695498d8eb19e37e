//! Types produced and consumed by the input normalizer.

use std::fmt;

use uuid::Uuid;

/// An image handed over by the user (file picker, drop, clipboard).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Original file name, if the source provided one.
    pub name: Option<String>,
    /// Declared media type (e.g. `image/png`).
    pub mime: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(name: Option<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name,
            mime: mime.into(),
            bytes,
        }
    }

    /// Whether the declared media type is an image type.
    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime)
    }
}

pub(crate) fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// A displayable handle to the submitted image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewRef {
    /// Temporary handle for a local file; only meaningful for this session.
    Local(Uuid),
    /// The submitted URL itself.
    Remote(String),
}

impl PreviewRef {
    /// Create a fresh local handle.
    pub fn local() -> Self {
        Self::Local(Uuid::new_v4())
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// The image source string used by the views.
    pub fn source(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PreviewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(id) => write!(f, "blob:anisauce/{}", id),
            Self::Remote(url) => f.write_str(url),
        }
    }
}

/// A normalized search request: a file or a URL, plus its preview.
///
/// The normalizer only ever fills one of `file`/`url`. A payload with
/// neither is rejected by the match client before any request is made.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPayload {
    pub file: Option<ImageFile>,
    pub url: Option<String>,
    pub preview: Option<PreviewRef>,
}

impl SearchPayload {
    pub fn from_file(file: ImageFile) -> Self {
        Self {
            file: Some(file),
            url: None,
            preview: Some(PreviewRef::local()),
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            preview: Some(PreviewRef::Remote(url.clone())),
            file: None,
            url: Some(url),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.url.is_none()
    }
}

/// Kind of an entry in a clipboard or drop payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferKind {
    File,
    String,
}

/// A typed entry of a clipboard or drop payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferItem {
    pub kind: TransferKind,
    pub mime: String,
    /// The file backing this item, when it can be materialized.
    pub file: Option<ImageFile>,
}

impl TransferItem {
    /// Materialize the item as a file. Only file-kind items yield one.
    pub fn as_file(&self) -> Option<&ImageFile> {
        match self.kind {
            TransferKind::File => self.file.as_ref(),
            TransferKind::String => None,
        }
    }
}

/// A clipboard or drag-and-drop payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferData {
    pub files: Vec<ImageFile>,
    pub items: Vec<TransferItem>,
    pub text: Option<String>,
}

impl TransferData {
    /// Payload carrying only plain text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Payload carrying a single file.
    pub fn file(file: ImageFile) -> Self {
        Self {
            files: vec![file],
            ..Default::default()
        }
    }
}
