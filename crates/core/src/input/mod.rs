//! Input normalization.
//!
//! Every way of handing over a screenshot (file picker, drag-and-drop,
//! clipboard paste, typed URL) ends up here and leaves as a single
//! [`SearchPayload`], or as a validation error. Nothing in this module
//! touches the network.

mod drag;
mod preview;
mod types;

pub use drag::DragTracker;
pub use preview::PreviewSlot;
pub use types::*;

use reqwest::Url;
use thiserror::Error;
use tracing::debug;

/// Validation failures for local input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InputError {
    /// Declared media type is not `image/*`.
    #[error("Please choose an image file.")]
    NotAnImage { mime: String },

    /// URL field was blank.
    #[error("Paste an image URL first.")]
    EmptyUrl,

    /// Text did not parse as an http(s) URL.
    #[error("That doesn't look like a valid image URL.")]
    InvalidUrl(String),
}

/// How URL validation errors from a transfer payload are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorMode {
    /// Report them to the user (paste into the URL field, drop zone).
    Report,
    /// Swallow them (window-level paste of arbitrary text).
    Silent,
}

/// Result of resolving a clipboard or drop payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// The payload produced a search.
    Accepted(SearchPayload),
    /// The payload was usable but failed validation.
    Rejected {
        error: InputError,
        /// Whether the event was consumed (default handling suppressed).
        intercepted: bool,
    },
    /// Nothing usable; default handling proceeds.
    Unhandled,
}

impl TransferOutcome {
    /// Whether the originating event should have its default action prevented.
    pub fn prevents_default(&self) -> bool {
        match self {
            Self::Accepted(_) => true,
            Self::Rejected { intercepted, .. } => *intercepted,
            Self::Unhandled => false,
        }
    }
}

/// Validate a selected or dropped file.
pub fn normalize_file(file: ImageFile) -> Result<SearchPayload, InputError> {
    if !file.is_image() {
        debug!("Rejected file with media type '{}'", file.mime);
        return Err(InputError::NotAnImage { mime: file.mime });
    }
    Ok(SearchPayload::from_file(file))
}

/// Validate typed or pasted URL text.
pub fn normalize_url(raw: &str) -> Result<SearchPayload, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyUrl);
    }

    let parsed = Url::parse(trimmed).map_err(|_| InputError::InvalidUrl(trimmed.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(SearchPayload::from_url(trimmed)),
        _ => Err(InputError::InvalidUrl(trimmed.to_string())),
    }
}

/// Resolve a clipboard or drop payload.
///
/// Order: first attached file, then the first file-kind image item, then
/// plain text as a URL.
pub fn resolve_transfer(data: TransferData, mode: ErrorMode) -> TransferOutcome {
    let TransferData { files, items, text } = data;

    if let Some(file) = files.into_iter().next() {
        return file_outcome(file);
    }

    let item_file = items
        .iter()
        .filter(|item| item.kind == TransferKind::File && is_image_mime(&item.mime))
        .find_map(|item| item.as_file().cloned());
    if let Some(file) = item_file {
        return file_outcome(file);
    }

    match text {
        Some(text) if !text.is_empty() => match normalize_url(&text) {
            Ok(payload) => TransferOutcome::Accepted(payload),
            Err(error) => match mode {
                ErrorMode::Report => TransferOutcome::Rejected {
                    error,
                    intercepted: false,
                },
                ErrorMode::Silent => {
                    debug!("Ignoring pasted text that is not an image URL");
                    TransferOutcome::Unhandled
                }
            },
        },
        _ => TransferOutcome::Unhandled,
    }
}

fn file_outcome(file: ImageFile) -> TransferOutcome {
    match normalize_file(file) {
        Ok(payload) => TransferOutcome::Accepted(payload),
        Err(error) => TransferOutcome::Rejected {
            error,
            intercepted: true,
        },
    }
}
