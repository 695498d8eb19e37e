//! Types for the search orchestrator.

use thiserror::Error;

use super::state::GENERIC_ERROR;
use crate::input::InputError;
use crate::merge::DisplayResult;
use crate::trace::MatchError;

/// Errors that end a search attempt.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Local input failed validation.
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    /// trace.moe could not produce a match.
    #[error("match search failed: {0}")]
    Match(#[from] MatchError),
}

impl SearchError {
    /// Text for the error line of the search view.
    pub fn user_message(&self) -> String {
        match self {
            Self::Input(e) => e.to_string(),
            Self::Match(e) => e.user_message().unwrap_or(GENERIC_ERROR).to_string(),
        }
    }
}

/// What a user action led to.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Search succeeded; the result was persisted.
    Completed(DisplayResult),
    /// Search was attempted and failed with this message.
    Failed(String),
    /// Input was rejected before any request.
    Rejected(InputError),
    /// Nothing to do.
    Ignored,
}

/// Result of handing a clipboard or drop payload to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferHandled {
    /// Whether the originating event's default action should be prevented.
    pub prevents_default: bool,
    pub outcome: SearchOutcome,
}
