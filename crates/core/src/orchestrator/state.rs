//! Search lifecycle state.

use serde::Serialize;

/// Status shown once an input has been accepted.
pub const STATUS_ACCEPTED: &str = "Finding sauce...";
/// Status while waiting on trace.moe.
pub const STATUS_CONTACTING: &str = "Contacting trace.moe...";
/// Status while waiting on AniList.
pub const STATUS_FETCHING: &str = "Fetching anime details...";
/// Status after a successful search.
pub const STATUS_DONE: &str = "Sauce acquired! Sending you to the preview...";
/// Status after any failure.
pub const STATUS_RETRY: &str = "Try another frame or URL.";
/// Error shown for failures that carry no useful message.
pub const GENERIC_ERROR: &str = "Something unexpected happened.";

/// Where the current attempt stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    Success,
    Failed,
}

/// Transient state of the search view.
///
/// Only the transition methods below mutate it, so `loading` is true
/// exactly while the phase is [`SearchPhase::Searching`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchState {
    pub phase: SearchPhase,
    pub loading: bool,
    pub error: Option<String>,
    pub status: String,
}

impl SearchState {
    /// An input passed validation.
    pub(crate) fn accept(&mut self) {
        self.error = None;
        self.status = STATUS_ACCEPTED.to_string();
    }

    /// An input failed validation; no search is attempted.
    pub(crate) fn reject(&mut self, message: impl Into<String>) {
        self.phase = SearchPhase::Failed;
        self.loading = false;
        self.error = Some(message.into());
        self.status = STATUS_RETRY.to_string();
    }

    /// Request to trace.moe is about to go out.
    pub(crate) fn begin(&mut self) {
        self.phase = SearchPhase::Searching;
        self.loading = true;
        self.error = None;
        self.status = STATUS_CONTACTING.to_string();
    }

    /// Match found; enriching from AniList.
    pub(crate) fn enrich(&mut self) {
        self.status = STATUS_FETCHING.to_string();
    }

    pub(crate) fn succeed(&mut self) {
        self.phase = SearchPhase::Success;
        self.loading = false;
        self.status = STATUS_DONE.to_string();
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.phase = SearchPhase::Failed;
        self.loading = false;
        self.error = Some(if message.trim().is_empty() {
            GENERIC_ERROR.to_string()
        } else {
            message
        });
        self.status = STATUS_RETRY.to_string();
    }

    /// Attempt concluded, whatever the outcome.
    pub(crate) fn finish(&mut self) {
        self.loading = false;
        if self.phase == SearchPhase::Searching {
            self.phase = SearchPhase::Idle;
        }
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_clears_previous_error() {
        let mut state = SearchState::default();
        state.fail("No matches found. Try another frame.");
        assert_eq!(state.phase, SearchPhase::Failed);

        state.begin();
        assert_eq!(state.phase, SearchPhase::Searching);
        assert!(state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.status, STATUS_CONTACTING);
    }

    #[test]
    fn test_fail_with_blank_message_uses_generic() {
        let mut state = SearchState::default();
        state.begin();
        state.fail("  ");
        assert_eq!(state.error.as_deref(), Some(GENERIC_ERROR));
        assert_eq!(state.status, STATUS_RETRY);
        assert!(!state.loading);
    }

    #[test]
    fn test_finish_never_leaves_loading() {
        let mut state = SearchState::default();
        state.begin();
        state.finish();
        assert!(!state.loading);
        assert_eq!(state.phase, SearchPhase::Idle);

        state.begin();
        state.succeed();
        state.finish();
        assert_eq!(state.phase, SearchPhase::Success);
        assert!(!state.loading);
    }
}
