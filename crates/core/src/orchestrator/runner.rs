//! Search orchestrator implementation.
//!
//! Drives one attempt through: normalize -> trace.moe -> AniList -> merge
//! -> persist -> navigate. The two network calls are strictly sequential
//! since the lookup needs the id from the match. Each call has its own
//! deadline: an expired match fails the attempt, an expired lookup only
//! drops the catalog data.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::state::SearchState;
use super::types::{SearchError, SearchOutcome, TransferHandled};
use crate::anilist::{lookup_media, CatalogRecord, MediaLookup};
use crate::config::SearchConfig;
use crate::input::{
    normalize_file, normalize_url, resolve_transfer, DragTracker, ErrorMode, ImageFile,
    InputError, PreviewRef, PreviewSlot, SearchPayload, TransferData, TransferOutcome,
};
use crate::merge::{merge_result, DisplayResult};
use crate::store::ResultStore;
use crate::trace::{MatchError, MatchSearcher};

/// Called once per successful search, after the result is persisted.
pub type NavigateCallback = Arc<dyn Fn(&DisplayResult) + Send + Sync>;

/// Called after every state transition with a snapshot of the new state.
pub type StateCallback = Arc<dyn Fn(&SearchState) + Send + Sync>;

/// Owns the search view's state and runs search attempts.
pub struct SearchOrchestrator {
    config: SearchConfig,
    searcher: Arc<dyn MatchSearcher>,
    lookup: Arc<dyn MediaLookup>,
    store: Arc<dyn ResultStore>,

    state: RwLock<SearchState>,
    url_input: RwLock<String>,
    preview: Mutex<PreviewSlot>,
    drag: Mutex<DragTracker>,

    on_navigate: Option<NavigateCallback>,
    on_state_change: Option<StateCallback>,
}

impl SearchOrchestrator {
    /// Create a new orchestrator.
    pub fn new(
        config: SearchConfig,
        searcher: Arc<dyn MatchSearcher>,
        lookup: Arc<dyn MediaLookup>,
        store: Arc<dyn ResultStore>,
    ) -> Self {
        Self {
            config,
            searcher,
            lookup,
            store,
            state: RwLock::new(SearchState::default()),
            url_input: RwLock::new(String::new()),
            preview: Mutex::new(PreviewSlot::new()),
            drag: Mutex::new(DragTracker::new()),
            on_navigate: None,
            on_state_change: None,
        }
    }

    /// Set the callback that moves to the results view.
    pub fn with_navigate_callback(mut self, callback: NavigateCallback) -> Self {
        self.on_navigate = Some(callback);
        self
    }

    /// Set the callback that observes state transitions.
    pub fn with_state_callback(mut self, callback: StateCallback) -> Self {
        self.on_state_change = Some(callback);
        self
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> SearchState {
        self.state.read().await.clone()
    }

    /// Current contents of the URL field.
    pub async fn url_input(&self) -> String {
        self.url_input.read().await.clone()
    }

    /// Preview currently shown, if any.
    pub fn preview(&self) -> Option<PreviewRef> {
        lock(&self.preview).current().cloned()
    }

    /// Whether the drop zone is highlighted.
    pub fn drag_active(&self) -> bool {
        lock(&self.drag).is_active()
    }

    // =========================================================================
    // User actions
    // =========================================================================

    /// The URL field was edited.
    pub async fn on_url_change(&self, value: &str) {
        *self.url_input.write().await = value.to_string();
        self.transition(SearchState::clear_error).await;
    }

    /// Submit the URL field.
    pub async fn submit_url_input(&self) -> SearchOutcome {
        let raw = self.url_input().await;
        self.submit_url(&raw).await
    }

    /// Submit URL text, reporting validation errors.
    pub async fn submit_url(&self, raw: &str) -> SearchOutcome {
        match normalize_url(raw) {
            Ok(payload) => self.start(payload).await,
            Err(e) => self.reject(e).await,
        }
    }

    /// A file was chosen with the file picker.
    pub async fn submit_file(&self, file: ImageFile) -> SearchOutcome {
        match normalize_file(file) {
            Ok(payload) => self.start(payload).await,
            Err(e) => self.reject(e).await,
        }
    }

    /// A clipboard payload was pasted, into the URL field (`Report`) or
    /// anywhere else in the window (`Silent`).
    pub async fn handle_paste(&self, data: TransferData, mode: ErrorMode) -> TransferHandled {
        self.handle_transfer(data, mode).await
    }

    pub fn drag_enter(&self) -> bool {
        lock(&self.drag).enter()
    }

    pub fn drag_leave(&self) -> bool {
        lock(&self.drag).leave()
    }

    /// A payload was dropped on the drop zone.
    pub async fn handle_drop(&self, data: TransferData) -> TransferHandled {
        lock(&self.drag).finish();
        self.handle_transfer(data, ErrorMode::Report).await
    }

    /// Release the preview; called when the search view goes away.
    pub fn teardown(&self) {
        lock(&self.preview).clear();
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    async fn handle_transfer(&self, data: TransferData, mode: ErrorMode) -> TransferHandled {
        let outcome = resolve_transfer(data, mode);
        let prevents_default = outcome.prevents_default();
        let outcome = match outcome {
            TransferOutcome::Accepted(payload) => self.start(payload).await,
            TransferOutcome::Rejected { error, .. } => self.reject(error).await,
            TransferOutcome::Unhandled => SearchOutcome::Ignored,
        };
        TransferHandled {
            prevents_default,
            outcome,
        }
    }

    async fn reject(&self, error: InputError) -> SearchOutcome {
        debug!("Input rejected: {}", error);
        let message = error.to_string();
        self.transition(|s| s.reject(message)).await;
        SearchOutcome::Rejected(error)
    }

    async fn start(&self, payload: SearchPayload) -> SearchOutcome {
        {
            let released = lock(&self.preview).replace(payload.preview.clone());
            if let Some(old) = released {
                debug!("Superseded preview {}", old);
            }
        }
        *self.url_input.write().await = payload.url.clone().unwrap_or_default();
        self.transition(SearchState::accept).await;

        match self.run_search(payload).await {
            Ok(result) => SearchOutcome::Completed(result),
            Err(e) => SearchOutcome::Failed(e.user_message()),
        }
    }

    /// Run one attempt for an already-normalized payload.
    pub async fn run_search(&self, payload: SearchPayload) -> Result<DisplayResult, SearchError> {
        self.transition(SearchState::begin).await;
        info!(
            "Search started ({})",
            if payload.file.is_some() { "upload" } else { "url" }
        );

        let outcome = self.execute(&payload).await;

        match &outcome {
            Ok(result) => {
                self.store.save(result);
                self.transition(SearchState::succeed).await;
                info!(
                    "Search succeeded: '{}' (similarity {:.3})",
                    result.anime_title, result.similarity
                );
                if let Some(navigate) = &self.on_navigate {
                    navigate(result);
                }
            }
            Err(e) => {
                warn!("Search failed: {}", e);
                let message = e.user_message();
                self.transition(|s| s.fail(message)).await;
            }
        }

        self.transition(SearchState::finish).await;
        outcome
    }

    async fn execute(&self, payload: &SearchPayload) -> Result<DisplayResult, SearchError> {
        if payload.is_empty() {
            return Err(MatchError::MissingInput.into());
        }

        let deadline = Duration::from_secs(self.config.search_timeout_secs);
        let record = tokio::time::timeout(deadline, self.searcher.search(payload))
            .await
            .map_err(|_| MatchError::Timeout)??;

        self.transition(SearchState::enrich).await;
        let media = match record.catalog_id() {
            Some(id) => self.enrich(id).await,
            None => {
                debug!("Match has no AniList id; skipping lookup");
                None
            }
        };

        Ok(merge_result(
            &record,
            media.as_ref(),
            payload.preview.as_ref(),
        ))
    }

    /// AniList data for `id`, or `None` when the lookup fails or runs past
    /// its deadline.
    async fn enrich(&self, id: u64) -> Option<CatalogRecord> {
        let deadline = Duration::from_secs(self.config.lookup_timeout_secs);
        match tokio::time::timeout(deadline, lookup_media(self.lookup.as_ref(), id)).await {
            Ok(media) => media,
            Err(_) => {
                warn!("AniList lookup for id {} timed out after {:?}", id, deadline);
                None
            }
        }
    }

    async fn transition(&self, apply: impl FnOnce(&mut SearchState)) {
        let snapshot = {
            let mut state = self.state.write().await;
            apply(&mut state);
            state.clone()
        };
        if let Some(callback) = &self.on_state_change {
            callback(&snapshot);
        }
    }
}

impl Drop for SearchOrchestrator {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
