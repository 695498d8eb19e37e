//! Search orchestrator.
//!
//! Turns user actions into search attempts and tracks their lifecycle:
//! - **Idle** -> **Searching** on any accepted input
//! - **Searching** -> **Success** once a result is merged and persisted
//! - **Searching** -> **Failed** on a match failure or timeout
//!
//! Validation failures move straight to **Failed** without a request.

mod runner;
mod state;
mod types;

pub use runner::{NavigateCallback, SearchOrchestrator, StateCallback};
pub use state::{
    SearchPhase, SearchState, GENERIC_ERROR, STATUS_ACCEPTED, STATUS_CONTACTING, STATUS_DONE,
    STATUS_FETCHING, STATUS_RETRY,
};
pub use types::{SearchError, SearchOutcome, TransferHandled};
