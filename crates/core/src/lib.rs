pub mod anilist;
pub mod config;
pub mod input;
pub mod merge;
pub mod orchestrator;
pub mod store;
pub mod testing;
pub mod trace;

pub use anilist::{lookup_media, AniListClient, CatalogRecord, LookupError, MediaLookup};
pub use config::{
    load_config, load_config_from_str, load_default_config, validate_config, Config, ConfigError,
    SanitizedConfig, StoreBackend,
};
pub use input::{
    normalize_file, normalize_url, resolve_transfer, DragTracker, ErrorMode, ImageFile,
    InputError, PreviewRef, SearchPayload, TransferData, TransferItem, TransferKind,
    TransferOutcome,
};
pub use merge::{merge_result, DisplayResult};
pub use orchestrator::{
    SearchError, SearchOrchestrator, SearchOutcome, SearchPhase, SearchState, TransferHandled,
};
pub use store::{
    create_result_store, FileResultStore, MemoryResultStore, ResultStore, StoredResult,
    UnavailableStore, RESULT_STORAGE_KEY,
};
pub use trace::{CatalogRef, MatchError, MatchRecord, MatchSearcher, TraceMoeClient};
