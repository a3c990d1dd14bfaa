#![forbid(unsafe_code)]

pub mod catalog_source;
pub mod data_loader;
pub mod error;
pub mod pacing;
pub mod preference_monitor;
pub mod reveal_observer;

pub use portfolio_core::Clock;

pub use catalog_source::{
    CatalogConfig, CatalogSource, DEFAULT_CATALOG_URL, HttpCatalogSource, decode_catalog,
};
pub use data_loader::{DataLoader, FallbackHook, LoadOutcome, LoaderSnapshot};
pub use error::{CatalogFetchError, LoaderError};
pub use pacing::{Pacer, RecordingPacer, TokioPacer};
pub use preference_monitor::{
    HostSubscription, ManualPreferenceHost, PreferenceHost, PreferenceListener, PreferenceMonitor,
};
pub use reveal_observer::{IntersectionEntry, IntersectionWatcher, RevealObserver};
