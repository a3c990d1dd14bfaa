//! Shared error types for the services crate.

use thiserror::Error;

use portfolio_core::model::CatalogError;

/// Errors emitted by a `CatalogSource`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogFetchError {
    #[error("catalog request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("catalog response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("catalog response is invalid: {0}")]
    Invalid(#[from] CatalogError),
    #[error("catalog source unavailable: {0}")]
    Unavailable(String),
}

/// Errors emitted by `DataLoader::fetch`.
///
/// Fetch failures never show up here; they are replaced by the demo catalog.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoaderError {
    #[error("loader has already run")]
    AlreadyStarted,
    #[error("loader was disposed")]
    Disposed,
}
