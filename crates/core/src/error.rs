use thiserror::Error;

use crate::loading::LoadingError;
use crate::model::CatalogError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Loading(#[from] LoadingError),
}
