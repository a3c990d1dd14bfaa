use std::env;

use async_trait::async_trait;
use portfolio_core::model::CourseCatalog;
use reqwest::Client;

use crate::error::CatalogFetchError;

/// Default location of the published catalog document.
pub const DEFAULT_CATALOG_URL: &str = "https://moocs.aungmyokyaw.com/moocsData.json";

/// Anything that can produce the course catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<CourseCatalog, CatalogFetchError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    pub endpoint: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CATALOG_URL.into(),
        }
    }
}

impl CatalogConfig {
    /// Reads `PORTFOLIO_CATALOG_URL`, falling back to the published endpoint.
    #[must_use]
    pub fn from_env() -> Self {
        let endpoint = env::var("PORTFOLIO_CATALOG_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_CATALOG_URL.into());
        Self { endpoint }
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

/// Fetches the catalog with a single unauthenticated `GET`.
#[derive(Clone)]
pub struct HttpCatalogSource {
    client: Client,
    config: CatalogConfig,
}

impl HttpCatalogSource {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(CatalogConfig::from_env())
    }

    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch_catalog(&self) -> Result<CourseCatalog, CatalogFetchError> {
        let response = self.client.get(&self.config.endpoint).send().await?;

        if !response.status().is_success() {
            return Err(CatalogFetchError::HttpStatus(response.status()));
        }

        let body = response.text().await?;
        decode_catalog(&body)
    }
}

/// Parse and validate a catalog document.
///
/// # Errors
///
/// Returns `CatalogFetchError::Decode` for malformed JSON and
/// `CatalogFetchError::Invalid` when the catalog fails validation.
pub fn decode_catalog(body: &str) -> Result<CourseCatalog, CatalogFetchError> {
    let catalog: CourseCatalog = serde_json::from_str(body)?;
    catalog.validate()?;
    Ok(catalog)
}
