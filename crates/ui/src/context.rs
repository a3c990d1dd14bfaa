use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use portfolio_core::ElementHandle;
use portfolio_core::model::ProfileData;
use services::{CatalogSource, ManualPreferenceHost, Pacer};

use crate::platform::LinkOpenerRef;
use crate::views::IntersectionFeed;

pub trait UiApp: Send + Sync {
    fn catalog_source(&self) -> Arc<dyn CatalogSource>;
    fn pacer(&self) -> Arc<dyn Pacer>;
    /// Host the webview media-query bridge reports into.
    fn preference_host(&self) -> ManualPreferenceHost;
    fn link_opener(&self) -> LinkOpenerRef;
    fn profile(&self) -> ProfileData;

    /// Feed the webview intersection bridge reports into.
    fn intersection_feed(&self) -> IntersectionFeed {
        IntersectionFeed::new()
    }

    /// Whether to install the webview scripts (media queries, intersection).
    fn host_bridges(&self) -> bool {
        true
    }
}

#[derive(Clone)]
pub struct AppContext {
    catalog_source: Arc<dyn CatalogSource>,
    pacer: Arc<dyn Pacer>,
    preference_host: ManualPreferenceHost,
    link_opener: LinkOpenerRef,
    profile: ProfileData,
    intersection_feed: IntersectionFeed,
    host_bridges: bool,
    next_handle: Arc<AtomicU64>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog_source: app.catalog_source(),
            pacer: app.pacer(),
            preference_host: app.preference_host(),
            link_opener: app.link_opener(),
            profile: app.profile(),
            intersection_feed: app.intersection_feed(),
            host_bridges: app.host_bridges(),
            next_handle: Arc::new(AtomicU64::new(1)),
        }
    }

    #[must_use]
    pub fn catalog_source(&self) -> Arc<dyn CatalogSource> {
        Arc::clone(&self.catalog_source)
    }

    #[must_use]
    pub fn pacer(&self) -> Arc<dyn Pacer> {
        Arc::clone(&self.pacer)
    }

    #[must_use]
    pub fn preference_host(&self) -> ManualPreferenceHost {
        self.preference_host.clone()
    }

    #[must_use]
    pub fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.link_opener)
    }

    #[must_use]
    pub fn profile(&self) -> &ProfileData {
        &self.profile
    }

    #[must_use]
    pub fn intersection_feed(&self) -> IntersectionFeed {
        self.intersection_feed.clone()
    }

    #[must_use]
    pub fn host_bridges(&self) -> bool {
        self.host_bridges
    }

    /// Mint a handle for a newly mounted element. Never repeats.
    #[must_use]
    pub fn mint_handle(&self) -> ElementHandle {
        ElementHandle::new(self.next_handle.fetch_add(1, Ordering::Relaxed))
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
