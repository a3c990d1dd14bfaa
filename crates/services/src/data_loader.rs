use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use portfolio_core::model::CourseCatalog;
use portfolio_core::{Clock, LoadPhase, LoadStage, LoadingState, MotionTimings, STAGED_WALK};
use tokio::sync::watch;

use crate::catalog_source::CatalogSource;
use crate::error::{CatalogFetchError, LoaderError};
use crate::pacing::Pacer;

/// Called with the failure whenever the demo catalog is substituted.
pub type FallbackHook = Arc<dyn Fn(&CatalogFetchError) + Send + Sync>;

/// What the loader currently publishes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoaderSnapshot {
    pub phase: LoadPhase,
    pub loading: LoadingState,
    pub catalog: Option<Arc<CourseCatalog>>,
}

/// Result of a settled load cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub catalog: Arc<CourseCatalog>,
    pub phase: LoadPhase,
    pub final_state: LoadingState,
    /// Why the demo catalog was used, if it was.
    pub degraded: Option<String>,
    pub settled_at: DateTime<Utc>,
}

impl LoadOutcome {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.phase == LoadPhase::Fallback
    }
}

/// Staged catalog loading with simulated progress and a demo fallback.
pub struct DataLoader {
    source: Arc<dyn CatalogSource>,
    pacer: Arc<dyn Pacer>,
    clock: Clock,
    fallback_hook: Option<FallbackHook>,
    state: watch::Sender<LoaderSnapshot>,
    started: AtomicBool,
    disposed: AtomicBool,
}

impl DataLoader {
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>, pacer: Arc<dyn Pacer>) -> Self {
        let (state, _) = watch::channel(LoaderSnapshot::default());
        Self {
            source,
            pacer,
            clock: Clock::system(),
            fallback_hook: None,
            state,
            started: AtomicBool::new(false),
            disposed: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_fallback_hook(mut self, hook: FallbackHook) -> Self {
        self.fallback_hook = Some(hook);
        self
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoaderSnapshot> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> LoaderSnapshot {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Stop publishing. A running `fetch` ends with `LoaderError::Disposed`
    /// at its next step. Returns `false` if already disposed.
    pub fn dispose(&self) -> bool {
        !self.disposed.swap(true, Ordering::AcqRel)
    }

    /// Run the load cycle once.
    ///
    /// Walks the five stages, requests the catalog, substitutes the demo
    /// catalog on any failure, then waits the settle delay before clearing
    /// `is_loading`.
    ///
    /// # Errors
    ///
    /// Returns `LoaderError::AlreadyStarted` on a second call and
    /// `LoaderError::Disposed` if the loader was disposed before it settled.
    pub async fn fetch(&self, prefers_reduced_motion: bool) -> Result<LoadOutcome, LoaderError> {
        if self.is_disposed() {
            return Err(LoaderError::Disposed);
        }
        if self.started.swap(true, Ordering::AcqRel) {
            return Err(LoaderError::AlreadyStarted);
        }

        let timings = MotionTimings::for_preferences(prefers_reduced_motion);
        self.publish(|snapshot| snapshot.phase = LoadPhase::Loading)?;

        for stage in STAGED_WALK {
            self.advance(stage)?;
            self.pacer.pause(timings.stage).await;
        }

        let (catalog, phase, degraded) = match self.source.fetch_catalog().await {
            Ok(catalog) => (Arc::new(catalog), LoadPhase::Ready, None),
            Err(err) => {
                tracing::warn!(error = %err, "catalog fetch failed; showing demo catalog");
                if let Some(hook) = &self.fallback_hook {
                    hook(&err);
                }
                self.advance(LoadStage::SampleData)?;
                (
                    Arc::new(CourseCatalog::demo()),
                    LoadPhase::Fallback,
                    Some(err.to_string()),
                )
            }
        };

        self.publish(|snapshot| {
            snapshot.phase = phase;
            snapshot.catalog = Some(Arc::clone(&catalog));
        })?;

        self.pacer.pause(timings.final_settle).await;

        let settled = self.publish(|snapshot| {
            if let Err(err) = snapshot.loading.settle() {
                tracing::error!(error = %err, "loading settled twice");
            }
        })?;

        tracing::info!(
            phase = ?phase,
            items = catalog.items().len(),
            "catalog loaded"
        );

        Ok(LoadOutcome {
            catalog,
            phase,
            final_state: settled.loading,
            degraded,
            settled_at: self.clock.now(),
        })
    }

    fn advance(&self, stage: LoadStage) -> Result<LoaderSnapshot, LoaderError> {
        let snapshot = self.publish(|snapshot| {
            if let Err(err) = snapshot.loading.advance(stage) {
                tracing::error!(error = %err, stage = stage.label(), "stage out of order");
            }
        })?;
        tracing::debug!(
            stage = snapshot.loading.stage_label(),
            progress = snapshot.loading.progress(),
            "loading stage"
        );
        Ok(snapshot)
    }

    fn publish(
        &self,
        update: impl FnOnce(&mut LoaderSnapshot),
    ) -> Result<LoaderSnapshot, LoaderError> {
        if self.is_disposed() {
            return Err(LoaderError::Disposed);
        }
        self.state.send_modify(update);
        Ok(self.state.borrow().clone())
    }
}
