use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use portfolio_core::{PreferenceState, RevealSet};
use services::{DataLoader, PreferenceMonitor, RevealObserver};
use tokio::sync::mpsc;

use crate::context::AppContext;
use crate::vm::{Presentation, present};

use super::bridge::{use_media_query_bridge, use_reveal_bridge};
use super::content::ContentView;
use super::loading::LoadingView;

/// How long the first load waits for the host to report its preferences.
const HOST_REPORT_WAIT: Duration = Duration::from_millis(250);

/// Per-mount state shared with the cards below the adapter.
#[derive(Clone)]
pub(crate) struct PresentationScope {
    pub observer: Arc<RevealObserver>,
    pub revealed: Signal<RevealSet>,
    pub prefs: Signal<PreferenceState>,
}

/// Composes preferences, reveal tracking and the staged loader into the
/// loading view or the content view.
///
/// The load cycle starts once the host has reported its preferences, or
/// after a short wait with unreported ones read as unsupported. Decoration
/// stays off until then.
///
/// Everything acquired here is released when the view unmounts.
#[component]
pub fn PortfolioView() -> Element {
    let ctx = use_context::<AppContext>();
    let host = ctx.preference_host();
    let bridges = ctx.host_bridges();

    use_media_query_bridge(host.clone(), bridges);

    let host_for_monitor = host.clone();
    let monitor =
        use_hook(move || Arc::new(PreferenceMonitor::initialize(Arc::new(host_for_monitor))));
    let prefs = use_signal(|| monitor.state());
    let host_ready = use_signal(|| host.is_reported());
    let monitor_for_updates = Arc::clone(&monitor);
    use_hook(move || {
        let (changes, mut received) = mpsc::unbounded_channel();
        monitor_for_updates.subscribe(move |pref, value| {
            if changes.send((pref, value)).is_err() {
                tracing::trace!(preference = pref.key(), "portfolio view is gone");
            }
        });
        let mut prefs = prefs;
        spawn(async move {
            while let Some((pref, value)) = received.recv().await {
                prefs.with_mut(|state| *state = state.with(pref, value));
            }
        });
    });

    let (observer, revealed) = use_reveal_bridge(ctx.intersection_feed(), bridges);

    let loader = use_hook(|| Arc::new(DataLoader::new(ctx.catalog_source(), ctx.pacer())));
    let snapshot = use_signal(|| loader.snapshot());
    let loader_for_run = Arc::clone(&loader);
    let monitor_for_run = Arc::clone(&monitor);
    use_hook(move || {
        let mut published = loader_for_run.subscribe();
        let mut snapshot = snapshot;
        spawn(async move {
            while published.changed().await.is_ok() {
                let next = published.borrow_and_update().clone();
                snapshot.set(next);
            }
        });
        let mut host_ready = host_ready;
        spawn(async move {
            if !host.wait_until_reported(HOST_REPORT_WAIT).await {
                tracing::debug!("host preferences not reported; treating them as unsupported");
            }
            host_ready.set(true);
            let reduced = monitor_for_run.state().prefers_reduced_motion;
            match loader_for_run.fetch(reduced).await {
                Ok(outcome) => {
                    if let Some(reason) = outcome.degraded {
                        tracing::info!(reason = %reason, "showing demo catalog");
                    }
                }
                Err(err) => tracing::debug!(error = %err, "load cycle ended early"),
            }
        });
    });

    let teardown_loader = Arc::clone(&loader);
    let teardown_monitor = Arc::clone(&monitor);
    let teardown_observer = Arc::clone(&observer);
    use_drop(move || {
        teardown_loader.dispose();
        teardown_monitor.teardown();
        teardown_observer.teardown();
    });

    use_context_provider(|| PresentationScope {
        observer: Arc::clone(&observer),
        revealed,
        prefs,
    });

    let mut presentation = present(&snapshot.read(), prefs());
    if !host_ready() {
        presentation = presentation.hold_decoration();
    }
    let root_class = format!(
        "portfolio-root {}",
        presentation.affordances().contrast_class()
    );

    rsx! {
        div { class: "{root_class}",
            match presentation {
                Presentation::Loading { progress, stage, affordances } => rsx! {
                    LoadingView { progress, stage: stage.to_string(), affordances }
                },
                Presentation::Content { catalog, affordances } => rsx! {
                    ContentView { catalog, affordances }
                },
            }
        }
    }
}
