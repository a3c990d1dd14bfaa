use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::spawn_forever;
use dioxus::document::eval;
use dioxus::prelude::*;
use portfolio_core::{ElementHandle, Preference, RevealPolicy, RevealSet};
use serde::{Deserialize, Serialize};
use services::{IntersectionEntry, IntersectionWatcher, ManualPreferenceHost, RevealObserver};
use tokio::sync::{broadcast, mpsc};

use super::scripts::{
    MEDIA_QUERY_TEARDOWN_SCRIPT, REVEAL_TEARDOWN_SCRIPT, media_query_bridge_script,
    reveal_bridge_script, reveal_dom_id,
};

#[derive(Clone, Debug, Deserialize)]
struct MediaQueryReport {
    key: String,
    value: bool,
}

#[derive(Clone, Copy, Debug, Deserialize)]
struct IntersectionReport {
    element: u64,
    ratio: f64,
    is_intersecting: bool,
}

impl From<IntersectionReport> for IntersectionEntry {
    fn from(report: IntersectionReport) -> Self {
        Self {
            element: ElementHandle::new(report.element),
            ratio: report.ratio,
            is_intersecting: report.is_intersecting,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum WatchCommand {
    Observe { element: u64, dom_id: String },
    Unobserve { element: u64 },
    Disconnect,
}

/// Queues watcher commands for the webview `IntersectionObserver`.
///
/// The observer in the page is configured once from the policy the bridge
/// script was built with.
struct ScriptIntersectionWatcher {
    commands: mpsc::UnboundedSender<WatchCommand>,
}

impl ScriptIntersectionWatcher {
    fn send(&self, command: WatchCommand) {
        if self.commands.send(command).is_err() {
            tracing::trace!("intersection bridge is not running");
        }
    }
}

impl IntersectionWatcher for ScriptIntersectionWatcher {
    fn observe(&self, element: ElementHandle, _policy: &RevealPolicy) {
        self.send(WatchCommand::Observe {
            element: element.value(),
            dom_id: reveal_dom_id(element),
        });
    }

    fn unobserve(&self, element: ElementHandle) {
        self.send(WatchCommand::Unobserve {
            element: element.value(),
        });
    }

    fn disconnect(&self) {
        self.send(WatchCommand::Disconnect);
    }
}

/// Visibility batches for the reveal tracking of mounted views.
///
/// With host bridges installed the webview `IntersectionObserver` reports
/// into it; other hosts report directly.
#[derive(Clone)]
pub struct IntersectionFeed {
    batches: broadcast::Sender<Vec<IntersectionEntry>>,
}

impl Default for IntersectionFeed {
    fn default() -> Self {
        let (batches, _) = broadcast::channel(256);
        Self { batches }
    }
}

impl IntersectionFeed {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one observer callback. Returns `false` if no view is tracking
    /// reveals.
    pub fn report(&self, batch: Vec<IntersectionEntry>) -> bool {
        if self.batches.send(batch).is_err() {
            tracing::trace!("no view is tracking reveals");
            return false;
        }
        true
    }

    fn listen(&self) -> broadcast::Receiver<Vec<IntersectionEntry>> {
        self.batches.subscribe()
    }
}

fn apply_media_reports(host: &ManualPreferenceHost, reports: Vec<MediaQueryReport>, initial: bool) {
    let values = reports
        .into_iter()
        .filter_map(|report| match Preference::from_key(&report.key) {
            Some(pref) => Some((pref, report.value)),
            None => {
                tracing::debug!(key = %report.key, "unknown preference report");
                None
            }
        })
        .collect::<Vec<_>>();
    if initial {
        host.report_initial(values);
    } else {
        for (pref, value) in values {
            host.report(pref, value);
        }
    }
}

/// Run a teardown script after the calling scope is gone.
fn run_teardown(script: &'static str) {
    spawn_forever(async move {
        if let Err(err) = eval(script).await {
            tracing::trace!(error = ?err, "teardown script did not finish");
        }
    });
}

/// Feed the page's media queries into `host` for as long as the calling
/// component is mounted.
///
/// The first message carries every query and marks the host as reported.
pub(super) fn use_media_query_bridge(host: ManualPreferenceHost, enabled: bool) {
    use_hook(move || {
        if !enabled {
            return;
        }
        spawn(async move {
            let mut bridge = eval(&media_query_bridge_script());
            let mut initial = true;
            loop {
                match bridge.recv::<Vec<MediaQueryReport>>().await {
                    Ok(reports) => {
                        apply_media_reports(&host, reports, initial);
                        initial = false;
                    }
                    Err(err) => {
                        tracing::debug!(error = ?err, "media query bridge closed");
                        break;
                    }
                }
            }
        });
    });
    use_drop(move || {
        if enabled {
            run_teardown(MEDIA_QUERY_TEARDOWN_SCRIPT);
        }
    });
}

/// Reveal tracking owned by the calling component.
///
/// Returns the observer cards register with and a signal mirroring its
/// revealed set. Batches arrive through `feed`.
pub(super) fn use_reveal_bridge(
    feed: IntersectionFeed,
    enabled: bool,
) -> (Arc<RevealObserver>, Signal<RevealSet>) {
    let (sender, receiver) = use_hook(|| {
        let (sender, receiver) = mpsc::unbounded_channel();
        (sender, Rc::new(RefCell::new(Some(receiver))))
    });
    let observer = use_hook(move || {
        let watcher: Arc<dyn IntersectionWatcher> = Arc::new(ScriptIntersectionWatcher {
            commands: sender,
        });
        Arc::new(RevealObserver::new(watcher))
    });
    let revealed = use_signal(RevealSet::new);

    let observer_for_feed = Arc::clone(&observer);
    let page_feed = feed.clone();
    use_hook(move || {
        let mut batches = feed.listen();
        let observer = observer_for_feed;
        let mut revealed = revealed;
        spawn(async move {
            loop {
                match batches.recv().await {
                    Ok(entries) => {
                        if !observer.on_intersection(&entries).is_empty() {
                            revealed.set(observer.revealed());
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "intersection batches dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });
    });

    let policy = observer.policy();
    use_hook(move || {
        let receiver = receiver.borrow_mut().take();
        let (true, Some(mut commands)) = (enabled, receiver) else {
            return;
        };
        let mut bridge = eval(&reveal_bridge_script(&policy));
        spawn(async move {
            while let Some(command) = commands.recv().await {
                if let Err(err) = bridge.send(command) {
                    tracing::debug!(error = ?err, "intersection bridge rejected command");
                    break;
                }
            }
        });
        spawn(async move {
            while let Ok(batch) = bridge.recv::<Vec<IntersectionReport>>().await {
                page_feed.report(batch.into_iter().map(IntersectionEntry::from).collect());
            }
        });
    });
    use_drop(move || {
        if enabled {
            run_teardown(REVEAL_TEARDOWN_SCRIPT);
        }
    });

    (observer, revealed)
}
