use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use portfolio_core::{Preference, PreferenceState};
use tokio::sync::watch;

pub type PreferenceListener = Arc<dyn Fn(bool) + Send + Sync>;

/// Registration with a host; released when dropped.
pub struct HostSubscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl HostSubscription {
    #[must_use]
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// A subscription with nothing to release.
    #[must_use]
    pub fn detached() -> Self {
        Self { release: None }
    }
}

impl Drop for HostSubscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

/// Where preference values come from.
pub trait PreferenceHost: Send + Sync {
    /// Current value, or `None` if the host cannot evaluate the query.
    fn query(&self, pref: Preference) -> Option<bool>;

    /// Call `listener` whenever `pref` changes.
    fn watch(&self, pref: Preference, listener: PreferenceListener) -> HostSubscription;
}

/// Live, read-only view of the host's accessibility preferences.
pub struct PreferenceMonitor {
    host: Arc<dyn PreferenceHost>,
    state: Arc<Mutex<PreferenceState>>,
    active: Arc<AtomicBool>,
    subscriptions: Mutex<Vec<HostSubscription>>,
}

impl PreferenceMonitor {
    /// Read both preferences from `host`. Unsupported queries read as `false`.
    #[must_use]
    pub fn initialize(host: Arc<dyn PreferenceHost>) -> Self {
        let state = Preference::ALL
            .into_iter()
            .fold(PreferenceState::default(), |state, pref| {
                state.with(pref, host.query(pref).unwrap_or(false))
            });

        Self {
            host,
            state: Arc::new(Mutex::new(state)),
            active: Arc::new(AtomicBool::new(true)),
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn state(&self) -> PreferenceState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Register `on_change` for both preferences.
    ///
    /// Each preference gets its own host listener, and a change only rewrites
    /// that preference's field. Does nothing after `teardown`.
    pub fn subscribe(&self, on_change: impl Fn(Preference, bool) + Send + Sync + 'static) {
        if !self.is_active() {
            return;
        }
        let on_change = Arc::new(on_change);
        let mut subscriptions = self
            .subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        for pref in Preference::ALL {
            let state = Arc::clone(&self.state);
            let active = Arc::clone(&self.active);
            let on_change = Arc::clone(&on_change);
            let listener: PreferenceListener = Arc::new(move |value| {
                if !active.load(Ordering::Acquire) {
                    return;
                }
                {
                    let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
                    *guard = guard.with(pref, value);
                }
                tracing::debug!(preference = pref.key(), value, "preference changed");
                on_change(pref, value);
            });
            subscriptions.push(self.host.watch(pref, listener));
        }
    }

    /// Release every host listener. Returns `false` if already torn down.
    pub fn teardown(&self) -> bool {
        if !self.active.swap(false, Ordering::AcqRel) {
            return false;
        }
        let released = std::mem::take(
            &mut *self
                .subscriptions
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        drop(released);
        true
    }
}

impl Drop for PreferenceMonitor {
    fn drop(&mut self) {
        self.teardown();
    }
}

//
// ─── MANUAL HOST ───────────────────────────────────────────────────────────────
//

#[derive(Default)]
struct ManualHostInner {
    values: HashMap<Preference, bool>,
    pinned: HashSet<Preference>,
    listeners: Vec<(u64, Preference, PreferenceListener)>,
    next_id: u64,
}

/// In-process host whose values are pushed in by the caller.
///
/// Used by the webview media-query bridge, by command-line overrides
/// (`pin`) and by tests.
///
/// The host counts as reported once every preference has a value or the
/// environment has delivered its initial report (`report_initial`).
#[derive(Clone)]
pub struct ManualPreferenceHost {
    inner: Arc<Mutex<ManualHostInner>>,
    reported: Arc<watch::Sender<bool>>,
}

impl Default for ManualPreferenceHost {
    fn default() -> Self {
        let (reported, _) = watch::channel(false);
        Self {
            inner: Arc::default(),
            reported: Arc::new(reported),
        }
    }
}

impl ManualPreferenceHost {
    /// A host that supports neither query until a value is reported.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_state(state: PreferenceState) -> Self {
        let host = Self::new();
        {
            let mut inner = host.lock();
            for pref in Preference::ALL {
                inner.values.insert(pref, state.get(pref));
            }
        }
        host.mark_reported();
        host
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualHostInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a value from the host environment and notify listeners on change.
    ///
    /// Ignored for pinned preferences.
    pub fn report(&self, pref: Preference, value: bool) {
        let (listeners, complete): (Vec<PreferenceListener>, bool) = {
            let mut inner = self.lock();
            if inner.pinned.contains(&pref) {
                return;
            }
            if inner.values.insert(pref, value) == Some(value) {
                return;
            }
            let listeners = inner
                .listeners
                .iter()
                .filter(|(_, watched, _)| *watched == pref)
                .map(|(_, _, listener)| Arc::clone(listener))
                .collect();
            (listeners, inner.values.len() == Preference::ALL.len())
        };
        if complete {
            self.mark_reported();
        }
        for listener in listeners {
            listener(value);
        }
    }

    /// Apply the environment's first report. Preferences missing from
    /// `values` stay unsupported; the host counts as reported either way.
    pub fn report_initial(&self, values: impl IntoIterator<Item = (Preference, bool)>) {
        for (pref, value) in values {
            self.report(pref, value);
        }
        self.mark_reported();
    }

    #[must_use]
    pub fn is_reported(&self) -> bool {
        *self.reported.borrow()
    }

    /// Wait at most `limit` for the host to report.
    ///
    /// Returns `false` on timeout; unreported preferences then read as
    /// unsupported.
    pub async fn wait_until_reported(&self, limit: Duration) -> bool {
        let mut reported = self.reported.subscribe();
        matches!(
            tokio::time::timeout(limit, reported.wait_for(|reported| *reported)).await,
            Ok(Ok(_))
        )
    }

    fn mark_reported(&self) {
        self.reported
            .send_if_modified(|reported| !std::mem::replace(reported, true));
    }

    /// Force `pref` to `value`; later reports for it are ignored.
    pub fn pin(&self, pref: Preference, value: bool) {
        self.report(pref, value);
        self.lock().pinned.insert(pref);
    }

    #[must_use]
    pub fn is_pinned(&self, pref: Preference) -> bool {
        self.lock().pinned.contains(&pref)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }
}

impl PreferenceHost for ManualPreferenceHost {
    fn query(&self, pref: Preference) -> Option<bool> {
        self.lock().values.get(&pref).copied()
    }

    fn watch(&self, pref: Preference, listener: PreferenceListener) -> HostSubscription {
        let id = {
            let mut inner = self.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, pref, listener));
            id
        };
        let inner = Arc::downgrade(&self.inner);
        HostSubscription::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .listeners
                    .retain(|(listener_id, _, _)| *listener_id != id);
            }
        })
    }
}
