use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use portfolio_core::{ElementHandle, RevealPolicy, RevealSet};

/// One visibility report from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub element: ElementHandle,
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// Host capability that reports when elements cross the viewport.
pub trait IntersectionWatcher: Send + Sync {
    fn observe(&self, element: ElementHandle, policy: &RevealPolicy);
    fn unobserve(&self, element: ElementHandle);
    fn disconnect(&self);
}

struct RevealInner {
    targets: HashMap<ElementHandle, usize>,
    revealed: RevealSet,
    connected: bool,
}

/// One-shot, per-index reveal driven by viewport intersection.
///
/// Element handles map to item indices through a side table owned here; the
/// host only ever sees handles.
pub struct RevealObserver {
    watcher: Arc<dyn IntersectionWatcher>,
    policy: RevealPolicy,
    inner: Mutex<RevealInner>,
}

impl RevealObserver {
    #[must_use]
    pub fn new(watcher: Arc<dyn IntersectionWatcher>) -> Self {
        Self::with_policy(watcher, RevealPolicy::default())
    }

    #[must_use]
    pub fn with_policy(watcher: Arc<dyn IntersectionWatcher>, policy: RevealPolicy) -> Self {
        Self {
            watcher,
            policy,
            inner: Mutex::new(RevealInner {
                targets: HashMap::new(),
                revealed: RevealSet::new(),
                connected: true,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RevealInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn policy(&self) -> RevealPolicy {
        self.policy
    }

    /// Start watching `element` on behalf of `index`.
    ///
    /// `None` (element not mounted yet) is a no-op, as is registering an index
    /// that is already revealed.
    pub fn register(&self, element: Option<ElementHandle>, index: usize) {
        let Some(element) = element else {
            return;
        };
        {
            let mut inner = self.lock();
            if !inner.connected || inner.revealed.contains(index) {
                return;
            }
            if inner.targets.insert(element, index) == Some(index) {
                return;
            }
        }
        self.watcher.observe(element, &self.policy);
    }

    /// Apply a batch of host reports. Returns the indices revealed by it.
    pub fn on_intersection(&self, entries: &[IntersectionEntry]) -> Vec<usize> {
        let mut newly_revealed = Vec::new();
        let mut finished = Vec::new();
        {
            let mut inner = self.lock();
            if !inner.connected {
                return newly_revealed;
            }
            for entry in entries {
                if !self.policy.admits(entry.ratio, entry.is_intersecting) {
                    continue;
                }
                let Some(index) = inner.targets.remove(&entry.element) else {
                    continue;
                };
                if inner.revealed.insert(index) {
                    newly_revealed.push(index);
                }
                finished.push(entry.element);
            }
        }
        for element in finished {
            self.watcher.unobserve(element);
        }
        if !newly_revealed.is_empty() {
            tracing::debug!(indices = ?newly_revealed, "revealed");
        }
        newly_revealed
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.lock().revealed.contains(index)
    }

    #[must_use]
    pub fn revealed(&self) -> RevealSet {
        self.lock().revealed.clone()
    }

    #[must_use]
    pub fn watched_count(&self) -> usize {
        self.lock().targets.len()
    }

    /// Disconnect the watcher and stop tracking. Returns `false` if already done.
    pub fn teardown(&self) -> bool {
        {
            let mut inner = self.lock();
            if !inner.connected {
                return false;
            }
            inner.connected = false;
            inner.targets.clear();
        }
        self.watcher.disconnect();
        true
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeWatcher {
        calls: Mutex<Vec<String>>,
    }

    impl FakeWatcher {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl IntersectionWatcher for FakeWatcher {
        fn observe(&self, element: ElementHandle, policy: &RevealPolicy) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("observe {element} {}", policy.root_margin()));
        }

        fn unobserve(&self, element: ElementHandle) {
            self.calls.lock().unwrap().push(format!("unobserve {element}"));
        }

        fn disconnect(&self) {
            self.calls.lock().unwrap().push("disconnect".into());
        }
    }

    fn visible(element: ElementHandle) -> IntersectionEntry {
        IntersectionEntry {
            element,
            ratio: 0.5,
            is_intersecting: true,
        }
    }

    fn setup() -> (Arc<FakeWatcher>, RevealObserver) {
        let watcher = Arc::new(FakeWatcher::default());
        let observer = RevealObserver::new(Arc::clone(&watcher) as Arc<dyn IntersectionWatcher>);
        (watcher, observer)
    }

    #[test]
    fn intersection_reveals_registered_index() {
        let (watcher, observer) = setup();
        let element_a = ElementHandle::new(7);
        observer.register(Some(element_a), 2);

        assert_eq!(observer.on_intersection(&[visible(element_a)]), vec![2]);
        assert!(observer.is_revealed(2));
        assert!(!observer.is_revealed(0));
        assert_eq!(
            watcher.calls(),
            vec!["observe 7 0px 0px -50px 0px", "unobserve 7"]
        );
    }

    #[test]
    fn missing_element_is_ignored() {
        let (watcher, observer) = setup();
        observer.register(None, 0);
        assert!(watcher.calls().is_empty());
        assert_eq!(observer.watched_count(), 0);
    }

    #[test]
    fn below_threshold_does_not_reveal() {
        let (_watcher, observer) = setup();
        let element = ElementHandle::new(1);
        observer.register(Some(element), 0);
        let entry = IntersectionEntry {
            element,
            ratio: 0.1,
            is_intersecting: true,
        };
        assert!(observer.on_intersection(&[entry]).is_empty());
        assert!(!observer.is_revealed(0));
        assert_eq!(observer.watched_count(), 1);
    }

    #[test]
    fn reveal_is_one_shot_across_reregistration() {
        let (watcher, observer) = setup();
        let first = ElementHandle::new(1);
        observer.register(Some(first), 3);
        observer.on_intersection(&[visible(first)]);

        let remounted = ElementHandle::new(2);
        observer.register(Some(remounted), 3);
        observer.register(Some(first), 3);
        assert!(observer.is_revealed(3));
        assert_eq!(observer.watched_count(), 0);
        assert_eq!(watcher.calls().len(), 2);

        assert!(observer.on_intersection(&[visible(first)]).is_empty());
        assert!(observer.is_revealed(3));
    }

    #[test]
    fn duplicate_registration_observes_once() {
        let (watcher, observer) = setup();
        let element = ElementHandle::new(4);
        observer.register(Some(element), 1);
        observer.register(Some(element), 1);
        assert_eq!(watcher.calls(), vec!["observe 4 0px 0px -50px 0px"]);
    }

    #[test]
    fn out_of_order_reveals_are_accepted() {
        let (_watcher, observer) = setup();
        let handles: Vec<_> = (0..6).map(ElementHandle::new).collect();
        for (index, handle) in handles.iter().enumerate() {
            observer.register(Some(*handle), index);
        }
        assert_eq!(observer.on_intersection(&[visible(handles[5])]), vec![5]);
        assert_eq!(
            observer.on_intersection(&[visible(handles[2]), visible(handles[2])]),
            vec![2]
        );
        assert_eq!(observer.revealed().iter().collect::<Vec<_>>(), vec![2, 5]);
    }

    #[test]
    fn teardown_disconnects_and_ignores_later_events() {
        let (watcher, observer) = setup();
        let element = ElementHandle::new(9);
        observer.register(Some(element), 0);

        assert!(observer.teardown());
        assert!(!observer.teardown());
        assert!(observer.on_intersection(&[visible(element)]).is_empty());
        observer.register(Some(ElementHandle::new(10)), 1);

        assert!(!observer.is_revealed(0));
        assert_eq!(
            watcher.calls(),
            vec!["observe 9 0px 0px -50px 0px", "disconnect"]
        );
    }

    #[test]
    fn drop_disconnects() {
        let (watcher, observer) = setup();
        drop(observer);
        assert_eq!(watcher.calls(), vec!["disconnect"]);
    }
}
