use std::collections::BTreeSet;
use std::fmt;

/// Opaque identifier for a rendered element, minted by the view layer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(u64);

impl ElementHandle {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementHandle({})", self.0)
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// When an observed element counts as seen.
///
/// The viewport's bottom edge is pulled in by `bottom_margin_px`, so an element
/// reveals slightly before it fully arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealPolicy {
    pub threshold: f64,
    pub bottom_margin_px: u32,
}

impl Default for RevealPolicy {
    fn default() -> Self {
        Self {
            threshold: 0.2,
            bottom_margin_px: 50,
        }
    }
}

impl RevealPolicy {
    /// CSS margin string in `top right bottom left` order.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.bottom_margin_px)
    }

    #[must_use]
    pub fn admits(&self, ratio: f64, intersecting: bool) -> bool {
        intersecting && ratio >= self.threshold
    }
}

/// Indices that have been revealed. Grows only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealSet(BTreeSet<usize>);

impl RevealSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `index` was not revealed before.
    pub fn insert(&mut self, index: usize) -> bool {
        self.0.insert(index)
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}
