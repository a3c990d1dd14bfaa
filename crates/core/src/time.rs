use std::time::Duration;

use chrono::{DateTime, Utc};

/// Wall clock used to stamp settled load cycles.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Delays that depend on the reduced-motion preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionTimings {
    /// Pause after each loading stage is published.
    pub stage: Duration,
    /// Pause before `is_loading` clears.
    pub final_settle: Duration,
    /// Pause between a card click and navigation, so the ripple can render.
    pub navigation: Duration,
    /// Extra reveal animation delay per card index.
    pub reveal_stagger: Duration,
}

impl MotionTimings {
    pub const NORMAL: Self = Self {
        stage: Duration::from_millis(400),
        final_settle: Duration::from_millis(600),
        navigation: Duration::from_millis(100),
        reveal_stagger: Duration::from_millis(150),
    };

    pub const REDUCED: Self = Self {
        stage: Duration::from_millis(100),
        final_settle: Duration::from_millis(100),
        navigation: Duration::ZERO,
        reveal_stagger: Duration::ZERO,
    };

    #[must_use]
    pub fn for_preferences(prefers_reduced_motion: bool) -> Self {
        if prefers_reduced_motion {
            Self::REDUCED
        } else {
            Self::NORMAL
        }
    }

    /// Total suspension of one load cycle walking `stages` stages.
    #[must_use]
    pub fn cycle_total(&self, stages: u32) -> Duration {
        self.stage * stages + self.final_settle
    }
}
