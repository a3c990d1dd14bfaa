/// Host accessibility preferences the presentation adapts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preference {
    ReducedMotion,
    HighContrast,
}

impl Preference {
    pub const ALL: [Preference; 2] = [Preference::ReducedMotion, Preference::HighContrast];

    /// Media query the host evaluates for this preference.
    #[must_use]
    pub fn media_query(self) -> &'static str {
        match self {
            Self::ReducedMotion => "(prefers-reduced-motion: reduce)",
            Self::HighContrast => "(prefers-contrast: high)",
        }
    }

    /// Stable identifier used by host bridges.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::ReducedMotion => "reducedMotion",
            Self::HighContrast => "highContrast",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pref| pref.key() == key)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreferenceState {
    pub prefers_reduced_motion: bool,
    pub high_contrast: bool,
}

impl PreferenceState {
    #[must_use]
    pub fn get(&self, pref: Preference) -> bool {
        match pref {
            Preference::ReducedMotion => self.prefers_reduced_motion,
            Preference::HighContrast => self.high_contrast,
        }
    }

    /// Returns a copy with only `pref` changed.
    #[must_use]
    pub fn with(mut self, pref: Preference, value: bool) -> Self {
        match pref {
            Preference::ReducedMotion => self.prefers_reduced_motion = value,
            Preference::HighContrast => self.high_contrast = value,
        }
        self
    }
}
