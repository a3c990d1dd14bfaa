use std::sync::Arc;
use std::time::Duration;

use portfolio_core::model::CourseCatalog;
use portfolio_core::{MotionTimings, PreferenceState};
use services::LoaderSnapshot;

/// Visual extras that are switched on or off by the host preferences.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Affordances {
    /// 3D scene and floating particles behind the page.
    pub decoration: bool,
    /// Ripple and particle effects on course cards.
    pub hover_effects: bool,
    pub high_contrast: bool,
    pub animated: bool,
}

impl Affordances {
    #[must_use]
    pub fn from_preferences(prefs: PreferenceState) -> Self {
        let reduced = prefs.prefers_reduced_motion;
        let contrast = prefs.high_contrast;
        Self {
            decoration: !reduced && !contrast,
            hover_effects: !reduced,
            high_contrast: contrast,
            animated: !reduced,
        }
    }

    /// Extra class for containers that have a high-contrast variant.
    #[must_use]
    pub fn contrast_class(&self) -> &'static str {
        if self.high_contrast {
            "high-contrast-mode"
        } else {
            ""
        }
    }

    #[must_use]
    pub fn motion_class(&self) -> &'static str {
        if self.animated { "" } else { "motion-reduced" }
    }

    /// The same affordances without any decorative extras.
    #[must_use]
    pub fn plain(self) -> Self {
        Self {
            decoration: false,
            hover_effects: false,
            ..self
        }
    }
}

/// Which top-level view to render.
#[derive(Clone, Debug, PartialEq)]
pub enum Presentation {
    Loading {
        progress: u8,
        stage: &'static str,
        affordances: Affordances,
    },
    Content {
        catalog: Arc<CourseCatalog>,
        affordances: Affordances,
    },
}

impl Presentation {
    #[must_use]
    pub fn affordances(&self) -> Affordances {
        match self {
            Self::Loading { affordances, .. } | Self::Content { affordances, .. } => *affordances,
        }
    }

    /// Keep decoration off while the host preferences are still unknown.
    #[must_use]
    pub fn hold_decoration(self) -> Self {
        match self {
            Self::Loading {
                progress,
                stage,
                affordances,
            } => Self::Loading {
                progress,
                stage,
                affordances: affordances.plain(),
            },
            Self::Content {
                catalog,
                affordances,
            } => Self::Content {
                catalog,
                affordances: affordances.plain(),
            },
        }
    }
}

/// Pick the view for the current loader snapshot and preferences.
///
/// A settled snapshot always carries a catalog; if it somehow does not, the
/// demo catalog is shown rather than an error.
#[must_use]
pub fn present(snapshot: &LoaderSnapshot, prefs: PreferenceState) -> Presentation {
    let affordances = Affordances::from_preferences(prefs);
    if snapshot.loading.is_loading() {
        return Presentation::Loading {
            progress: snapshot.loading.progress(),
            stage: snapshot.loading.stage_label(),
            affordances,
        };
    }
    let catalog = snapshot
        .catalog
        .clone()
        .unwrap_or_else(|| Arc::new(CourseCatalog::demo()));
    Presentation::Content {
        catalog,
        affordances,
    }
}

/// Text announced by the polite live region on the loading view.
#[must_use]
pub fn loading_announcement(stage: &str, progress: u8) -> String {
    format!("{stage} {progress}% complete")
}

/// What a click on a course card does.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardClickPlan {
    /// Wait before navigating so the ripple can render.
    pub delay: Duration,
    pub ripple: bool,
    pub url: String,
}

#[must_use]
pub fn plan_card_click(certificate_link: &str, prefs: PreferenceState) -> CardClickPlan {
    let timings = MotionTimings::for_preferences(prefs.prefers_reduced_motion);
    CardClickPlan {
        delay: timings.navigation,
        ripple: !prefs.prefers_reduced_motion,
        url: certificate_link.to_string(),
    }
}
