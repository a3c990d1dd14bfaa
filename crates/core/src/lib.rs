#![forbid(unsafe_code)]

pub mod error;
pub mod loading;
pub mod model;
pub mod preferences;
pub mod reveal;
pub mod time;

pub use error::Error;
pub use loading::{LoadPhase, LoadStage, LoadingError, LoadingState, STAGED_WALK};
pub use preferences::{Preference, PreferenceState};
pub use reveal::{ElementHandle, RevealPolicy, RevealSet};
pub use time::{Clock, MotionTimings};
