use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadingError {
    #[error("progress cannot go from {from}% back to {to}%")]
    Regressed { from: u8, to: u8 },

    #[error("loading has already settled")]
    AlreadySettled,
}

/// Named steps of the staged loading sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadStage {
    Initializing,
    Connecting,
    Fetching,
    Processing,
    Finalizing,
    Ready,
    /// Remote catalog unavailable; demo content is being substituted.
    SampleData,
}

/// The five stages walked before the catalog request, in order.
pub const STAGED_WALK: [LoadStage; 5] = [
    LoadStage::Connecting,
    LoadStage::Fetching,
    LoadStage::Processing,
    LoadStage::Finalizing,
    LoadStage::Ready,
];

impl LoadStage {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Initializing => "Initializing...",
            Self::Connecting => "Connecting to server...",
            Self::Fetching => "Fetching learning data...",
            Self::Processing => "Processing certificates...",
            Self::Finalizing => "Finalizing portfolio...",
            Self::Ready => "Ready!",
            Self::SampleData => "Loading sample data...",
        }
    }

    /// Target progress for this stage. `SampleData` keeps whatever was reached.
    #[must_use]
    pub fn progress(self) -> Option<u8> {
        match self {
            Self::Initializing => Some(0),
            Self::Connecting => Some(20),
            Self::Fetching => Some(50),
            Self::Processing => Some(75),
            Self::Finalizing => Some(90),
            Self::Ready => Some(100),
            Self::SampleData => None,
        }
    }
}

/// Progress reported to the loading view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingState {
    is_loading: bool,
    progress: u8,
    stage: LoadStage,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self {
            is_loading: true,
            progress: 0,
            stage: LoadStage::Initializing,
        }
    }
}

impl LoadingState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    #[must_use]
    pub fn stage(&self) -> LoadStage {
        self.stage
    }

    #[must_use]
    pub fn stage_label(&self) -> &'static str {
        self.stage.label()
    }

    /// Move to `stage`, taking its progress if it has one.
    ///
    /// # Errors
    ///
    /// Returns `LoadingError::Regressed` if the stage would lower progress and
    /// `LoadingError::AlreadySettled` once loading has finished.
    pub fn advance(&mut self, stage: LoadStage) -> Result<(), LoadingError> {
        if !self.is_loading {
            return Err(LoadingError::AlreadySettled);
        }
        let progress = stage.progress().unwrap_or(self.progress);
        if progress < self.progress {
            return Err(LoadingError::Regressed {
                from: self.progress,
                to: progress,
            });
        }
        self.stage = stage;
        self.progress = progress;
        Ok(())
    }

    /// Clear `is_loading`. Valid once per cycle.
    ///
    /// # Errors
    ///
    /// Returns `LoadingError::AlreadySettled` on a second call.
    pub fn settle(&mut self) -> Result<(), LoadingError> {
        if !self.is_loading {
            return Err(LoadingError::AlreadySettled);
        }
        self.is_loading = false;
        Ok(())
    }
}

/// Where a load cycle is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Fallback,
}

impl LoadPhase {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Fallback)
    }
}
