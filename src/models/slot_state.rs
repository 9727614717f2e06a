use std::fmt;
use thiserror::Error;

/// The three tracked version slots of one application.
///
/// Versions are opaque tokens. An empty string means the slot is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotState {
    pub stage_version: String,
    pub production_version: String,
    pub rollback_version: String,
}

/// Why a rollback cannot be performed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("no rollback version is set")]
    RollbackUnset,

    #[error("rollback version {0} is already in production")]
    RollbackIsProduction(String),
}

impl SlotState {
    pub fn new(
        stage_version: impl Into<String>,
        production_version: impl Into<String>,
        rollback_version: impl Into<String>,
    ) -> Self {
        Self {
            stage_version: stage_version.into(),
            production_version: production_version.into(),
            rollback_version: rollback_version.into(),
        }
    }

    /// State used when no readable stage index exists.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.stage_version.is_empty()
            && self.production_version.is_empty()
            && self.rollback_version.is_empty()
    }

    /// Check the rollback precondition without performing the transition.
    pub fn check_rollback(&self) -> Result<(), TransitionError> {
        if self.rollback_version.is_empty() {
            return Err(TransitionError::RollbackUnset);
        }
        if self.rollback_version == self.production_version {
            return Err(TransitionError::RollbackIsProduction(
                self.rollback_version.clone(),
            ));
        }
        Ok(())
    }

    pub fn can_roll_back(&self) -> bool {
        self.check_rollback().is_ok()
    }

    /// Compute the state after rolling production back.
    ///
    /// Production takes the rollback version and the rollback slot is cleared.
    /// Staging is untouched.
    pub fn rollback(&self) -> Result<SlotState, TransitionError> {
        self.check_rollback()?;
        Ok(SlotState {
            stage_version: self.stage_version.clone(),
            production_version: self.rollback_version.clone(),
            rollback_version: String::new(),
        })
    }
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stage version={}, production version={}, rollback version={}",
            self.stage_version, self.production_version, self.rollback_version
        )
    }
}
