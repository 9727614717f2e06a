use thiserror::Error;

use crate::models::slot_state::SlotState;
use crate::stage_index::generator;

/// The only stage index format version this crate reads and writes.
pub const FORMAT_VERSION: &str = "1.0";

/// Marker text written into the version comment.
pub const TOOL_MARKER: &str = "v1.0 Decent Tools";

/// Prefix preceding the format version token.
pub(crate) const VERSION_PREFIX: &str = "<!-- v";

pub const PRODUCTION_VERSION_VAR: &str = "productionVersion";
pub const ROLLBACK_VERSION_VAR: &str = "rollbackVersion";
pub const STAGE_VERSION_VAR: &str = "stageVersion";

/// Raised when a document cannot be read in the supported format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StageIndexError {
    #[error("Failed to parse stage index format version.")]
    MissingFormatVersion,

    #[error("Unsupported stage index format version {0}.")]
    UnsupportedFormatVersion(String),
}

/// A stage index for one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageIndexDocument {
    pub format_version: String,
    pub app_name: String,
    pub state: SlotState,
}

impl StageIndexDocument {
    /// Create a document in the supported format.
    pub fn new(app_name: impl Into<String>, state: SlotState) -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            app_name: app_name.into(),
            state,
        }
    }

    /// Path browsers are redirected to: the staged build of the app.
    pub fn redirect_path(&self) -> String {
        redirect_path(&self.app_name, &self.state.stage_version)
    }

    pub fn render(&self) -> String {
        generator::render(
            &self.app_name,
            &self.state.stage_version,
            &self.state.production_version,
            &self.state.rollback_version,
        )
    }
}

pub fn redirect_path(app_name: &str, stage_version: &str) -> String {
    format!("/_{app_name}/{stage_version}/")
}
