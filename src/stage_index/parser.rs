use tracing::debug;

use crate::models::slot_state::SlotState;
use crate::stage_index::format::{
    StageIndexDocument, StageIndexError, FORMAT_VERSION, PRODUCTION_VERSION_VAR,
    ROLLBACK_VERSION_VAR, STAGE_VERSION_VAR, VERSION_PREFIX,
};

const TITLE_PREFIX: &str = "<title>Stage Index for ";
const TITLE_SUFFIX: &str = "</title>";

/// Find the format version token of a stage index.
///
/// The token follows the first `<!-- v` and runs up to the next space.
/// Returns `None` if the marker or its terminating space is missing.
pub fn parse_format_version(text: &str) -> Option<&str> {
    let start = text.find(VERSION_PREFIX)? + VERSION_PREFIX.len();
    let len = text[start..].find(' ')?;
    Some(&text[start..start + len])
}

/// Find the value assigned to a single-quoted script variable.
///
/// Matches the first ` {name}='` and reads up to the next `'`.
/// Returns `None` if the variable or its closing quote is missing.
pub fn parse_variable<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    let prefix = format!(" {name}='");
    let start = text.find(&prefix)? + prefix.len();
    let len = text[start..].find('\'')?;
    Some(&text[start..start + len])
}

/// Ensure the document is written in the supported format.
///
/// # Errors
///
/// Returns [`StageIndexError::MissingFormatVersion`] when no version marker is
/// found and [`StageIndexError::UnsupportedFormatVersion`] when it names any
/// version other than [`FORMAT_VERSION`].
pub fn require_supported_format(text: &str) -> Result<&str, StageIndexError> {
    let version = parse_format_version(text).ok_or(StageIndexError::MissingFormatVersion)?;
    if version != FORMAT_VERSION {
        return Err(StageIndexError::UnsupportedFormatVersion(version.to_string()));
    }
    Ok(version)
}

/// Read the three slot values, treating each missing variable as unset.
pub fn extract_state(text: &str) -> SlotState {
    let lookup = |name: &str| {
        parse_variable(text, name).map(str::to_string).unwrap_or_else(|| {
            debug!(variable = name, "stage index variable not found");
            String::new()
        })
    };

    SlotState {
        stage_version: lookup(STAGE_VERSION_VAR),
        production_version: lookup(PRODUCTION_VERSION_VAR),
        rollback_version: lookup(ROLLBACK_VERSION_VAR),
    }
}

/// Parse a whole stage index after checking its format version.
///
/// The app name comes from the page title and is empty if the title is missing.
pub fn parse_document(text: &str) -> Result<StageIndexDocument, StageIndexError> {
    let format_version = require_supported_format(text)?.to_string();
    Ok(StageIndexDocument {
        format_version,
        app_name: parse_app_name(text).unwrap_or_default().to_string(),
        state: extract_state(text),
    })
}

fn parse_app_name(text: &str) -> Option<&str> {
    let start = text.find(TITLE_PREFIX)? + TITLE_PREFIX.len();
    let len = text[start..].find(TITLE_SUFFIX)?;
    Some(&text[start..start + len])
}
