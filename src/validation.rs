//! Validation of identifiers that end up in URLs and generated HTML.

use crate::error::ExpectedError;

/// Maximum allowed length for app names.
pub const MAX_APP_NAME_LENGTH: usize = 128;

/// Validates that an app name is safe to embed in URL paths and the stage index.
///
/// An app name is valid if:
/// - It is not empty
/// - It is no longer than MAX_APP_NAME_LENGTH characters
/// - It contains only ASCII alphanumerics, dashes, underscores and dots
/// - It is not `.` or `..`
///
/// # Examples
///
/// ```
/// use decent_rollback::validation::validate_app_name;
///
/// assert!(validate_app_name("widgets").is_ok());
/// assert!(validate_app_name("my-app_2.0").is_ok());
/// assert!(validate_app_name("").is_err());
/// assert!(validate_app_name("../admin").is_err());
/// ```
pub fn validate_app_name(app_name: &str) -> Result<(), ExpectedError> {
    if app_name.is_empty() {
        return Err(ExpectedError::new("App name cannot be empty."));
    }

    if app_name.len() > MAX_APP_NAME_LENGTH {
        return Err(ExpectedError::new(format!(
            "App name too long: {} characters (max {MAX_APP_NAME_LENGTH}).",
            app_name.len()
        )));
    }

    let valid_chars = app_name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if !valid_chars {
        return Err(ExpectedError::new(format!(
            "App name '{app_name}' contains invalid characters. Use only alphanumeric characters, dashes (-), underscores (_), and dots (.)."
        )));
    }

    if app_name == "." || app_name == ".." {
        return Err(ExpectedError::new(format!(
            "App name '{app_name}' is not allowed."
        )));
    }

    Ok(())
}

/// Clap value parser for app name arguments.
pub fn clap_app_name_validator(s: &str) -> Result<String, String> {
    validate_app_name(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}
