//! Action inputs collected from the process environment.
//!
//! GitHub Actions passes `with:` inputs as `INPUT_<NAME>` variables, where the
//! name is upper-cased and spaces become underscores. Dashes are kept, so the
//! `api-key` input arrives as `INPUT_API-KEY`.

use anyhow::Result;
use std::collections::HashMap;
use std::fmt;

use crate::error::ExpectedError;
use crate::report::Reporter;
use crate::validation::validate_app_name;

pub const REPO_OWNER_VAR: &str = "GITHUB_REPOSITORY_OWNER";
pub const GITHUB_ACTIONS_VAR: &str = "GITHUB_ACTIONS";

pub const API_KEY_INPUT: &str = "api-key";
pub const APP_NAME_INPUT: &str = "app-name";

/// Source of environment variables.
pub trait Environment {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Environment for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Environment variable carrying the named action input.
pub fn input_key(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Read an action input, returning an empty string when it is not set.
///
/// # Errors
///
/// Returns an [`ExpectedError`] when `required` is set and the input is
/// missing or empty.
pub fn get_input(env: &dyn Environment, name: &str, required: bool) -> Result<String> {
    let value = env.var(&input_key(name)).unwrap_or_default();
    if required && value.is_empty() {
        return Err(ExpectedError::new(format!("Input {name} is required.")).into());
    }
    Ok(value)
}

pub fn get_repo_owner(env: &dyn Environment) -> Result<String> {
    match env.var(REPO_OWNER_VAR) {
        Some(owner) if !owner.is_empty() => Ok(owner),
        _ => Err(ExpectedError::new(format!(
            "{REPO_OWNER_VAR} environment variable is not set."
        ))
        .into()),
    }
}

pub fn running_in_github_ci(env: &dyn Environment) -> bool {
    env.var(GITHUB_ACTIONS_VAR).as_deref() == Some("true")
}

/// Inputs needed to roll back one app.
#[derive(Clone, PartialEq, Eq)]
pub struct ActionInputs {
    pub repo_owner: String,
    pub api_key: String,
    pub app_name: String,
}

impl fmt::Debug for ActionInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionInputs")
            .field("repo_owner", &self.repo_owner)
            .field("api_key", &"<redacted>")
            .field("app_name", &self.app_name)
            .finish()
    }
}

impl ActionInputs {
    /// Collect and validate all inputs, reporting each step.
    pub fn collect(env: &dyn Environment, reporter: &dyn Reporter) -> Result<Self> {
        reporter.info("repo owner");
        let repo_owner = get_repo_owner(env)?;

        reporter.info("Decent API key");
        let api_key = get_input(env, API_KEY_INPUT, true)?;

        reporter.info("app name");
        let app_name = get_input(env, APP_NAME_INPUT, true)?;
        validate_app_name(&app_name)?;

        Ok(Self {
            repo_owner,
            api_key,
            app_name,
        })
    }
}
