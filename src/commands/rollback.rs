//! Roll an app's production slot back to its rollback version.

use anyhow::{Context, Result};
use tracing::debug;

use crate::commands::action_version::{self, LatestVersionSource};
use crate::config::RollbackConfig;
use crate::error::ExpectedError;
use crate::inputs::{ActionInputs, Environment};
use crate::models::slot_state::SlotState;
use crate::partner::{fetch_current_state_or_empty, DeploymentHost, PublishRequest};
use crate::report::Reporter;
use crate::stage_index::StageIndexDocument;

/// What a successful rollback changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackOutcome {
    pub app_name: String,
    pub previous: SlotState,
    pub current: SlotState,
    pub production_url: String,
}

impl RollbackOutcome {
    pub fn success_message(&self) -> String {
        format!(
            "Successfully rolled back production URL \"{}\" to {} version. Staging remains at {} version.",
            self.production_url, self.current.production_version, self.current.stage_version
        )
    }
}

/// Fetch the app's slots, apply the rollback and publish the new stage index.
///
/// # Errors
///
/// Returns an [`ExpectedError`] when no rollback version is available or the
/// partner service rejects the upload. Any other failure is unexpected.
pub fn roll_back(
    host: &dyn DeploymentHost,
    config: &RollbackConfig,
    inputs: &ActionInputs,
    reporter: &dyn Reporter,
) -> Result<RollbackOutcome> {
    reporter.start_group("Updating stage index");
    let result = update_stage_index(host, inputs, reporter);
    reporter.end_group();
    let (previous, current) = result?;

    let app_name = inputs.app_name.as_str();
    let outcome = RollbackOutcome {
        app_name: app_name.to_string(),
        previous,
        current,
        production_url: config.production_url(app_name),
    };
    reporter.final_success(&outcome.success_message());
    Ok(outcome)
}

/// Body of the "Updating stage index" group. Returns the previous and new slots.
fn update_stage_index(
    host: &dyn DeploymentHost,
    inputs: &ActionInputs,
    reporter: &dyn Reporter,
) -> Result<(SlotState, SlotState)> {
    let app_name = inputs.app_name.as_str();

    reporter.info("fetch app versions");
    let previous = fetch_current_state_or_empty(host, app_name, reporter);

    let current = previous.rollback().map_err(|reason| {
        debug!(%reason, app = app_name, "rollback not possible");
        ExpectedError::new(format!("No rollback version available for app {app_name}."))
    })?;

    reporter.info(&format!("uploading new stage index - {current}"));
    let document = StageIndexDocument::new(app_name, current.clone());
    let request = PublishRequest {
        repo_owner: inputs.repo_owner.clone(),
        api_key: inputs.api_key.clone(),
        app_name: app_name.to_string(),
        stage_index: document.render(),
        update_route: true,
    };
    host.put_stage_index(&request)
        .context("Failed to upload stage index to partner service")?;

    Ok((previous, current))
}

/// Options for a full rollback run.
#[derive(Debug, Clone, Default)]
pub struct RollbackOptions {
    pub skip_version_check: bool,
}

/// Run the whole action: version check, input collection, rollback.
pub fn execute(
    options: &RollbackOptions,
    config: &RollbackConfig,
    env: &dyn Environment,
    host: &dyn DeploymentHost,
    versions: &dyn LatestVersionSource,
    reporter: &dyn Reporter,
) -> Result<RollbackOutcome> {
    if !options.skip_version_check {
        action_version::check_in_group(versions, reporter);
    }

    reporter.start_group("Collecting inputs");
    let inputs = ActionInputs::collect(env, reporter)?;
    reporter.end_group();

    roll_back(host, config, &inputs, reporter)
}
