//! Print the slots currently published for an app.

use anyhow::Result;

use crate::models::slot_state::SlotState;
use crate::partner::{fetch_current_state_or_empty, DeploymentHost};
use crate::report::Reporter;
use crate::stage_index::format::redirect_path;

/// Report the app's current slots.
///
/// An absent or unreadable index is shown as all slots unset, the same state
/// a rollback would start from.
pub fn execute(host: &dyn DeploymentHost, app_name: &str, reporter: &dyn Reporter) -> Result<()> {
    let state = fetch_current_state_or_empty(host, app_name, reporter);

    if state.is_empty() {
        reporter.info(&format!("No readable stage index for app {app_name}."));
    } else {
        reporter.info(&format!("Stage index for {app_name}"));
    }
    report_slots(&state, app_name, reporter);

    if state.can_roll_back() {
        reporter.info(&format!(
            "Rollback available: production would move to {}.",
            state.rollback_version
        ));
    } else {
        reporter.info("No rollback available.");
    }
    Ok(())
}

fn report_slots(state: &SlotState, app_name: &str, reporter: &dyn Reporter) {
    reporter.info(&format!("  production: {}", display_slot(&state.production_version)));
    reporter.info(&format!("  rollback:   {}", display_slot(&state.rollback_version)));
    reporter.info(&format!("  stage:      {}", display_slot(&state.stage_version)));
    if !state.stage_version.is_empty() {
        reporter.info(&format!(
            "  redirect:   {}",
            redirect_path(app_name, &state.stage_version)
        ));
    }
}

fn display_slot(version: &str) -> &str {
    if version.is_empty() {
        "(unset)"
    } else {
        version
    }
}
