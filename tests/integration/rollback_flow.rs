//! End-to-end rollback scenarios

use decent_rollback::commands::rollback::{execute, roll_back, RollbackOptions};
use decent_rollback::config::RollbackConfig;
use decent_rollback::error::{is_expected, user_message, UNEXPECTED_ERROR_MESSAGE};
use decent_rollback::inputs::ActionInputs;
use decent_rollback::models::SlotState;
use decent_rollback::report::{RecordingReporter, ReportLine};
use decent_rollback::stage_index::{extract_state, render, require_supported_format};

use super::helpers::{action_env, CurrentVersion, MemoryHost};

fn inputs(app_name: &str) -> ActionInputs {
    ActionInputs {
        repo_owner: "acme".to_string(),
        api_key: "secret-key".to_string(),
        app_name: app_name.to_string(),
    }
}

#[test]
fn test_widgets_rollback_end_to_end() {
    let host = MemoryHost::with_app("widgets", "2.2.0", "2.1.0", "2.0.5");
    let reporter = RecordingReporter::new();
    let config = RollbackConfig::default();

    let outcome = execute(
        &RollbackOptions::default(),
        &config,
        &action_env("widgets"),
        &host,
        &CurrentVersion,
        &reporter,
    )
    .expect("rollback should succeed");

    assert_eq!(outcome.previous, SlotState::new("2.2.0", "2.1.0", "2.0.5"));
    assert_eq!(outcome.current, SlotState::new("2.2.0", "2.0.5", ""));

    // Republished document carries the new state in the supported format
    let published = host.index("widgets").unwrap();
    assert_eq!(require_supported_format(&published), Ok("1.0"));
    assert_eq!(extract_state(&published), SlotState::new("2.2.0", "2.0.5", ""));
    assert_eq!(published, render("widgets", "2.2.0", "2.0.5", ""));

    let notices = reporter.notices();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].starts_with("✅ "));
    assert!(notices[0].contains("2.0.5"));
    assert!(notices[0].contains("https://decentapps.net/widgets/"));
    assert!(notices[0].contains("Staging remains at 2.2.0 version."));
    assert!(reporter.warnings().is_empty());
}

#[test]
fn test_publish_request_carries_credentials_and_route_flag() {
    let host = MemoryHost::with_app("widgets", "s1", "p1", "r0");
    roll_back(
        &host,
        &RollbackConfig::default(),
        &inputs("widgets"),
        &RecordingReporter::new(),
    )
    .unwrap();

    let published = host.published.borrow();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].repo_owner, "acme");
    assert_eq!(published[0].api_key, "secret-key");
    assert_eq!(published[0].app_name, "widgets");
    assert!(published[0].update_route);
}

#[test]
fn test_route_update_ignores_configured_hosts() {
    let host = MemoryHost::with_app("widgets", "s1", "p1", "r0");
    let config = RollbackConfig {
        site_host: "staging.example.com".to_string(),
        partner_api_host: "api.example.com".to_string(),
        ..RollbackConfig::default()
    };
    roll_back(&host, &config, &inputs("widgets"), &RecordingReporter::new()).unwrap();

    assert!(host.published.borrow()[0].update_route);
}

#[test]
fn test_group_closed_when_no_rollback_available() {
    let host = MemoryHost::with_app("widgets", "s1", "p1", "");
    let reporter = RecordingReporter::new();

    roll_back(&host, &RollbackConfig::default(), &inputs("widgets"), &reporter).unwrap_err();

    let lines = reporter.lines();
    assert_eq!(
        lines.first(),
        Some(&ReportLine::GroupStart("Updating stage index".to_string()))
    );
    assert_eq!(lines.last(), Some(&ReportLine::GroupEnd));
}

#[test]
fn test_group_closed_when_publish_rejected() {
    let host = MemoryHost {
        reject_publish: Some((500, "boom".to_string())),
        ..MemoryHost::with_app("widgets", "s1", "p1", "r0")
    };
    let reporter = RecordingReporter::new();

    roll_back(&host, &RollbackConfig::default(), &inputs("widgets"), &reporter).unwrap_err();

    assert_eq!(reporter.lines().last(), Some(&ReportLine::GroupEnd));
    assert!(reporter.notices().is_empty());
}

#[test]
fn test_second_rollback_against_updated_state_rejected() {
    let host = MemoryHost::with_app("widgets", "s1", "p1", "r0");
    let config = RollbackConfig::default();

    roll_back(&host, &config, &inputs("widgets"), &RecordingReporter::new()).unwrap();

    let err = roll_back(&host, &config, &inputs("widgets"), &RecordingReporter::new())
        .unwrap_err();
    assert!(is_expected(&err));
    assert_eq!(err.to_string(), "No rollback version available for app widgets.");
    assert_eq!(host.publish_count(), 1);
    assert_eq!(
        extract_state(&host.index("widgets").unwrap()),
        SlotState::new("s1", "r0", "")
    );
}

#[test]
fn test_rollback_equal_to_production_rejected() {
    let host = MemoryHost::with_app("widgets", "s1", "p1", "p1");
    let err = roll_back(
        &host,
        &RollbackConfig::default(),
        &inputs("widgets"),
        &RecordingReporter::new(),
    )
    .unwrap_err();
    assert!(is_expected(&err));
    assert_eq!(host.publish_count(), 0);
}

#[test]
fn test_missing_index_means_nothing_to_roll_back() {
    let host = MemoryHost::new();
    let err = roll_back(
        &host,
        &RollbackConfig::default(),
        &inputs("widgets"),
        &RecordingReporter::new(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "No rollback version available for app widgets.");
    assert_eq!(host.publish_count(), 0);
}

#[test]
fn test_unsupported_format_treated_as_empty_state() {
    let host = MemoryHost::new();
    let text = render("widgets", "s1", "p1", "r0").replace("<!-- v1.0 ", "<!-- v2.0 ");
    host.set_index("widgets", text);
    let reporter = RecordingReporter::new();

    let err = roll_back(&host, &RollbackConfig::default(), &inputs("widgets"), &reporter)
        .unwrap_err();

    assert!(is_expected(&err));
    assert_eq!(host.publish_count(), 0);
    assert!(reporter.warnings()[0].contains("Unsupported stage index format version 2.0."));
}

#[test]
fn test_missing_marker_behaves_like_unsupported_version() {
    let host = MemoryHost::new();
    let text = render("widgets", "s1", "p1", "r0")
        .replace("<!-- v1.0 Decent Tools. Hand-edit at your own risk! -->", "");
    host.set_index("widgets", text);
    let reporter = RecordingReporter::new();

    let err = roll_back(&host, &RollbackConfig::default(), &inputs("widgets"), &reporter)
        .unwrap_err();

    assert_eq!(err.to_string(), "No rollback version available for app widgets.");
    assert!(reporter.warnings()[0].contains("Failed to parse stage index format version."));
}

#[test]
fn test_fetch_failure_treated_as_empty_state() {
    let host = MemoryHost {
        fetch_error: Some("dns error".to_string()),
        ..MemoryHost::new()
    };
    let reporter = RecordingReporter::new();

    let err = roll_back(&host, &RollbackConfig::default(), &inputs("widgets"), &reporter)
        .unwrap_err();

    assert!(is_expected(&err));
    assert!(reporter.warnings()[0].contains("dns error"));
}

#[test]
fn test_rejected_publish_is_expected_error_with_body() {
    let host = MemoryHost {
        reject_publish: Some((403, "{\"error\":\"forbidden\"}".to_string())),
        ..MemoryHost::with_app("widgets", "s1", "p1", "r0")
    };

    let err = roll_back(
        &host,
        &RollbackConfig::default(),
        &inputs("widgets"),
        &RecordingReporter::new(),
    )
    .unwrap_err();

    assert!(is_expected(&err));
    let message = user_message(&err, true);
    assert!(message.contains("status code: 403"));
    assert!(message.contains("forbidden"));
    // Stored index untouched
    assert_eq!(
        extract_state(&host.index("widgets").unwrap()),
        SlotState::new("s1", "p1", "r0")
    );
}

#[test]
fn test_missing_inputs_fail_before_fetch() {
    let host = MemoryHost::with_app("widgets", "s1", "p1", "r0");
    let mut env = action_env("widgets");
    env.remove("INPUT_API-KEY");

    let err = execute(
        &RollbackOptions {
            skip_version_check: true,
        },
        &RollbackConfig::default(),
        &env,
        &host,
        &CurrentVersion,
        &RecordingReporter::new(),
    )
    .unwrap_err();

    assert_eq!(user_message(&err, true), "Input api-key is required.");
    assert_eq!(host.publish_count(), 0);
}

#[test]
fn test_unexpected_error_hidden_in_ci() {
    let err = anyhow::anyhow!("internal invariant broken");
    assert_eq!(user_message(&err, true), UNEXPECTED_ERROR_MESSAGE);
}

#[test]
fn test_skip_version_check_omits_group() {
    let host = MemoryHost::with_app("widgets", "s1", "p1", "r0");
    let reporter = RecordingReporter::new();

    execute(
        &RollbackOptions {
            skip_version_check: true,
        },
        &RollbackConfig::default(),
        &action_env("widgets"),
        &host,
        &CurrentVersion,
        &reporter,
    )
    .unwrap();

    let lines = reporter.lines();
    assert_eq!(
        lines.first(),
        Some(&ReportLine::GroupStart("Collecting inputs".to_string()))
    );
}
