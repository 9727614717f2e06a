//! Read-only inspection of published stage indexes

use decent_rollback::commands::show::execute;
use decent_rollback::report::{RecordingReporter, ReportLine};
use decent_rollback::stage_index::render;

use super::helpers::MemoryHost;

fn info(message: &str) -> ReportLine {
    ReportLine::Info(message.to_string())
}

#[test]
fn test_show_reports_rollback_availability() {
    let host = MemoryHost::with_app("widgets", "2.2.0", "2.1.0", "2.0.5");
    let reporter = RecordingReporter::new();
    execute(&host, "widgets", &reporter).unwrap();

    let lines = reporter.lines();
    assert!(lines.contains(&info("Stage index for widgets")));
    assert!(lines.contains(&info("  rollback:   2.0.5")));
    assert!(lines.contains(&info("  redirect:   /_widgets/2.2.0/")));
    assert!(lines.contains(&info(
        "Rollback available: production would move to 2.0.5."
    )));
    assert!(reporter.warnings().is_empty());
}

#[test]
fn test_show_marks_unset_slots() {
    let host = MemoryHost::with_app("widgets", "s1", "r0", "");
    let reporter = RecordingReporter::new();
    execute(&host, "widgets", &reporter).unwrap();

    let lines = reporter.lines();
    assert!(lines.contains(&info("  rollback:   (unset)")));
    assert!(lines.contains(&info("No rollback available.")));
}

#[test]
fn test_show_absent_index_is_empty_state() {
    let host = MemoryHost::new();
    let reporter = RecordingReporter::new();
    execute(&host, "widgets", &reporter).unwrap();

    let lines = reporter.lines();
    assert!(lines.contains(&info("No readable stage index for app widgets.")));
    assert!(lines.contains(&info("  production: (unset)")));
    assert!(lines.contains(&info("No rollback available.")));
}

#[test]
fn test_show_unsupported_format_warns_and_shows_empty_state() {
    let host = MemoryHost::new();
    host.set_index(
        "widgets",
        render("widgets", "s", "p", "r").replace("<!-- v1.0 ", "<!-- v2.0 "),
    );
    let reporter = RecordingReporter::new();

    execute(&host, "widgets", &reporter).expect("unreadable index is not fatal");

    let warnings = reporter.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("Unsupported stage index format version 2.0."));
    let lines = reporter.lines();
    assert!(lines.contains(&info("  production: (unset)")));
    assert!(lines.contains(&info("  rollback:   (unset)")));
    assert!(lines.contains(&info("  stage:      (unset)")));
    assert!(lines.contains(&info("No rollback available.")));
}

#[test]
fn test_show_fetch_failure_warns_and_shows_empty_state() {
    let host = MemoryHost {
        fetch_error: Some("dns error".to_string()),
        ..MemoryHost::new()
    };
    let reporter = RecordingReporter::new();

    execute(&host, "widgets", &reporter).expect("fetch failure is not fatal");

    assert!(reporter.warnings()[0].contains("dns error"));
    assert!(reporter.lines().contains(&info("No rollback available.")));
}
