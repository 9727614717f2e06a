//! Console reporting.
//!
//! All user-facing output goes through a [`Reporter`] so the rollback pipeline
//! never writes to the console or exits the process itself. The GitHub
//! implementation emits workflow commands that Actions renders as
//! annotations and collapsible groups.

use colored::Colorize;
use std::cell::RefCell;

pub trait Reporter {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    fn notice(&self, message: &str);
    fn start_group(&self, name: &str);
    fn end_group(&self);

    fn final_success(&self, message: &str) {
        self.notice(&format!("✅ {message}"));
    }
}

/// Writes GitHub workflow commands to stdout/stderr.
///
/// With `colorize` set, annotations are also coloured for terminal use.
#[derive(Debug, Clone, Copy, Default)]
pub struct GithubReporter {
    colorize: bool,
}

impl GithubReporter {
    pub fn new(colorize: bool) -> Self {
        Self { colorize }
    }
}

impl Reporter for GithubReporter {
    fn info(&self, message: &str) {
        println!("{message}");
    }

    fn warning(&self, message: &str) {
        let line = format!("::warning::{message}");
        if self.colorize {
            eprintln!("{}", line.yellow());
        } else {
            eprintln!("{line}");
        }
    }

    fn error(&self, message: &str) {
        let line = format!("::error::{message}");
        if self.colorize {
            eprintln!("{}", line.red().bold());
        } else {
            eprintln!("{line}");
        }
    }

    fn notice(&self, message: &str) {
        let line = format!("::notice::{message}");
        if self.colorize {
            println!("{}", line.green());
        } else {
            println!("{line}");
        }
    }

    fn start_group(&self, name: &str) {
        if self.colorize {
            println!("{}", format!("::group::{name}").blue().bold());
        } else {
            println!("::group::{name}");
        }
    }

    fn end_group(&self) {
        println!("::endgroup::");
    }
}

/// One message captured by [`RecordingReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    Info(String),
    Warning(String),
    Error(String),
    Notice(String),
    GroupStart(String),
    GroupEnd,
}

/// Reporter that keeps every message in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    lines: RefCell<Vec<ReportLine>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<ReportLine> {
        self.lines.borrow().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter_map(|line| match line {
                ReportLine::Warning(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter_map(|line| match line {
                ReportLine::Notice(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter_map(|line| match line {
                ReportLine::Error(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    fn push(&self, line: ReportLine) {
        self.lines.borrow_mut().push(line);
    }
}

impl Reporter for RecordingReporter {
    fn info(&self, message: &str) {
        self.push(ReportLine::Info(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.push(ReportLine::Warning(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(ReportLine::Error(message.to_string()));
    }

    fn notice(&self, message: &str) {
        self.push(ReportLine::Notice(message.to_string()));
    }

    fn start_group(&self, name: &str) {
        self.push(ReportLine::GroupStart(name.to_string()));
    }

    fn end_group(&self) {
        self.push(ReportLine::GroupEnd);
    }
}
