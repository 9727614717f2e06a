//! One-shot check that the running tool matches the latest released version.
//!
//! Any mismatch produces a warning; the check never blocks a rollback.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use semver::Version;
use tracing::debug;

use crate::config::RollbackConfig;
use crate::partner::client::{create_http_client, read_text_with_limit};
use crate::report::Reporter;

/// Version of the running tool.
pub const LOCAL_ACTION_VERSION: &str = env!("CARGO_PKG_VERSION");

const MAX_VERSION_SIZE: u64 = 1024;

/// Where the latest released version is published.
pub trait LatestVersionSource {
    fn latest_action_version(&self) -> Result<String>;
}

/// Reads `version.txt` from the action repository's main branch.
pub struct HttpVersionSource {
    client: Client,
    url: String,
}

impl HttpVersionSource {
    pub fn new(config: &RollbackConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client()?,
            url: config.latest_action_version_url(),
        })
    }
}

impl LatestVersionSource for HttpVersionSource {
    fn latest_action_version(&self) -> Result<String> {
        debug!(url = %self.url, "fetching latest action version");
        let response = self
            .client
            .get(&self.url)
            .send()
            .context("Failed to fetch action version")?;

        let status = response.status();
        if !status.is_success() {
            bail!(
                "Failed to fetch action version: {}",
                status.canonical_reason().unwrap_or("Unknown error")
            );
        }

        let text = read_text_with_limit(response, MAX_VERSION_SIZE, "Action version download")?;
        Ok(text.trim().to_string())
    }
}

/// Result of comparing the local and latest versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionCheck {
    UpToDate { version: String },
    Outdated { local: String, latest: String },
    /// Local build is newer than the latest release.
    Ahead { local: String, latest: String },
}

pub fn compare_versions(local: &str, latest: &str) -> VersionCheck {
    let local = local.trim();
    let latest = latest.trim();
    if local == latest {
        return VersionCheck::UpToDate {
            version: local.to_string(),
        };
    }

    // Tags may carry a leading "v" and need not be semver at all.
    let parsed = (
        Version::parse(local.trim_start_matches('v')),
        Version::parse(latest.trim_start_matches('v')),
    );
    match parsed {
        (Ok(l), Ok(r)) if l == r => VersionCheck::UpToDate {
            version: local.to_string(),
        },
        (Ok(l), Ok(r)) if l > r => VersionCheck::Ahead {
            local: local.to_string(),
            latest: latest.to_string(),
        },
        _ => VersionCheck::Outdated {
            local: local.to_string(),
            latest: latest.to_string(),
        },
    }
}

/// Compare the running version against the latest release and report.
pub fn check(source: &dyn LatestVersionSource, reporter: &dyn Reporter) -> Result<VersionCheck> {
    reporter.info("fetch local action version");
    let local = LOCAL_ACTION_VERSION;

    reporter.info("fetch latest action version");
    let latest = source.latest_action_version()?;

    let result = compare_versions(local, &latest);
    match &result {
        VersionCheck::UpToDate { version } => {
            reporter.info(&format!(
                "Local action version {version} matches latest action version."
            ));
        }
        VersionCheck::Outdated { local, latest } => {
            reporter.warning(&format!(
                "Local action version {local} does not match latest action version {latest}. Consider updating your action."
            ));
        }
        VersionCheck::Ahead { local, latest } => {
            reporter.warning(&format!(
                "Local action version {local} does not match latest action version {latest}. Local version is newer than the latest release."
            ));
        }
    }
    Ok(result)
}

/// Run the check inside its own group, downgrading any failure to a warning.
pub fn check_in_group(source: &dyn LatestVersionSource, reporter: &dyn Reporter) {
    reporter.start_group("Checking action version");
    if let Err(err) = check(source, reporter) {
        reporter.warning(&format!("Could not check action version: {err:#}"));
    }
    reporter.end_group();
}
