//! Rollback configuration.
//!
//! Defaults point at the public Decent Apps hosts. An optional TOML file can
//! override any key, and command-line flags override the file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_SITE_HOST: &str = "decentapps.net";
pub const DEFAULT_PARTNER_API_HOST: &str = "partner.decentapps.net";
pub const DEFAULT_ACTION_REPO_OWNER: &str = "DecentAppsNet";
pub const DEFAULT_ACTION_NAME: &str = "rollback";

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackConfig {
    /// Host serving published apps and their stage indexes.
    pub site_host: String,
    /// Host of the partner deployment API.
    pub partner_api_host: String,
    /// GitHub owner of the action repository used for the version check.
    pub action_repo_owner: String,
    pub action_name: String,
}

impl Default for RollbackConfig {
    fn default() -> Self {
        Self {
            site_host: DEFAULT_SITE_HOST.to_string(),
            partner_api_host: DEFAULT_PARTNER_API_HOST.to_string(),
            action_repo_owner: DEFAULT_ACTION_REPO_OWNER.to_string(),
            action_name: DEFAULT_ACTION_NAME.to_string(),
        }
    }
}

/// On-disk form of the configuration. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ConfigFile {
    pub site_host: Option<String>,
    pub partner_api_host: Option<String>,
    pub action_repo_owner: Option<String>,
    pub action_name: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

impl RollbackConfig {
    /// Apply values present in a config file on top of `self`.
    pub fn merge_file(mut self, file: ConfigFile) -> Self {
        if let Some(host) = file.site_host {
            self.site_host = host;
        }
        if let Some(host) = file.partner_api_host {
            self.partner_api_host = host;
        }
        if let Some(owner) = file.action_repo_owner {
            self.action_repo_owner = owner;
        }
        if let Some(name) = file.action_name {
            self.action_name = name;
        }
        self
    }

    /// Resolve configuration from an optional file plus host overrides.
    pub fn resolve(
        config_path: Option<&Path>,
        site_host: Option<String>,
        partner_api_host: Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = config_path {
            config = config.merge_file(ConfigFile::load(path)?);
        }
        if let Some(host) = site_host {
            config.site_host = host;
        }
        if let Some(host) = partner_api_host {
            config.partner_api_host = host;
        }
        Ok(config)
    }

    /// Public URL of an app's production build.
    pub fn production_url(&self, app_name: &str) -> String {
        format!("https://{}/{app_name}/", self.site_host)
    }

    /// URL the current stage index is served from.
    pub fn stage_index_url(&self, app_name: &str) -> String {
        format!("https://{}/_{app_name}/index.html", self.site_host)
    }

    /// URL of the latest released action version.
    pub fn latest_action_version_url(&self) -> String {
        format!(
            "https://raw.githubusercontent.com/{}/{}/refs/heads/main/version.txt",
            self.action_repo_owner, self.action_name
        )
    }
}
