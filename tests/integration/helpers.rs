//! Shared test helpers: an in-memory deployment host and fixed version source

use anyhow::{anyhow, Result};
use std::cell::RefCell;
use std::collections::HashMap;

use decent_rollback::commands::action_version::{LatestVersionSource, LOCAL_ACTION_VERSION};
use decent_rollback::error::ExpectedError;
use decent_rollback::partner::{DeploymentHost, PublishRequest};
use decent_rollback::stage_index::render;

/// Deployment host keeping published stage indexes in memory.
#[derive(Default)]
pub struct MemoryHost {
    pub indexes: RefCell<HashMap<String, String>>,
    pub published: RefCell<Vec<PublishRequest>>,
    pub fetch_error: Option<String>,
    pub reject_publish: Option<(u16, String)>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host with one app already published.
    pub fn with_app(app_name: &str, stage: &str, production: &str, rollback: &str) -> Self {
        let host = Self::new();
        host.set_index(app_name, render(app_name, stage, production, rollback));
        host
    }

    pub fn set_index(&self, app_name: &str, text: String) {
        self.indexes.borrow_mut().insert(app_name.to_string(), text);
    }

    pub fn index(&self, app_name: &str) -> Option<String> {
        self.indexes.borrow().get(app_name).cloned()
    }

    pub fn publish_count(&self) -> usize {
        self.published.borrow().len()
    }
}

impl DeploymentHost for MemoryHost {
    fn stage_index_url(&self, app_name: &str) -> String {
        format!("https://memory.test/_{app_name}/index.html")
    }

    fn fetch_stage_index(&self, app_name: &str) -> Result<Option<String>> {
        if let Some(message) = &self.fetch_error {
            return Err(anyhow!(message.clone()));
        }
        Ok(self.index(app_name))
    }

    fn put_stage_index(&self, request: &PublishRequest) -> Result<()> {
        if let Some((status, body)) = &self.reject_publish {
            return Err(ExpectedError::new(format!(
                "Request to memory.test failed with status code: {status}. Response: {body}"
            ))
            .into());
        }
        self.published.borrow_mut().push(request.clone());
        self.set_index(&request.app_name, request.stage_index.clone());
        Ok(())
    }
}

/// Version source that always reports the running version.
pub struct CurrentVersion;

impl LatestVersionSource for CurrentVersion {
    fn latest_action_version(&self) -> Result<String> {
        Ok(LOCAL_ACTION_VERSION.to_string())
    }
}

pub fn action_env(app_name: &str) -> HashMap<String, String> {
    HashMap::from([
        ("GITHUB_REPOSITORY_OWNER".to_string(), "acme".to_string()),
        ("INPUT_API-KEY".to_string(), "secret-key".to_string()),
        ("INPUT_APP-NAME".to_string(), app_name.to_string()),
    ])
}
