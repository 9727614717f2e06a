//! Reading and publishing stage indexes.

use anyhow::{Context, Result};
use reqwest::blocking::{Client, Request};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use crate::config::RollbackConfig;
use crate::error::ExpectedError;
use crate::models::slot_state::SlotState;
use crate::partner::client::{create_http_client, read_text_with_limit, MAX_TEXT_SIZE};
use crate::report::Reporter;
use crate::stage_index::parse_document;

/// A rendered stage index ready to upload.
#[derive(Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub repo_owner: String,
    pub api_key: String,
    pub app_name: String,
    pub stage_index: String,
    pub update_route: bool,
}

impl std::fmt::Debug for PublishRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublishRequest")
            .field("repo_owner", &self.repo_owner)
            .field("api_key", &"<redacted>")
            .field("app_name", &self.app_name)
            .field("update_route", &self.update_route)
            .finish_non_exhaustive()
    }
}

/// Where stage indexes are read from and published to.
pub trait DeploymentHost {
    /// Location the current stage index of `app_name` is served from.
    fn stage_index_url(&self, app_name: &str) -> String;

    /// Fetch the current stage index text.
    ///
    /// Returns `Ok(None)` when the server answers with a non-success status.
    fn fetch_stage_index(&self, app_name: &str) -> Result<Option<String>>;

    /// Upload a stage index, replacing whatever is published for the app.
    fn put_stage_index(&self, request: &PublishRequest) -> Result<()>;
}

/// Partner API path for publishing an app's stage index.
pub fn publish_path(app_name: &str, update_route: bool) -> String {
    if update_route {
        format!("/api/deployment/{app_name}/index.html?updateRoute=true")
    } else {
        format!("/api/deployment/{app_name}/index.html")
    }
}

/// [`DeploymentHost`] talking HTTPS to the configured hosts.
pub struct HttpDeploymentHost {
    client: Client,
    config: RollbackConfig,
}

impl HttpDeploymentHost {
    pub fn new(config: &RollbackConfig) -> Result<Self> {
        Ok(Self {
            client: create_http_client()?,
            config: config.clone(),
        })
    }

    /// Build the authenticated PUT for a stage index without sending it.
    pub fn build_publish_request(&self, request: &PublishRequest) -> Result<Request> {
        let url = format!(
            "https://{}{}",
            self.config.partner_api_host,
            publish_path(&request.app_name, request.update_route)
        );
        self.client
            .put(url)
            .header(CONTENT_TYPE, "text/html")
            .header(AUTHORIZATION, format!("Bearer {}", request.api_key))
            .header("x-repo-owner", request.repo_owner.as_str())
            .header(ACCEPT, "application/json")
            .body(request.stage_index.clone())
            .build()
            .context("Failed to build stage index upload request")
    }
}

impl DeploymentHost for HttpDeploymentHost {
    fn stage_index_url(&self, app_name: &str) -> String {
        self.config.stage_index_url(app_name)
    }

    fn fetch_stage_index(&self, app_name: &str) -> Result<Option<String>> {
        let url = self.stage_index_url(app_name);
        debug!(%url, "fetching stage index");
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("Failed to fetch {url}"))?;

        if !response.status().is_success() {
            debug!(status = response.status().as_u16(), "stage index not available");
            return Ok(None);
        }

        read_text_with_limit(response, MAX_TEXT_SIZE, "Stage index download").map(Some)
    }

    fn put_stage_index(&self, request: &PublishRequest) -> Result<()> {
        let http_request = self.build_publish_request(request)?;
        debug!(url = %http_request.url(), "uploading stage index");
        let response = self
            .client
            .execute(http_request)
            .with_context(|| format!("Failed to upload stage index to {}", self.config.partner_api_host))?;

        let status = response.status();
        if !status.is_success() {
            let body = read_text_with_limit(response, MAX_TEXT_SIZE, "Error response")
                .unwrap_or_default();
            return Err(ExpectedError::new(format!(
                "Request to {} failed with status code: {}. Response: {body}",
                self.config.partner_api_host,
                status.as_u16()
            ))
            .into());
        }
        Ok(())
    }
}

/// Read the app's current slots, falling back to the empty state.
///
/// A failed fetch, a missing index, and an index in an unsupported format all
/// yield [`SlotState::empty`]. Each case is reported differently but none of
/// them is an error for the caller.
pub fn fetch_current_state_or_empty(
    host: &dyn DeploymentHost,
    app_name: &str,
    reporter: &dyn Reporter,
) -> SlotState {
    let url = host.stage_index_url(app_name);
    let text = match host.fetch_stage_index(app_name) {
        Ok(Some(text)) => text,
        Ok(None) => {
            reporter.info(&format!("No existing stage index found at {url}."));
            return SlotState::empty();
        }
        Err(err) => {
            reporter.warning(&format!(
                "Could not fetch existing stage index at {url}: {err:#}"
            ));
            return SlotState::empty();
        }
    };

    match parse_document(&text) {
        Ok(document) => document.state,
        Err(err) => {
            reporter.warning(&format!(
                "Could not retrieve app versions from existing stage index at {url}: {err}"
            ));
            SlotState::empty()
        }
    }
}
