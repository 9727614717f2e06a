//! Access to the Decent Apps hosting: reading published stage indexes and
//! publishing new ones through the partner API.

pub(crate) mod client;
pub mod host;

pub use host::{
    fetch_current_state_or_empty, publish_path, DeploymentHost, HttpDeploymentHost,
    PublishRequest,
};
