pub mod action_version;
pub mod rollback;
pub mod show;
