pub mod commands;
pub mod config;
pub mod error;
pub mod inputs;
pub mod models;
pub mod partner;
pub mod report;
pub mod stage_index;
pub mod validation;
