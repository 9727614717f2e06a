//! Integration tests for the rollback pipeline
//!
//! These tests drive the full fetch → transition → render → publish flow
//! against an in-memory deployment host.

pub mod helpers;
pub mod rollback_flow;
pub mod show_document;
