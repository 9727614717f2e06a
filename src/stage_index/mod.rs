//! The stage index protocol.
//!
//! A stage index is a small HTML page published at `/_{app}/index.html`. It
//! records the production, rollback and stage versions of one application as
//! single-quoted script variables and redirects browsers to the staged build.
//! The page carries a format-version marker so that readers can refuse
//! documents written in a layout they do not understand.
//!
//! Parsing is deliberately a substring scan rather than an HTML parse so the
//! document stays hand-editable. Individual lookups return `Option`; only the
//! format-version gate returns an error.

pub mod format;
pub mod generator;
pub mod parser;

pub use format::{StageIndexDocument, StageIndexError, FORMAT_VERSION, TOOL_MARKER};
pub use generator::render;
pub use parser::{
    extract_state, parse_document, parse_format_version, parse_variable,
    require_supported_format,
};
