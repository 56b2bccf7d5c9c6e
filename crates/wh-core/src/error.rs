//! Error type for `wh-core`.
//!
//! Sub-crates define their own error enums; `WhError` only covers
//! configuration that fails validation before any grid or robot exists.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WhError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `wh-core`.
pub type WhResult<T> = Result<T, WhError>;
