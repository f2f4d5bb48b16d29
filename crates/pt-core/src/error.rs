//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::GeoPoint;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid coordinate {0}")]
    InvalidCoordinate(GeoPoint),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `pt-core`.
pub type CoreResult<T> = Result<T, CoreError>;
