//! crates/rd_io/src/lib.rs
//! Wire formats and loading for redraw.
//!
//! - `codec`: run-length share payload <-> unit assignments
//! - `dataset`: TopoJSON-shaped dataset files -> unit records
//! - `catalog`: the fixed dataset catalog (election years)
//! - `share`: share URLs (query building and parsing)
//! - `params`: engine parameter files
//!
//! Shared error type (`IoError`) with `From` conversions used across modules.

#![forbid(unsafe_code)]

use thiserror::Error;

/// Unified error for rd_io.
#[derive(Debug, Error)]
pub enum IoError {
    /// Filesystem / path errors.
    #[error("io/path error: {0}")]
    Path(String),

    /// JSON serialization/deserialization errors with an optional JSON Pointer.
    #[error("json error at {pointer}: {msg}")]
    Json { pointer: String, msg: String },

    /// URL parse errors.
    #[error("url error: {0}")]
    Url(String),

    /// Generic validation / invariants.
    #[error("invalid: {0}")]
    Invalid(String),
}

pub type IoResult<T> = Result<T, IoError>;

impl From<std::io::Error> for IoError {
    fn from(e: std::io::Error) -> Self {
        IoError::Path(e.to_string())
    }
}

impl From<serde_json::Error> for IoError {
    fn from(e: serde_json::Error) -> Self {
        // serde_json keeps no pointer; default to root.
        IoError::Json { pointer: "/".to_string(), msg: e.to_string() }
    }
}

impl From<url::ParseError> for IoError {
    fn from(e: url::ParseError) -> Self {
        IoError::Url(e.to_string())
    }
}

impl From<rd_core::CoreError> for IoError {
    fn from(e: rd_core::CoreError) -> Self {
        IoError::Invalid(e.to_string())
    }
}

pub mod catalog;
pub mod codec;
pub mod dataset;
pub mod params;
pub mod share;

pub mod prelude {
    pub use crate::{IoError, IoResult};

    pub use crate::catalog::{self, DatasetEntry};
    pub use crate::codec::{self, decode, encode, Decoded, DecodeWarning};
    pub use crate::dataset::{self, load_dataset, Dataset};
    pub use crate::params::load_params;
    pub use crate::share::{self, parse_share_query, share_url, ShareQuery};
}
