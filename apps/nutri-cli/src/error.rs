//! # CLI Error Types
//!
//! Everything that can stop a `nutri` invocation.
//!
//! ```text
//! ┌────────────────────┐  ┌────────────────────┐  ┌────────────────────┐
//! │   Input            │  │   Configuration    │  │   Engine           │
//! │   Io, Json         │  │   Config           │  │   Core             │
//! │   UnknownProduct   │  │                    │  │   CheckFailed      │
//! └────────────────────┘  └────────────────────┘  └────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

use nutri_core::{CoreError, ProductId};

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A file could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A recipe document is not valid JSON or has the wrong shape.
    #[error("Invalid recipe document: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file or environment is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The engine rejected the input.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// `--product` names a product the document does not contain.
    #[error("Product not found in document: {0}")]
    UnknownProduct(ProductId),

    /// `check` found problems.
    #[error("Document has {issues} problem(s)")]
    CheckFailed { issues: usize },
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(err.to_string())
    }
}

impl CliError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }
}
