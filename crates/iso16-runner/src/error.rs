//! Error types for the suite runner.
//!
//! [`RunnerError`] covers failures that stop the whole suite. Problems with
//! a single vector are recorded in the report instead and never surface
//! here.

use std::path::PathBuf;

use crate::loader::LoadError;

/// Suite-level failure.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The vectors directory could not be listed.
    #[error("vector discovery failed: {source}")]
    Discovery {
        /// The underlying load error.
        #[from]
        source: LoadError,
    },

    /// The vectors directory holds no `V*.json` file.
    #[error("no vectors found in {}", dir.display())]
    NoVectors {
        /// The directory searched.
        dir: PathBuf,
    },

    /// A result, trace, or report file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// The path being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A result record could not be encoded as JSON.
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        /// The path the record was destined for.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}
