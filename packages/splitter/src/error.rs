//! Error types for the corpus splitter.
//!
//! Every variant is fatal: a run either completes or stops at the first error.
//! The only tolerated failure (symlink creation) never surfaces here.

use std::ffi::OsString;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the splitter library.
#[derive(Debug, Error)]
pub enum SplitterError {
    /// Filename contains no run of decimal digits.
    #[error("Cannot find numeric ID in '{0}'")]
    MissingNumericId(String),

    /// Directory entry whose name is not valid UTF-8.
    #[error("File name is not valid UTF-8: {}", .0.to_string_lossy())]
    NonUtf8FileName(OsString),

    /// No eligible files left to split.
    #[error("No files to split")]
    EmptyCorpus,

    /// Requested train + dev sizes exceed the corpus.
    #[error("Not enough files to split: {train}+{dev}>{available}")]
    Capacity {
        train: usize,
        dev: usize,
        available: usize,
    },

    /// A train/dev size argument that cannot be interpreted.
    #[error("Invalid split size: {0}")]
    InvalidSize(String),

    /// Subsample proportion outside (0, 1].
    #[error("Invalid total proportion: {0}. Expected a value in (0, 1]")]
    InvalidTotal(f64),

    /// Filesystem operation failed on a specific path.
    #[error("Failed to {operation} {}: {source}", .path.display())]
    Filesystem {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SplitterError {
    /// Wrap an IO error with the operation and path it happened on.
    pub fn filesystem(
        operation: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Filesystem {
            operation,
            path,
            source,
        }
    }
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitterError>;
