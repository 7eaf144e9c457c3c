//! Scan error taxonomy
//!
//! Only [`ScanError::InputNotFound`] aborts a scan. Archive-open and
//! descriptor-parse failures are recovered locally by the traversal
//! engine (placeholder record, skipped descriptor) and surface here
//! only for logging.

use std::path::PathBuf;

/// Scan error
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("input path does not exist or is unreadable: {0}")]
    InputNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to open archive {path}: {reason}")]
    ArchiveOpen { path: PathBuf, reason: String },

    #[error("failed to parse descriptor {entry}: {reason}")]
    DescriptorParse { entry: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(#[from] crate::config::ConfigError),
}
