//! Scan configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for one scan invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Product label attached verbatim to every record.
    pub product_name: String,
    /// Product version label attached verbatim to every record.
    pub product_version: String,
    /// Upper bound on concurrently processed sibling entries.
    pub max_concurrency: usize,
    /// Parent directory for the ephemeral working root. Defaults to
    /// the platform temp directory when unset.
    pub scratch_root: Option<PathBuf>,
    /// File extensions never treated as scan targets.
    pub exclude_extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            product_name: String::new(),
            product_version: String::new(),
            max_concurrency: 8,
            scratch_root: None,
            exclude_extensions: vec!["java".to_string()],
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency);
        }
        if let Some(root) = &self.scratch_root {
            if !root.is_dir() {
                return Err(ConfigError::ScratchRootMissing(root.clone()));
            }
        }
        Ok(())
    }
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("max_concurrency must be at least 1")]
    InvalidConcurrency,

    #[error("scratch root is not a directory: {0}")]
    ScratchRootMissing(PathBuf),
}
