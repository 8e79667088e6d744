//! # Storage Configuration
//!
//! Resolves where [`crate::FileStorage`] keeps its data on the device.
//!
//! ## Resolution Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Data Directory Priority                              │
//! │                                                                         │
//! │  1. Explicit path (tests, CLI tooling)                                 │
//! │     StorageConfig::with_data_dir("/tmp/dukaan-test")                   │
//! │                                                                         │
//! │  2. DUKAAN_DATA_DIR environment variable                               │
//! │                                                                         │
//! │  3. Platform app-data directory                                        │
//! │     ~/.local/share/dukaan (Linux)                                      │
//! │     ~/Library/Application Support/com.dukaan.app (macOS)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use tracing::debug;

/// Configuration for the file-backed storage location.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// Explicit data directory override.
    data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Creates a config that resolves the platform default directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config pinned to an explicit directory.
    pub fn with_data_dir(path: impl Into<PathBuf>) -> Self {
        StorageConfig {
            data_dir: Some(path.into()),
        }
    }

    /// Resolves the data directory.
    ///
    /// Returns `None` only when no explicit path is set, the environment
    /// variable is unset, and the platform has no home directory to anchor
    /// an app-data path to.
    pub fn resolve_data_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Some(dir.clone());
        }

        if let Ok(dir) = std::env::var("DUKAAN_DATA_DIR") {
            debug!(dir = %dir, "using data dir from environment");
            return Some(PathBuf::from(dir));
        }

        directories::ProjectDirs::from("com", "dukaan", "app")
            .map(|dirs| dirs.data_dir().to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_wins() {
        let config = StorageConfig::with_data_dir("/tmp/dukaan-test");
        assert_eq!(
            config.resolve_data_dir(),
            Some(PathBuf::from("/tmp/dukaan-test"))
        );
    }
}
