//! # Storage Error Types
//!
//! Error types for device key-value storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  I/O or JSON error (std::io::Error / serde_json::Error)                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module)                                            │
//! │       │                                                                 │
//! │       ├── explicit save()/load() callers see it as a Result            │
//! │       │                                                                 │
//! │       └── fire-and-forget persistence logs it and moves on;            │
//! │           in-memory state stays authoritative either way                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Device storage operation errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying file I/O failed.
    ///
    /// ## When This Occurs
    /// - Data directory cannot be created
    /// - Disk full, permissions issue
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted value is not the JSON we expect.
    ///
    /// ## When This Occurs
    /// - A partial write from a crash left truncated JSON
    /// - An older app version wrote an incompatible shape
    #[error("storage payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with StorageError.
pub type StorageResult<T> = Result<T, StorageError>;
