//! Error types for layout-store
//!
//! A single error enum covers every way a store can fail. In-memory stores
//! never fail; the file store reports I/O, parse and atomic-rename failures.

use std::path::PathBuf;
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error while reading or writing the backing file
    #[error("Store I/O failed: {0}")]
    Io(#[source] std::io::Error),

    /// Backing file is not a JSON object of string values
    #[error("Failed to parse store: {0}")]
    Parse(String),

    /// Failed to move the freshly written file into place
    #[error("Failed to write store atomically: {path} - Safety copy at: {temp_path}")]
    WriteAtomic {
        /// Path to the store file
        path: PathBuf,
        /// Path to the temporary safety copy
        temp_path: PathBuf,
    },
}

/// Result type alias for layout-store operations
pub type Result<T> = std::result::Result<T, StoreError>;
