//! Errors raised by the configuration layer.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to load, parse or create the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Failed to read configuration file: {path}")]
    ReadError {
        /// File being read.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("Invalid configuration at {path}:{line}:{column}: {message}")]
    ParseError {
        /// File being parsed.
        path: PathBuf,
        /// 1-based line, 0 when the parser gave no position.
        line: usize,
        /// 1-based column, 0 when the parser gave no position.
        column: usize,
        /// Parser message.
        message: String,
    },

    /// A file passed with `--config` does not exist.
    #[error("Configuration file not found: {path}")]
    NotFound {
        /// Requested file.
        path: PathBuf,
    },

    /// `config init` without `--force` found an existing file.
    #[error("Configuration file already exists: {path}")]
    AlreadyExists {
        /// Existing file.
        path: PathBuf,
    },

    /// Creating the file, its directory or its backup failed.
    #[error("Failed to write configuration file: {path}")]
    WriteError {
        /// File being written.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
