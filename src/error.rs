//! Error types for the todotxt crate.
//!
//! Parsing a line never fails; these cover the field lookup accessor, the
//! storage boundary, and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by [`crate::task::Task`] accessors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaskError {
    /// The field name is neither a known task field nor an `attr_<key>` name.
    #[error("unknown task field: {0}")]
    UnknownField(String),
}

/// Errors from reading or writing a todo.txt file.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temporary file was written but could not be moved over the target.
    /// The original target is left untouched.
    #[error("failed to replace {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("content is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
}

/// Errors from loading the user configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the user config directory")]
    NoConfigDir,

    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;
