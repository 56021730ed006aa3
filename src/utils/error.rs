//! Error types for the batch sizer.
//!
//! Decision operations never surface these; they are returned by the fallible
//! collaborators (stores, probes, settings loading) and absorbed by the core.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use serde::Serialize;

/// Configuration store errors.
#[derive(Error, Debug, Serialize)]
pub enum StoreError {
    /// Backing file could not be read or written
    #[error("IO error on {path}: {message}")]
    IO { path: PathBuf, message: String },
    /// Backing file exists but is not a JSON object
    #[error("Corrupt store {0}: {1}")]
    Corrupt(PathBuf, String),
    /// The store refused the write
    #[error("Write rejected for key {0}")]
    Rejected(String),
    /// Lock poisoned by a panicking writer
    #[error("Store state is corrupted")]
    Poisoned,
}

/// Memory telemetry errors.
#[derive(Error, Debug, Serialize)]
pub enum ProbeError {
    /// Probe could not read memory counters
    #[error("Telemetry unavailable: {0}")]
    Unavailable(String),
    /// Probe returned numbers that cannot form a sample
    #[error("Malformed sample: {0}")]
    Malformed(String),
}

/// Settings loading errors.
#[derive(Error, Debug, Serialize)]
pub enum ConfigError {
    #[error("Failed to read settings {0}: {1}")]
    Read(PathBuf, String),
    #[error("Failed to parse settings {0}: {1}")]
    Parse(PathBuf, String),
}

/// Convenience result types.
pub type StoreResult<T> = Result<T, StoreError>;
pub type ProbeResult<T> = Result<T, ProbeError>;

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        Self::IO { path: path.into(), message: err.to_string() }
    }

    pub fn corrupt(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Corrupt(path.into(), msg.into())
    }
}

impl ProbeError {
    pub fn unavailable<T: Into<String>>(msg: T) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn malformed<T: Into<String>>(msg: T) -> Self {
        Self::Malformed(msg.into())
    }
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StoreError::Poisoned
    }
}
