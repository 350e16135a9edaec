//! Centralized error types for the mfr project
//!
//! This module defines all error types used across the project,
//! providing a unified error handling interface.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while installing plugin requirements
#[derive(Error, Debug)]
pub enum InstallError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Extensions root not found: {}", .0.display())]
    ExtensionsRootNotFound(PathBuf),

    #[error("pip is not installed: {0}")]
    PipNotFound(String),

    #[error("Failed to run pip install for '{file}': {source}")]
    InstallerSpawn {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("pip install failed for '{file}': exit code {code}")]
    InstallerFailed { file: String, code: i32 },

    #[error("Invalid configuration: {0}")]
    Config(String),
}
