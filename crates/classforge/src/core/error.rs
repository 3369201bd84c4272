//! Core error types for code generation
//!
//! This module defines the error types used throughout the generation pipeline.
//! Only whole-diagram failures become errors; malformed lines are skipped by the
//! parser and never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Core error types for code generation
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("No mermaid class diagram found in input")]
    NoDiagram,

    #[error("Class diagram contains no class declarations")]
    EmptyDiagram,

    #[error("Emit error: {message}")]
    EmitError { message: String },

    #[error("Config error: {message}")]
    ConfigError { message: String },

    #[error("Refusing to write '{file_name}': not a plain file name")]
    UnsafeFileName { file_name: String },

    #[error("IO error at {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    /// Create a new emit error
    pub fn emit_error(message: String) -> Self {
        Self::EmitError { message }
    }

    /// Create a new config error
    pub fn config_error(message: String) -> Self {
        Self::ConfigError { message }
    }

    /// Create a new unsafe file name error
    pub fn unsafe_file_name(file_name: impl Into<String>) -> Self {
        Self::UnsafeFileName {
            file_name: file_name.into(),
        }
    }

    /// Wrap an IO error with the path it happened on
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }
}
