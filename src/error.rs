//! Claim Audit error types

use std::path::PathBuf;
use thiserror::Error;

/// Claim Audit error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required input file does not exist
    #[error("File not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// A table is missing one of its required columns
    #[error("{table}: missing required column '{column}'")]
    MissingColumn {
        /// Table the column was expected in
        table: String,
        /// Header name that was not found
        column: String,
    },

    /// CSV decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Claim Audit operations
pub type Result<T> = std::result::Result<T, Error>;
