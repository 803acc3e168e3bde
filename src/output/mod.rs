//! Output module for persisting and summarizing catalog documents
//!
//! This module handles:
//! - Writing the catalog document as a timestamped JSON file
//! - Formatting the per-series console summary

mod json;
mod summary;

pub use json::{output_filename, write_document};
pub use summary::{format_summary, print_summary, PREVIEW_VARIANTS};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output: {0}")]
    Write(String),

    #[error("Failed to serialize document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
