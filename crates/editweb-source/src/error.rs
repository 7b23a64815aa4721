//! Error types for editweb-source

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Record source not found: {location}")]
    NotFound { location: String },

    #[error("Malformed records in {location}: {message}")]
    Malformed { location: String, message: String },

    #[error("IO error")]
    IoError(#[from] io::Error),
}
