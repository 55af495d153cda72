// Reelrank Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReelRankError {
    #[error("Invalid timecode '{input}': {reason}")]
    Timecode { input: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input file not found: {0}")]
    FileNotFound(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, ReelRankError>;
