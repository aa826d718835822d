use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PkmError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid priority '{0}' (expected high, medium or low)")]
    InvalidPriority(String),

    #[error("Invalid timestamp in field '{field}': {value}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("Data file {} is corrupt: {source}", path.display())]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not allocate an unused id with prefix '{0}'")]
    IdSpaceExhausted(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PkmError>;
