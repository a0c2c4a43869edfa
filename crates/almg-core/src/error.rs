use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlmgError {
    #[error("Invalid coordinate: {axis}={value} (expected a number in [0, 1])")]
    InvalidCoordinate { axis: char, value: f64 },

    #[error("Malformed session: {0}")]
    MalformedSession(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to write {}: {source}", path.display())]
    FileWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AlmgError>;
