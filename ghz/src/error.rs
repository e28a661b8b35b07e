// src/error.rs

/// Everything that can go wrong while generating or scoring a GHZ benchmark.
///
/// None of these are retried: a failure aborts the current call and the
/// caller gets no partial result.
#[derive(thiserror::Error, Debug)]
pub enum GhzError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("Type mismatch: expected {expected}, received {received}")]
    TypeMismatch {
        expected: &'static str,
        received: String,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GhzError>;
