use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed weight on line {line}: {text:?}")]
    MalformedWeight { line: usize, text: String },

    #[error("Expected {expected} weights, found {found}")]
    WeightCount { expected: usize, found: usize },

    #[error("The dimensions have to be equal! ({weights} weights vs {features} features)")]
    DimensionMismatch { weights: usize, features: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AgentError>;
