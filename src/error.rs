//! Error types for markdeco

use thiserror::Error;

/// Result type alias for markdeco operations
pub type Result<T> = std::result::Result<T, DecorError>;

/// Decoration engine error types
///
/// Tokenizing and projecting never fail; these cover grammar construction,
/// configuration and the binary's I/O.
#[derive(Error, Debug)]
pub enum DecorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: fancy_regex::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("No such grammar: {0}")]
    UnknownGrammar(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
