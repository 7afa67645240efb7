//! Error types for netql operations.

/// A query that does not match the placement grammar.
///
/// Every grammar failure surfaces as this one error; the input is kept for
/// diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cant parse query: {input:?}")]
pub struct ParseError {
    input: String,
}

impl ParseError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// The query text that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Query too long: {len} bytes (limit {max})")]
    QueryTooLong { len: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
