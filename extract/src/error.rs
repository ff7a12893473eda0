use thiserror::Error;

/// Errors returned by extractor and oracle calls.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("extract: empty image")]
    EmptyInput,

    #[error("extract: API error: {0}")]
    Api(String),

    #[error("extract: oracle comparison failed: {0}")]
    Oracle(String),
}
