use thiserror::Error;

/// Errors raised while decoding client-held progress.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    #[error("malformed progress cookie: {0}")]
    MalformedProgress(#[from] serde_json::Error),
}

/// Errors raised while reading a stored question payload.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("malformed question for key {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
