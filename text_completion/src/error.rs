use thiserror::Error;

/// Coarse classification of a [`CompletionError`], for callers that want to
/// branch without matching on the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Transport,
    Decode,
}

#[derive(Debug, Error)]
pub enum CompletionError {
    /// The submission was rejected before anything was sent.
    #[error("{0}")]
    Validation(String),

    /// The endpoint could not be reached, refused the request, or reported
    /// a failure while streaming.
    #[error("{0}")]
    Transport(String),

    /// The endpoint answered with bytes we could not make sense of.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl CompletionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CompletionError::Validation(_) => ErrorKind::Validation,
            CompletionError::Transport(_) => ErrorKind::Transport,
            CompletionError::Decode(_) => ErrorKind::Decode,
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("chunk is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("chunk is not a valid record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed payload: {0}")]
    Payload(String),
}
