use thiserror::Error;

/// Failure to turn model output into domain records.
///
/// Decoding is all-or-nothing: one bad element fails the whole batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Failed to parse AI response: {0}")]
    MalformedPayload(String),

    #[error("Failed to parse AI response: element {index} is missing field `{field}`")]
    MissingField { index: usize, field: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("No response from the AI service")]
    NoResponse,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("{0}")]
    Persistence(String),

    #[error("Object storage error: {0}")]
    ObjectStorage(String),

    #[error("{0}")]
    Validation(String),

    #[error("AI service error: {0}")]
    ExternalService(String),

    #[error("Not found")]
    NotFound,

    #[error("You need to be signed in")]
    Unauthenticated,
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }
}
