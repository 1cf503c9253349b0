use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub title: String,
    pub description: String,
}

impl FieldError {
    pub fn new(field: &str, title: impl Into<String>, description: impl Into<String>) -> Self {
        FieldError {
            field: field.to_string(),
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum TripError {
    /// A request field failed validation
    #[error("Invalid input for field `{0}`: {1:?}")]
    InvalidInput(String, FieldError),

    /// A currency amount could not be represented
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Expense with given ID not found
    #[error("Expense {0} not found")]
    ExpenseNotFound(String),

    /// Participant with given ID not found
    #[error("Participant {0} not found")]
    ParticipantNotFound(String),

    /// The document store failed to read or write
    #[error("Storage error: {0}")]
    StorageError(String),

    /// A stored document did not match the expected shape
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Action log failure
    #[error("Logging error: {0}")]
    LoggingError(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl From<serde_json::Error> for TripError {
    fn from(err: serde_json::Error) -> Self {
        TripError::SerializationError(err.to_string())
    }
}
