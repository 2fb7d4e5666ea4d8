use thiserror::Error;

use models::errors::ModelError;

/// Business errors for customer workflows
#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("customer {0} not found")]
    NotFound(i64),
    #[error("storage error: {0}")]
    Storage(String),
}

impl CustomerError {
    pub fn email_taken(email: &str) -> Self {
        Self::Conflict(format!("email already registered: {}", email))
    }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            CustomerError::Validation(_) => 1001,
            CustomerError::Conflict(_) => 1002,
            CustomerError::NotFound(_) => 1003,
            CustomerError::Storage(_) => 1200,
        }
    }
}

impl From<ModelError> for CustomerError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => CustomerError::Validation(msg),
            ModelError::Conflict(msg) => CustomerError::Conflict(msg),
            ModelError::Db(msg) => CustomerError::Storage(msg),
        }
    }
}
