use thiserror::Error;

#[derive(Error, Debug)]
pub enum RsvpError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Object store error: {0}")]
    ObjectStore(eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(Box<dyn std::error::Error + Send + Sync>),
}

/// Coarse classification callers branch on instead of matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    BadRequest,
    Internal,
}

impl RsvpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RsvpError::NotFound(_) => ErrorKind::NotFound,
            RsvpError::Conflict(_) => ErrorKind::Conflict,
            RsvpError::BadRequest(_) => ErrorKind::BadRequest,
            RsvpError::Database(_) | RsvpError::ObjectStore(_) | RsvpError::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }

    pub(crate) fn bad_request(message: impl Into<String>) -> Self {
        RsvpError::BadRequest(message.into())
    }
}

pub type RsvpResult<T> = Result<T, RsvpError>;
