/// Error types for the client data layer
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Transient transport failure. The mock layer never produces one,
    /// but callers must handle it: a real backend can drop any call.
    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
