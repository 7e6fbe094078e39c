use thiserror::Error;

/// Failure taxonomy shared by all services. The string payloads carry the
/// user-facing message returned verbatim in error bodies.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed input, or a referenced record missing on a write path.
    #[error("{0}")]
    Invalid(String),
    /// Record missing on a read path.
    #[error("{0}")]
    NotFound(String),
    /// The requester does not own the record being mutated.
    #[error("{0}")]
    Forbidden(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
