//! Domain errors

use thiserror::Error;

/// Domain-level error taxonomy.
///
/// Every failure a caller can observe maps onto exactly one variant;
/// the HTTP layer turns the variant into a status code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Malformed, missing or out-of-range input. Carries the first violation only.
    #[error("{0}")]
    Validation(String),

    #[error("{entity} not found")]
    NotFound { entity: &'static str, id: String },

    /// Missing, invalid or expired credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated identity whose account has been deactivated.
    #[error("Account is inactive")]
    AccountInactive,

    /// Authenticated but not permitted.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    /// Storage or other unexpected failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
