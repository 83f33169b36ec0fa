//! Domain errors

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Menu node not found: {0}")]
    MenuNodeNotFound(Uuid),

    #[error("Permission not found: {0}")]
    PermissionNotFound(Uuid),

    #[error("Role not found: {0}")]
    RoleNotFound(Uuid),

    #[error("Menu code already exists: {0}")]
    MenuCodeAlreadyExists(String),

    #[error("Move rejected: {drag_id} would become a descendant of itself")]
    CycleRejected { drag_id: Uuid },

    #[error("Concurrent modification detected; refetch and retry")]
    ConflictStale,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error during {operation}: {message}")]
    DatabaseError { operation: String, message: String },

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn database(operation: &str, message: impl Into<String>) -> Self {
        Self::DatabaseError {
            operation: operation.to_string(),
            message: message.into(),
        }
    }

    /// Stale-conflict errors are worth an automatic refetch-and-retry by the
    /// caller; everything else is not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConflictStale)
    }
}
