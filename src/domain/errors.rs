//! Domain error types
//!
//! These errors are framework-agnostic and represent business-level failures.
//! Validation problems and blocked deletions are not errors: controllers
//! handle them by re-rendering a page.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Requested entity id does not resolve to a stored record
    #[error("{0} not found")]
    NotFound(String),
    /// A uniqueness constraint rejected the write
    #[error("{0} already exists")]
    Duplicate(String),
    /// Database/persistence error
    #[error("Database error: {0}")]
    Database(String),
    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(what: impl Into<String>) -> Self {
        DomainError::NotFound(what.into())
    }
}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_the_entity() {
        assert_eq!(DomainError::not_found("Genre").to_string(), "Genre not found");
    }

    #[test]
    fn test_db_errors_become_database_variant() {
        let err: DomainError = sea_orm::DbErr::Custom("disk full".to_string()).into();
        assert!(matches!(err, DomainError::Database(msg) if msg.contains("disk full")));
    }
}
