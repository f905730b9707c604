//! Repository implementations using SeaORM

pub mod author_repository;
pub mod book_instance_repository;
pub mod book_repository;
pub mod genre_repository;

pub use author_repository::SeaOrmAuthorRepository;
pub use book_instance_repository::SeaOrmBookInstanceRepository;
pub use book_repository::SeaOrmBookRepository;
pub use genre_repository::SeaOrmGenreRepository;

use sea_orm::{DbErr, SqlErr};

use crate::domain::DomainError;

/// Map a failed write, turning unique-constraint violations into `Duplicate`
pub(crate) fn write_error(entity: &str, e: DbErr) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::Duplicate(entity.to_string()),
        _ => DomainError::from(e),
    }
}

pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
