//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{AuthorRepository, BookInstanceRepository, BookRepository, GenreRepository};
use crate::infrastructure::{
    SeaOrmAuthorRepository, SeaOrmBookInstanceRepository, SeaOrmBookRepository,
    SeaOrmGenreRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Genre repository
    pub genre_repo: Arc<dyn GenreRepository>,
    /// Author repository
    pub author_repo: Arc<dyn AuthorRepository>,
    /// Book repository
    pub book_repo: Arc<dyn BookRepository>,
    /// Book instance repository
    pub instance_repo: Arc<dyn BookInstanceRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            genre_repo: Arc::new(SeaOrmGenreRepository::new(db.clone())),
            author_repo: Arc::new(SeaOrmAuthorRepository::new(db.clone())),
            book_repo: Arc::new(SeaOrmBookRepository::new(db.clone())),
            instance_repo: Arc::new(SeaOrmBookInstanceRepository::new(db)),
        }
    }
}
