//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;
use super::entities::{
    Author, AuthorDraft, Book, BookDraft, BookInstance, BookInstanceDraft, BookStatus, Genre,
    GenreDraft,
};

/// Repository trait for Genre entity
#[async_trait]
pub trait GenreRepository: Send + Sync {
    /// Find all genres ordered by name
    async fn find_all(&self) -> Result<Vec<Genre>, DomainError>;

    /// Find a genre by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, DomainError>;

    /// Find a genre by its exact name
    async fn find_by_name(&self, name: &str) -> Result<Option<Genre>, DomainError>;

    /// Create a new genre; `DomainError::Duplicate` if the name is taken
    async fn create(&self, draft: GenreDraft) -> Result<Genre, DomainError>;

    /// Overwrite a genre; `DomainError::Duplicate` if the new name is taken
    async fn update(&self, id: i32, draft: GenreDraft) -> Result<Genre, DomainError>;

    /// Delete a genre by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

/// Repository trait for Author entity
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Find all authors ordered by family name, then first name
    async fn find_all(&self) -> Result<Vec<Author>, DomainError>;

    /// Find an author by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, DomainError>;

    /// Create a new author
    async fn create(&self, draft: AuthorDraft) -> Result<Author, DomainError>;

    /// Overwrite an author
    async fn update(&self, id: i32, draft: AuthorDraft) -> Result<Author, DomainError>;

    /// Delete an author by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

/// Repository trait for Book entity. Books come back with author and genres populated.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Find all books ordered by title
    async fn find_all(&self) -> Result<Vec<Book>, DomainError>;

    /// Find a single book by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Books tagged with the given genre
    async fn find_by_genre(&self, genre_id: i32) -> Result<Vec<Book>, DomainError>;

    /// Books written by the given author
    async fn find_by_author(&self, author_id: i32) -> Result<Vec<Book>, DomainError>;

    /// Create a new book and its genre links
    async fn create(&self, draft: BookDraft) -> Result<Book, DomainError>;

    /// Overwrite a book and replace its genre links
    async fn update(&self, id: i32, draft: BookDraft) -> Result<Book, DomainError>;

    /// Delete a book by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

/// Repository trait for BookInstance entity. Instances carry their book reference.
#[async_trait]
pub trait BookInstanceRepository: Send + Sync {
    /// Find all instances
    async fn find_all(&self) -> Result<Vec<BookInstance>, DomainError>;

    /// Find an instance by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<BookInstance>, DomainError>;

    /// Copies of a specific book
    async fn find_by_book(&self, book_id: i32) -> Result<Vec<BookInstance>, DomainError>;

    /// Create a new instance
    async fn create(&self, draft: BookInstanceDraft) -> Result<BookInstance, DomainError>;

    /// Overwrite an instance
    async fn update(&self, id: i32, draft: BookInstanceDraft)
    -> Result<BookInstance, DomainError>;

    /// Delete an instance by ID
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;

    async fn count_by_status(&self, status: BookStatus) -> Result<u64, DomainError>;
}
