//! Services Layer
//!
//! Controller operations for each catalog entity. Every operation takes the
//! shared [`AppState`](crate::infrastructure::AppState) and returns a
//! [`Page`](crate::views::Page); the axum handlers in `api` only extract
//! request data and turn the page into a response.

pub mod author_service;
pub mod book_instance_service;
pub mod book_service;
pub mod catalog_service;
pub mod genre_service;
pub mod validation;

pub use author_service::AuthorForm;
pub use book_instance_service::BookInstanceForm;
pub use book_service::BookForm;
pub use genre_service::GenreForm;
pub use validation::FieldError;
