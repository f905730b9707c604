//! HTTP surface: axum handlers that extract request data, call the matching
//! controller operation and turn its [`Page`](crate::views::Page) into a
//! response.

pub mod author;
pub mod book;
pub mod book_instance;
pub mod catalog;
pub mod error;
pub mod genre;
pub mod health;

use axum::{Router, routing::get};

use crate::infrastructure::AppState;

pub use error::AppError;

/// Catalog routes, including the `/` redirect and the health probe
pub fn catalog_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(catalog::home))
        .route("/health", get(health::health_check))
        .route("/catalog", get(catalog::index))
        // Genres
        .route("/catalog/genres", get(genre::list))
        .route(
            "/catalog/genre/create",
            get(genre::create_form).post(genre::create),
        )
        .route("/catalog/genre/:id", get(genre::detail))
        .route(
            "/catalog/genre/:id/update",
            get(genre::update_form).post(genre::update),
        )
        .route(
            "/catalog/genre/:id/delete",
            get(genre::delete_form).post(genre::delete),
        )
        // Authors
        .route("/catalog/authors", get(author::list))
        .route(
            "/catalog/author/create",
            get(author::create_form).post(author::create),
        )
        .route("/catalog/author/:id", get(author::detail))
        .route(
            "/catalog/author/:id/update",
            get(author::update_form).post(author::update),
        )
        .route(
            "/catalog/author/:id/delete",
            get(author::delete_form).post(author::delete),
        )
        // Books
        .route("/catalog/books", get(book::list))
        .route(
            "/catalog/book/create",
            get(book::create_form).post(book::create),
        )
        .route("/catalog/book/:id", get(book::detail))
        .route(
            "/catalog/book/:id/update",
            get(book::update_form).post(book::update),
        )
        .route(
            "/catalog/book/:id/delete",
            get(book::delete_form).post(book::delete),
        )
        // Book instances
        .route("/catalog/bookinstances", get(book_instance::list))
        .route(
            "/catalog/bookinstance/create",
            get(book_instance::create_form).post(book_instance::create),
        )
        .route("/catalog/bookinstance/:id", get(book_instance::detail))
        .route(
            "/catalog/bookinstance/:id/update",
            get(book_instance::update_form).post(book_instance::update),
        )
        .route(
            "/catalog/bookinstance/:id/delete",
            get(book_instance::delete_form).post(book_instance::delete),
        )
        .with_state(state)
}
