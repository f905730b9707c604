//! HTML rendering.
//!
//! Controllers produce a [`Page`]: either a [`View`] carrying exactly the data
//! its template needs, or a redirect. Templates are maud markup.
//!
//! Entity strings are stored escaped by the validation layer, so templates
//! emit them with [`stored`] instead of escaping them a second time.

mod author;
mod book;
mod book_instance;
mod catalog;
mod genre;
mod layout;

use maud::{Markup, PreEscaped};

use crate::domain::{
    Author, AuthorDraft, Book, BookDraft, BookInstance, BookInstanceDraft, BookRef, CatalogCounts,
    Genre, GenreDraft,
};
use crate::services::validation::FieldError;

pub use layout::error_page;

/// Result of a controller operation
#[derive(Debug)]
pub enum Page {
    Render(View),
    Redirect(String),
}

#[derive(Debug)]
pub enum View {
    Index {
        counts: CatalogCounts,
    },
    GenreList {
        genre_list: Vec<Genre>,
    },
    GenreDetail {
        genre: Genre,
        genre_books: Vec<Book>,
    },
    GenreForm {
        title: &'static str,
        genre: GenreDraft,
        errors: Vec<FieldError>,
    },
    GenreDelete {
        genre: Genre,
        genre_books: Vec<Book>,
    },
    AuthorList {
        author_list: Vec<Author>,
    },
    AuthorDetail {
        author: Author,
        author_books: Vec<Book>,
    },
    AuthorForm {
        title: &'static str,
        author: AuthorDraft,
        errors: Vec<FieldError>,
    },
    AuthorDelete {
        author: Author,
        author_books: Vec<Book>,
    },
    BookList {
        book_list: Vec<Book>,
    },
    BookDetail {
        book: Book,
        book_instances: Vec<BookInstance>,
    },
    BookForm {
        title: &'static str,
        authors: Vec<Author>,
        genres: Vec<Genre>,
        book: BookDraft,
        errors: Vec<FieldError>,
    },
    BookDelete {
        book: Book,
        book_instances: Vec<BookInstance>,
    },
    BookInstanceList {
        bookinstance_list: Vec<BookInstance>,
    },
    BookInstanceDetail {
        bookinstance: BookInstance,
    },
    BookInstanceForm {
        title: &'static str,
        book_list: Vec<BookRef>,
        selected_book: Option<i32>,
        bookinstance: BookInstanceDraft,
        errors: Vec<FieldError>,
    },
    BookInstanceDelete {
        bookinstance: BookInstance,
    },
}

impl View {
    /// Template name
    pub fn name(&self) -> &'static str {
        match self {
            View::Index { .. } => "index",
            View::GenreList { .. } => "genre_list",
            View::GenreDetail { .. } => "genre_detail",
            View::GenreForm { .. } => "genre_form",
            View::GenreDelete { .. } => "genre_delete",
            View::AuthorList { .. } => "author_list",
            View::AuthorDetail { .. } => "author_detail",
            View::AuthorForm { .. } => "author_form",
            View::AuthorDelete { .. } => "author_delete",
            View::BookList { .. } => "book_list",
            View::BookDetail { .. } => "book_detail",
            View::BookForm { .. } => "book_form",
            View::BookDelete { .. } => "book_delete",
            View::BookInstanceList { .. } => "bookinstance_list",
            View::BookInstanceDetail { .. } => "bookinstance_detail",
            View::BookInstanceForm { .. } => "bookinstance_form",
            View::BookInstanceDelete { .. } => "bookinstance_delete",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Index { .. } => "Local Library Home",
            View::GenreList { .. } => "Genre List",
            View::GenreDetail { .. } => "Genre Detail",
            View::GenreDelete { .. } => "Delete Genre",
            View::AuthorList { .. } => "Author List",
            View::AuthorDetail { .. } => "Author Detail",
            View::AuthorDelete { .. } => "Delete Author",
            View::BookList { .. } => "Book List",
            View::BookDetail { .. } => "Book Detail",
            View::BookDelete { .. } => "Delete Book",
            View::BookInstanceList { .. } => "Book Instance List",
            View::BookInstanceDetail { .. } => "Book Instance Detail",
            View::BookInstanceDelete { .. } => "Delete BookInstance",
            View::GenreForm { title, .. }
            | View::AuthorForm { title, .. }
            | View::BookForm { title, .. }
            | View::BookInstanceForm { title, .. } => *title,
        }
    }

    /// Violations attached to a form view; empty for every other view
    pub fn errors(&self) -> &[FieldError] {
        match self {
            View::GenreForm { errors, .. }
            | View::AuthorForm { errors, .. }
            | View::BookForm { errors, .. }
            | View::BookInstanceForm { errors, .. } => errors.as_slice(),
            _ => &[],
        }
    }

    pub fn render(&self) -> Markup {
        let title = self.title();
        let body = match self {
            View::Index { counts } => catalog::index(counts),
            View::GenreList { genre_list } => genre::list(genre_list),
            View::GenreDetail { genre, genre_books } => genre::detail(genre, genre_books),
            View::GenreForm { genre, errors, .. } => genre::form(genre, errors),
            View::GenreDelete { genre, genre_books } => genre::delete(genre, genre_books),
            View::AuthorList { author_list } => author::list(author_list),
            View::AuthorDetail {
                author,
                author_books,
            } => author::detail(author, author_books),
            View::AuthorForm { author, errors, .. } => author::form(author, errors),
            View::AuthorDelete {
                author,
                author_books,
            } => author::delete(author, author_books),
            View::BookList { book_list } => book::list(book_list),
            View::BookDetail {
                book,
                book_instances,
            } => book::detail(book, book_instances),
            View::BookForm {
                authors,
                genres,
                book,
                errors,
                ..
            } => book::form(authors, genres, book, errors),
            View::BookDelete {
                book,
                book_instances,
            } => book::delete(book, book_instances),
            View::BookInstanceList { bookinstance_list } => book_instance::list(bookinstance_list),
            View::BookInstanceDetail { bookinstance } => book_instance::detail(bookinstance),
            View::BookInstanceForm {
                book_list,
                selected_book,
                bookinstance,
                errors,
                ..
            } => book_instance::form(book_list, *selected_book, bookinstance, errors),
            View::BookInstanceDelete { bookinstance } => book_instance::delete(bookinstance),
        };
        layout::page(title, body)
    }
}

/// Emit a value that was escaped before it was stored
pub(crate) fn stored(value: &str) -> PreEscaped<&str> {
    PreEscaped(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_views_expose_their_violations() {
        let view = View::GenreForm {
            title: "Create Genre",
            genre: GenreDraft::default(),
            errors: vec![FieldError::new("name", "Genre name required")],
        };

        assert_eq!(view.name(), "genre_form");
        assert_eq!(view.errors().len(), 1);
        assert!(
            view.render()
                .into_string()
                .contains(r#"<li data-field="name">Genre name required</li>"#)
        );
    }

    #[test]
    fn test_non_form_views_have_no_violations() {
        let view = View::GenreList {
            genre_list: Vec::new(),
        };

        assert!(view.errors().is_empty());
        assert_eq!(view.title(), "Genre List");
    }
}
