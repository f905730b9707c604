//! Book controller operations

use validator::Validate;

use super::validation::{
    FieldError, escape, parse_id, reference_id, reference_ids, trim, violations,
};
use crate::domain::{Author, BookDraft, DomainError, Genre};
use crate::infrastructure::AppState;
use crate::views::{Page, View};

pub const LIST_URL: &str = "/catalog/books";

const AUTHOR_REQUIRED: &str = "Author must not be empty.";

/// Submitted book form.
///
/// `genre` is a multi-valued checkbox field, so the form is built from the raw
/// urlencoded pairs rather than deserialized into a struct directly.
#[derive(Debug, Default, Clone, Validate)]
pub struct BookForm {
    #[validate(length(min = 1, message = "Title must not be empty."))]
    pub title: String,
    #[validate(custom(function = "reference_id", message = "Author must not be empty."))]
    pub author: String,
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    pub summary: String,
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    pub isbn: String,
    #[validate(custom(function = "reference_ids", message = "Invalid genre"))]
    pub genre: Vec<String>,
}

impl BookForm {
    const FIELDS: &'static [&'static str] = &["title", "author", "summary", "isbn", "genre"];

    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "title" => form.title = value,
                "author" => form.author = value,
                "summary" => form.summary = value,
                "isbn" => form.isbn = value,
                "genre" => form.genre.push(value),
                _ => {}
            }
        }
        form
    }

    fn sanitize(self) -> (BookDraft, Vec<FieldError>) {
        let trimmed = Self {
            title: trim(&self.title),
            author: trim(&self.author),
            summary: trim(&self.summary),
            isbn: trim(&self.isbn),
            genre: self
                .genre
                .iter()
                .map(|g| trim(g))
                .filter(|g| !g.is_empty())
                .collect(),
        };
        let errors = violations(&trimmed, Self::FIELDS);
        let draft = BookDraft {
            title: escape(&trimmed.title),
            author_id: parse_id(&trimmed.author),
            summary: escape(&trimmed.summary),
            isbn: escape(&trimmed.isbn),
            genre_ids: trimmed.genre.iter().filter_map(|g| parse_id(g)).collect(),
        };
        (draft, errors)
    }
}

/// Checks that need the stored authors and genres: the author must exist and
/// unknown genre ids are dropped
fn check_references(
    draft: &mut BookDraft,
    errors: &mut Vec<FieldError>,
    authors: &[Author],
    genres: &[Genre],
) {
    let known_author = draft
        .author_id
        .is_some_and(|id| authors.iter().any(|a| a.id == id));
    if !known_author && !errors.iter().any(|e| e.field == "author") {
        errors.push(FieldError::new("author", AUTHOR_REQUIRED));
    }
    draft
        .genre_ids
        .retain(|id| genres.iter().any(|g| g.id == *id));
}

async fn form_page(
    state: &AppState,
    title: &'static str,
    book: BookDraft,
    errors: Vec<FieldError>,
) -> Result<Page, DomainError> {
    let (authors, genres) = tokio::try_join!(
        state.author_repo.find_all(),
        state.genre_repo.find_all()
    )?;
    Ok(Page::Render(View::BookForm {
        title,
        authors,
        genres,
        book,
        errors,
    }))
}

/// Sanitize and resolve references; `Err` carries the form to re-render
async fn accept(
    state: &AppState,
    title: &'static str,
    form: BookForm,
) -> Result<Result<BookDraft, Page>, DomainError> {
    let (mut draft, mut errors) = form.sanitize();
    let (authors, genres) = tokio::try_join!(
        state.author_repo.find_all(),
        state.genre_repo.find_all()
    )?;
    check_references(&mut draft, &mut errors, &authors, &genres);

    if errors.is_empty() {
        return Ok(Ok(draft));
    }
    // keep violations in form order
    errors.sort_by_key(|e| BookForm::FIELDS.iter().position(|f| *f == e.field));
    Ok(Err(Page::Render(View::BookForm {
        title,
        authors,
        genres,
        book: draft,
        errors,
    })))
}

/// Display list of all books
pub async fn list(state: &AppState) -> Result<Page, DomainError> {
    let book_list = state.book_repo.find_all().await?;
    Ok(Page::Render(View::BookList { book_list }))
}

/// Display detail page for a specific book
pub async fn detail(state: &AppState, id: i32) -> Result<Page, DomainError> {
    let (book, book_instances) = tokio::try_join!(
        state.book_repo.find_by_id(id),
        state.instance_repo.find_by_book(id),
    )?;
    let book = book.ok_or_else(|| DomainError::not_found("Book"))?;

    Ok(Page::Render(View::BookDetail {
        book,
        book_instances,
    }))
}

pub async fn create_form(state: &AppState) -> Result<Page, DomainError> {
    form_page(state, "Create Book", BookDraft::default(), Vec::new()).await
}

/// Handle book create
pub async fn create(state: &AppState, form: BookForm) -> Result<Page, DomainError> {
    let draft = match accept(state, "Create Book", form).await? {
        Ok(draft) => draft,
        Err(page) => return Ok(page),
    };

    let book = state.book_repo.create(draft).await?;
    tracing::info!(book_id = book.id, genres = book.genre.len(), "Book created");

    Ok(Page::Redirect(book.url()))
}

pub async fn update_form(state: &AppState, id: i32) -> Result<Page, DomainError> {
    let (book, authors, genres) = tokio::try_join!(
        state.book_repo.find_by_id(id),
        state.author_repo.find_all(),
        state.genre_repo.find_all(),
    )?;
    let book = book.ok_or_else(|| DomainError::not_found("Book"))?;

    Ok(Page::Render(View::BookForm {
        title: "Update Book",
        authors,
        genres,
        book: BookDraft::from(&book),
        errors: Vec::new(),
    }))
}

/// Handle book update
pub async fn update(state: &AppState, id: i32, form: BookForm) -> Result<Page, DomainError> {
    let draft = match accept(state, "Update Book", form).await? {
        Ok(draft) => draft,
        Err(page) => return Ok(page),
    };

    let book = state.book_repo.update(id, draft).await?;
    tracing::info!(book_id = book.id, "Book updated");

    Ok(Page::Redirect(book.url()))
}

/// Display book delete confirmation; a missing book goes back to the list
pub async fn delete_form(state: &AppState, id: i32) -> Result<Page, DomainError> {
    let (book, book_instances) = tokio::try_join!(
        state.book_repo.find_by_id(id),
        state.instance_repo.find_by_book(id),
    )?;

    match book {
        Some(book) => Ok(Page::Render(View::BookDelete {
            book,
            book_instances,
        })),
        None => Ok(Page::Redirect(LIST_URL.to_string())),
    }
}

/// Handle book delete; refused while copies of the book exist
pub async fn delete(state: &AppState, id: i32) -> Result<Page, DomainError> {
    let (book, book_instances) = tokio::try_join!(
        state.book_repo.find_by_id(id),
        state.instance_repo.find_by_book(id),
    )?;

    let Some(book) = book else {
        return Ok(Page::Redirect(LIST_URL.to_string()));
    };

    if !book_instances.is_empty() {
        tracing::warn!(
            book_id = id,
            copies = book_instances.len(),
            "Book delete blocked by existing copies"
        );
        return Ok(Page::Render(View::BookDelete {
            book,
            book_instances,
        }));
    }

    state.book_repo.delete(id).await?;
    tracing::info!(book_id = id, "Book deleted");

    Ok(Page::Redirect(LIST_URL.to_string()))
}
