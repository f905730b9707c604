//! Book instance (copy) controller operations

use serde::Deserialize;
use validator::Validate;

use super::validation::{
    FieldError, book_status, escape, optional_iso_date, parse_date, parse_id, reference_id, trim,
    violations,
};
use crate::domain::{BookInstanceDraft, BookRef, DomainError};
use crate::infrastructure::AppState;
use crate::views::{Page, View};

pub const LIST_URL: &str = "/catalog/bookinstances";

const BOOK_REQUIRED: &str = "Book must be specified";

/// Submitted book instance form
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct BookInstanceForm {
    #[serde(default)]
    #[validate(custom(function = "reference_id", message = "Book must be specified"))]
    pub book: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    pub imprint: String,
    #[serde(default)]
    #[validate(custom(function = "book_status", message = "Invalid status"))]
    pub status: String,
    #[serde(default)]
    #[validate(custom(function = "optional_iso_date", message = "Invalid date"))]
    pub due_back: String,
}

impl BookInstanceForm {
    const FIELDS: &'static [&'static str] = &["book", "imprint", "status", "due_back"];

    fn sanitize(self) -> (BookInstanceDraft, Vec<FieldError>) {
        let trimmed = Self {
            book: trim(&self.book),
            imprint: trim(&self.imprint),
            status: trim(&self.status),
            due_back: trim(&self.due_back),
        };
        let errors = violations(&trimmed, Self::FIELDS);
        let draft = BookInstanceDraft {
            book_id: parse_id(&trimmed.book),
            imprint: escape(&trimmed.imprint),
            status: trimmed.status.parse().unwrap_or_default(),
            due_back: parse_date(&trimmed.due_back),
        };
        (draft, errors)
    }
}

async fn book_list(state: &AppState) -> Result<Vec<BookRef>, DomainError> {
    let books = state.book_repo.find_all().await?;
    Ok(books.iter().map(BookRef::from).collect())
}

fn form_page(
    title: &'static str,
    book_list: Vec<BookRef>,
    bookinstance: BookInstanceDraft,
    errors: Vec<FieldError>,
) -> Page {
    Page::Render(View::BookInstanceForm {
        title,
        book_list,
        selected_book: bookinstance.book_id,
        bookinstance,
        errors,
    })
}

/// Sanitize and check the book exists; `Err` carries the form to re-render
async fn accept(
    state: &AppState,
    title: &'static str,
    form: BookInstanceForm,
) -> Result<Result<BookInstanceDraft, Page>, DomainError> {
    let (draft, mut errors) = form.sanitize();
    let books = book_list(state).await?;

    let known_book = draft
        .book_id
        .is_some_and(|id| books.iter().any(|b| b.id == id));
    if !known_book && !errors.iter().any(|e| e.field == "book") {
        errors.insert(0, FieldError::new("book", BOOK_REQUIRED));
    }

    if errors.is_empty() {
        Ok(Ok(draft))
    } else {
        Ok(Err(form_page(title, books, draft, errors)))
    }
}

/// Display list of all book copies
pub async fn list(state: &AppState) -> Result<Page, DomainError> {
    let bookinstance_list = state.instance_repo.find_all().await?;
    Ok(Page::Render(View::BookInstanceList { bookinstance_list }))
}

/// Display detail page for a specific copy
pub async fn detail(state: &AppState, id: i32) -> Result<Page, DomainError> {
    let bookinstance = state
        .instance_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Book copy"))?;

    Ok(Page::Render(View::BookInstanceDetail { bookinstance }))
}

pub async fn create_form(state: &AppState) -> Result<Page, DomainError> {
    let books = book_list(state).await?;
    Ok(form_page(
        "Create BookInstance",
        books,
        BookInstanceDraft::default(),
        Vec::new(),
    ))
}

/// Handle copy create
pub async fn create(state: &AppState, form: BookInstanceForm) -> Result<Page, DomainError> {
    let draft = match accept(state, "Create BookInstance", form).await? {
        Ok(draft) => draft,
        Err(page) => return Ok(page),
    };

    let instance = state.instance_repo.create(draft).await?;
    tracing::info!(
        instance_id = instance.id,
        book_id = instance.book.id,
        status = instance.status.as_str(),
        "Book copy created"
    );

    Ok(Page::Redirect(instance.url()))
}

pub async fn update_form(state: &AppState, id: i32) -> Result<Page, DomainError> {
    let (instance, books) = tokio::try_join!(state.instance_repo.find_by_id(id), book_list(state))?;
    let instance = instance.ok_or_else(|| DomainError::not_found("Book copy"))?;

    Ok(form_page(
        "Update BookInstance",
        books,
        BookInstanceDraft::from(&instance),
        Vec::new(),
    ))
}

/// Handle copy update
pub async fn update(
    state: &AppState,
    id: i32,
    form: BookInstanceForm,
) -> Result<Page, DomainError> {
    let draft = match accept(state, "Update BookInstance", form).await? {
        Ok(draft) => draft,
        Err(page) => return Ok(page),
    };

    let instance = state.instance_repo.update(id, draft).await?;
    tracing::info!(instance_id = instance.id, "Book copy updated");

    Ok(Page::Redirect(instance.url()))
}

/// Display copy delete confirmation; a missing copy goes back to the list
pub async fn delete_form(state: &AppState, id: i32) -> Result<Page, DomainError> {
    match state.instance_repo.find_by_id(id).await? {
        Some(bookinstance) => Ok(Page::Render(View::BookInstanceDelete { bookinstance })),
        None => Ok(Page::Redirect(LIST_URL.to_string())),
    }
}

/// Handle copy delete; copies have no dependents
pub async fn delete(state: &AppState, id: i32) -> Result<Page, DomainError> {
    if state.instance_repo.find_by_id(id).await?.is_none() {
        return Ok(Page::Redirect(LIST_URL.to_string()));
    }

    state.instance_repo.delete(id).await?;
    tracing::info!(instance_id = id, "Book copy deleted");

    Ok(Page::Redirect(LIST_URL.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BookStatus;

    fn form(book: &str, imprint: &str, status: &str, due_back: &str) -> BookInstanceForm {
        BookInstanceForm {
            book: book.to_string(),
            imprint: imprint.to_string(),
            status: status.to_string(),
            due_back: due_back.to_string(),
        }
    }

    #[test]
    fn test_empty_status_defaults_to_maintenance() {
        let (draft, errors) = form("3", " Gollancz, 2011 ", "", "").sanitize();
        assert!(errors.is_empty());
        assert_eq!(draft.status, BookStatus::Maintenance);
        assert_eq!(draft.imprint, "Gollancz, 2011");
        assert_eq!(draft.book_id, Some(3));
        assert_eq!(draft.due_back, None);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let (_, errors) = form("", "", "Lost", "tomorrow").sanitize();
        assert_eq!(
            errors,
            vec![
                FieldError::new("book", BOOK_REQUIRED),
                FieldError::new("imprint", "Imprint must be specified"),
                FieldError::new("status", "Invalid status"),
                FieldError::new("due_back", "Invalid date"),
            ]
        );
    }
}
