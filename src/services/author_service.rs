//! Author controller operations

use serde::Deserialize;
use validator::Validate;

use super::validation::{
    FieldError, alphanumeric, escape, optional_iso_date, parse_date, trim, violations,
};
use crate::domain::{AuthorDraft, DomainError};
use crate::infrastructure::AppState;
use crate::views::{Page, View};

pub const LIST_URL: &str = "/catalog/authors";

/// Submitted author form
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct AuthorForm {
    #[serde(default)]
    #[validate(
        length(min = 1, max = 100, message = "First name must be specified."),
        custom(
            function = "alphanumeric",
            message = "First name has non-alphanumeric characters."
        )
    )]
    pub first_name: String,
    #[serde(default)]
    #[validate(
        length(min = 1, max = 100, message = "Family name must be specified."),
        custom(
            function = "alphanumeric",
            message = "Family name has non-alphanumeric characters."
        )
    )]
    pub family_name: String,
    #[serde(default)]
    #[validate(custom(function = "optional_iso_date", message = "Invalid date of birth"))]
    pub date_of_birth: String,
    #[serde(default)]
    #[validate(custom(function = "optional_iso_date", message = "Invalid date of death"))]
    pub date_of_death: String,
}

impl AuthorForm {
    const FIELDS: &'static [&'static str] =
        &["first_name", "family_name", "date_of_birth", "date_of_death"];

    fn sanitize(self) -> (AuthorDraft, Vec<FieldError>) {
        let trimmed = Self {
            first_name: trim(&self.first_name),
            family_name: trim(&self.family_name),
            date_of_birth: trim(&self.date_of_birth),
            date_of_death: trim(&self.date_of_death),
        };
        let errors = violations(&trimmed, Self::FIELDS);
        let draft = AuthorDraft {
            first_name: escape(&trimmed.first_name),
            family_name: escape(&trimmed.family_name),
            date_of_birth: parse_date(&trimmed.date_of_birth),
            date_of_death: parse_date(&trimmed.date_of_death),
        };
        (draft, errors)
    }
}

fn form_page(title: &'static str, author: AuthorDraft, errors: Vec<FieldError>) -> Page {
    Page::Render(View::AuthorForm {
        title,
        author,
        errors,
    })
}

/// Display list of all authors
pub async fn list(state: &AppState) -> Result<Page, DomainError> {
    let author_list = state.author_repo.find_all().await?;
    Ok(Page::Render(View::AuthorList { author_list }))
}

/// Display detail page for a specific author
pub async fn detail(state: &AppState, id: i32) -> Result<Page, DomainError> {
    let (author, author_books) = tokio::try_join!(
        state.author_repo.find_by_id(id),
        state.book_repo.find_by_author(id),
    )?;
    let author = author.ok_or_else(|| DomainError::not_found("Author"))?;

    Ok(Page::Render(View::AuthorDetail {
        author,
        author_books,
    }))
}

pub fn create_form() -> Page {
    form_page("Create Author", AuthorDraft::default(), Vec::new())
}

/// Handle author create
pub async fn create(state: &AppState, form: AuthorForm) -> Result<Page, DomainError> {
    let (draft, errors) = form.sanitize();
    if !errors.is_empty() {
        return Ok(form_page("Create Author", draft, errors));
    }

    let author = state.author_repo.create(draft).await?;
    tracing::info!(author_id = author.id, "Author created");

    Ok(Page::Redirect(author.url()))
}

pub async fn update_form(state: &AppState, id: i32) -> Result<Page, DomainError> {
    let author = state
        .author_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Author"))?;

    Ok(form_page("Update Author", AuthorDraft::from(&author), Vec::new()))
}

/// Handle author update
pub async fn update(state: &AppState, id: i32, form: AuthorForm) -> Result<Page, DomainError> {
    let (draft, errors) = form.sanitize();
    if !errors.is_empty() {
        return Ok(form_page("Update Author", draft, errors));
    }

    let author = state.author_repo.update(id, draft).await?;
    tracing::info!(author_id = author.id, "Author updated");

    Ok(Page::Redirect(author.url()))
}

/// Display author delete confirmation; a missing author goes back to the list
pub async fn delete_form(state: &AppState, id: i32) -> Result<Page, DomainError> {
    let (author, author_books) = tokio::try_join!(
        state.author_repo.find_by_id(id),
        state.book_repo.find_by_author(id),
    )?;

    match author {
        Some(author) => Ok(Page::Render(View::AuthorDelete {
            author,
            author_books,
        })),
        None => Ok(Page::Redirect(LIST_URL.to_string())),
    }
}

/// Handle author delete; refused while the author still has books
pub async fn delete(state: &AppState, id: i32) -> Result<Page, DomainError> {
    let (author, author_books) = tokio::try_join!(
        state.author_repo.find_by_id(id),
        state.book_repo.find_by_author(id),
    )?;

    let Some(author) = author else {
        return Ok(Page::Redirect(LIST_URL.to_string()));
    };

    if !author_books.is_empty() {
        tracing::warn!(
            author_id = id,
            books = author_books.len(),
            "Author delete blocked by dependent books"
        );
        return Ok(Page::Render(View::AuthorDelete {
            author,
            author_books,
        }));
    }

    state.author_repo.delete(id).await?;
    tracing::info!(author_id = id, "Author deleted");

    Ok(Page::Redirect(LIST_URL.to_string()))
}
