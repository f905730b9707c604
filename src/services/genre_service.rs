//! Genre controller operations
//!
//! Each operation returns a [`Page`]; HTTP concerns live in `api::genre`.

use serde::Deserialize;
use validator::Validate;

use super::validation::{FieldError, escape, trim, violations};
use crate::domain::{DomainError, GenreDraft};
use crate::infrastructure::AppState;
use crate::views::{Page, View};

pub const LIST_URL: &str = "/catalog/genres";

/// Submitted genre form
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct GenreForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 100, message = "Genre name required"))]
    pub name: String,
}

impl GenreForm {
    const FIELDS: &'static [&'static str] = &["name"];

    /// Trim, check, then escape
    fn sanitize(self) -> (GenreDraft, Vec<FieldError>) {
        let trimmed = Self {
            name: trim(&self.name),
        };
        let errors = violations(&trimmed, Self::FIELDS);
        let draft = GenreDraft {
            name: escape(&trimmed.name),
        };
        (draft, errors)
    }
}

fn form_page(title: &'static str, genre: GenreDraft, errors: Vec<FieldError>) -> Page {
    Page::Render(View::GenreForm {
        title,
        genre,
        errors,
    })
}

/// Display list of all genres
pub async fn list(state: &AppState) -> Result<Page, DomainError> {
    let genre_list = state.genre_repo.find_all().await?;
    Ok(Page::Render(View::GenreList { genre_list }))
}

/// Display detail page for a specific genre
pub async fn detail(state: &AppState, id: i32) -> Result<Page, DomainError> {
    let (genre, genre_books) = tokio::try_join!(
        state.genre_repo.find_by_id(id),
        state.book_repo.find_by_genre(id),
    )?;
    let genre = genre.ok_or_else(|| DomainError::not_found("Genre"))?;

    Ok(Page::Render(View::GenreDetail { genre, genre_books }))
}

/// Display genre create form
pub fn create_form() -> Page {
    form_page("Create Genre", GenreDraft::default(), Vec::new())
}

/// Handle genre create; an existing name redirects to the stored genre
pub async fn create(state: &AppState, form: GenreForm) -> Result<Page, DomainError> {
    let (draft, errors) = form.sanitize();
    if !errors.is_empty() {
        return Ok(form_page("Create Genre", draft, errors));
    }

    match state.genre_repo.create(draft.clone()).await {
        Ok(genre) => {
            tracing::info!(genre_id = genre.id, "Genre created");
            Ok(Page::Redirect(genre.url()))
        }
        Err(DomainError::Duplicate(_)) => {
            let existing = state
                .genre_repo
                .find_by_name(&draft.name)
                .await?
                .ok_or_else(|| DomainError::Duplicate("Genre".to_string()))?;
            tracing::info!(genre_id = existing.id, "Genre already exists, redirecting");
            Ok(Page::Redirect(existing.url()))
        }
        Err(e) => Err(e),
    }
}

/// Display genre update form
pub async fn update_form(state: &AppState, id: i32) -> Result<Page, DomainError> {
    let genre = state
        .genre_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Genre"))?;

    Ok(form_page("Update Genre", GenreDraft::from(&genre), Vec::new()))
}

/// Handle genre update
pub async fn update(state: &AppState, id: i32, form: GenreForm) -> Result<Page, DomainError> {
    let (draft, errors) = form.sanitize();
    if !errors.is_empty() {
        return Ok(form_page("Update Genre", draft, errors));
    }

    match state.genre_repo.update(id, draft.clone()).await {
        Ok(genre) => {
            tracing::info!(genre_id = genre.id, "Genre updated");
            Ok(Page::Redirect(genre.url()))
        }
        Err(DomainError::Duplicate(_)) => {
            tracing::warn!(genre_id = id, "Genre rename rejected, name already taken");
            let errors = vec![FieldError::new("name", "Genre name already exists")];
            Ok(form_page("Update Genre", draft, errors))
        }
        Err(e) => Err(e),
    }
}

/// Display genre delete confirmation; a missing genre goes back to the list
pub async fn delete_form(state: &AppState, id: i32) -> Result<Page, DomainError> {
    let (genre, genre_books) = tokio::try_join!(
        state.genre_repo.find_by_id(id),
        state.book_repo.find_by_genre(id),
    )?;

    match genre {
        Some(genre) => Ok(Page::Render(View::GenreDelete { genre, genre_books })),
        None => Ok(Page::Redirect(LIST_URL.to_string())),
    }
}

/// Handle genre delete; refused while books still reference the genre
pub async fn delete(state: &AppState, id: i32) -> Result<Page, DomainError> {
    let (genre, genre_books) = tokio::try_join!(
        state.genre_repo.find_by_id(id),
        state.book_repo.find_by_genre(id),
    )?;

    let Some(genre) = genre else {
        return Ok(Page::Redirect(LIST_URL.to_string()));
    };

    if !genre_books.is_empty() {
        tracing::warn!(
            genre_id = id,
            books = genre_books.len(),
            "Genre delete blocked by dependent books"
        );
        return Ok(Page::Render(View::GenreDelete { genre, genre_books }));
    }

    state.genre_repo.delete(id).await?;
    tracing::info!(genre_id = id, "Genre deleted");

    Ok(Page::Redirect(LIST_URL.to_string()))
}
