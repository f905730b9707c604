use axum::{
    Form,
    extract::{Path, State},
};

use super::error::PageResult;
use crate::infrastructure::AppState;
use crate::services::genre_service::{self, GenreForm};

pub async fn list(State(state): State<AppState>) -> PageResult {
    Ok(genre_service::list(&state).await?)
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<i32>) -> PageResult {
    Ok(genre_service::detail(&state, id).await?)
}

pub async fn create_form() -> PageResult {
    Ok(genre_service::create_form())
}

pub async fn create(State(state): State<AppState>, Form(form): Form<GenreForm>) -> PageResult {
    Ok(genre_service::create(&state, form).await?)
}

pub async fn update_form(State(state): State<AppState>, Path(id): Path<i32>) -> PageResult {
    Ok(genre_service::update_form(&state, id).await?)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<GenreForm>,
) -> PageResult {
    Ok(genre_service::update(&state, id, form).await?)
}

pub async fn delete_form(State(state): State<AppState>, Path(id): Path<i32>) -> PageResult {
    Ok(genre_service::delete_form(&state, id).await?)
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> PageResult {
    Ok(genre_service::delete(&state, id).await?)
}
