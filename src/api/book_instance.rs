use axum::{
    Form,
    extract::{Path, State},
};

use super::error::PageResult;
use crate::infrastructure::AppState;
use crate::services::book_instance_service::{self, BookInstanceForm};

pub async fn list(State(state): State<AppState>) -> PageResult {
    Ok(book_instance_service::list(&state).await?)
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<i32>) -> PageResult {
    Ok(book_instance_service::detail(&state, id).await?)
}

pub async fn create_form(State(state): State<AppState>) -> PageResult {
    Ok(book_instance_service::create_form(&state).await?)
}

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> PageResult {
    Ok(book_instance_service::create(&state, form).await?)
}

pub async fn update_form(State(state): State<AppState>, Path(id): Path<i32>) -> PageResult {
    Ok(book_instance_service::update_form(&state, id).await?)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<BookInstanceForm>,
) -> PageResult {
    Ok(book_instance_service::update(&state, id, form).await?)
}

pub async fn delete_form(State(state): State<AppState>, Path(id): Path<i32>) -> PageResult {
    Ok(book_instance_service::delete_form(&state, id).await?)
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> PageResult {
    Ok(book_instance_service::delete(&state, id).await?)
}
