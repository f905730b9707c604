use axum::{
    Form,
    extract::{Path, State},
};

use super::error::PageResult;
use crate::infrastructure::AppState;
use crate::services::book_service::{self, BookForm};

/// `genre` repeats once per checked box
type Pairs = Form<Vec<(String, String)>>;

pub async fn list(State(state): State<AppState>) -> PageResult {
    Ok(book_service::list(&state).await?)
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<i32>) -> PageResult {
    Ok(book_service::detail(&state, id).await?)
}

pub async fn create_form(State(state): State<AppState>) -> PageResult {
    Ok(book_service::create_form(&state).await?)
}

pub async fn create(State(state): State<AppState>, Form(pairs): Pairs) -> PageResult {
    Ok(book_service::create(&state, BookForm::from_pairs(pairs)).await?)
}

pub async fn update_form(State(state): State<AppState>, Path(id): Path<i32>) -> PageResult {
    Ok(book_service::update_form(&state, id).await?)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(pairs): Pairs,
) -> PageResult {
    Ok(book_service::update(&state, id, BookForm::from_pairs(pairs)).await?)
}

pub async fn delete_form(State(state): State<AppState>, Path(id): Path<i32>) -> PageResult {
    Ok(book_service::delete_form(&state, id).await?)
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> PageResult {
    Ok(book_service::delete(&state, id).await?)
}
