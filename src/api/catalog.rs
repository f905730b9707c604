use axum::{extract::State, response::Redirect};

use super::error::PageResult;
use crate::infrastructure::AppState;
use crate::services::catalog_service;

pub async fn home() -> Redirect {
    Redirect::to("/catalog")
}

pub async fn index(State(state): State<AppState>) -> PageResult {
    Ok(catalog_service::index(&state).await?)
}
