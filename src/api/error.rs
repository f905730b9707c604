//! Error-to-response mapping for the HTML surface

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::domain::DomainError;
use crate::views::{self, Page};

/// Handler error: a [`DomainError`] rendered as an error page
#[derive(Debug)]
pub struct AppError(pub DomainError);

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::Duplicate(_) => StatusCode::CONFLICT,
            DomainError::Database(_) | DomainError::Internal(_) => {
                tracing::error!("Request failed: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let markup = views::error_page(status.as_u16(), &self.0.to_string());
        (status, Html(markup.into_string())).into_response()
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        match self {
            Page::Render(view) => {
                let errors = view.errors();
                if errors.is_empty() {
                    tracing::debug!(view = view.name(), "Rendering");
                } else {
                    tracing::debug!(
                        view = view.name(),
                        violations = errors.len(),
                        "Rendering form with violations"
                    );
                }
                Html(view.render().into_string()).into_response()
            }
            Page::Redirect(to) => Redirect::to(&to).into_response(),
        }
    }
}

pub type PageResult = Result<Page, AppError>;
