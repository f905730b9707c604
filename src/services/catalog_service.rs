//! Catalog home page

use crate::domain::{BookStatus, CatalogCounts, DomainError};
use crate::infrastructure::AppState;
use crate::views::{Page, View};

/// Count every entity concurrently
pub async fn index(state: &AppState) -> Result<Page, DomainError> {
    let (
        book_count,
        book_instance_count,
        book_instance_available_count,
        author_count,
        genre_count,
    ) = tokio::try_join!(
        state.book_repo.count(),
        state.instance_repo.count(),
        state.instance_repo.count_by_status(BookStatus::Available),
        state.author_repo.count(),
        state.genre_repo.count(),
    )?;

    Ok(Page::Render(View::Index {
        counts: CatalogCounts {
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        },
    }))
}
