use maud::{Markup, html};

use crate::domain::CatalogCounts;

pub fn index(counts: &CatalogCounts) -> Markup {
    html! {
        p {
            "Welcome to "
            em { "LocalLibrary" }
            ", a very basic catalog of books, authors, genres and the copies on our shelves."
        }
        h2 { "Dynamic content" }
        p { "The library has the following record counts:" }
        ul {
            li { strong { "Books: " } (counts.book_count) }
            li { strong { "Copies: " } (counts.book_instance_count) }
            li { strong { "Copies available: " } (counts.book_instance_available_count) }
            li { strong { "Authors: " } (counts.author_count) }
            li { strong { "Genres: " } (counts.genre_count) }
        }
    }
}
