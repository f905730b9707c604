use maud::{Markup, html};

use super::layout::field_errors;
use super::stored;
use crate::domain::{Book, Genre, GenreDraft};
use crate::services::validation::FieldError;

pub fn list(genres: &[Genre]) -> Markup {
    html! {
        ul {
            @for genre in genres {
                li { a href=(genre.url()) { (stored(&genre.name)) } }
            }
            @if genres.is_empty() {
                li { "There are no genres." }
            }
        }
    }
}

fn books_in_genre(books: &[Book]) -> Markup {
    html! {
        dl {
            @for book in books {
                dt { a href=(book.url()) { (stored(&book.title)) } }
                dd { (stored(&book.summary)) }
            }
        }
    }
}

pub fn detail(genre: &Genre, books: &[Book]) -> Markup {
    html! {
        h2 { "Genre: " (stored(&genre.name)) }
        div style="margin-left:20px;margin-top:20px" {
            h4 { "Books" }
            @if books.is_empty() {
                p { "This genre has no books." }
            } @else {
                (books_in_genre(books))
            }
        }
        hr;
        p { a href={ (genre.url()) "/delete" } { "Delete genre" } }
        p { a href={ (genre.url()) "/update" } { "Update genre" } }
    }
}

pub fn form(genre: &GenreDraft, errors: &[FieldError]) -> Markup {
    html! {
        form method="POST" action="" {
            div class="form-group" {
                label for="name" { "Genre:" }
                input #name class="form-control" type="text" placeholder="Fantasy, Poetry etc."
                    name="name" required value=(stored(&genre.name));
            }
            button class="btn btn-primary" type="submit" { "Submit" }
        }
        (field_errors(errors))
    }
}

pub fn delete(genre: &Genre, books: &[Book]) -> Markup {
    html! {
        h2 { "Genre: " (stored(&genre.name)) }
        @if !books.is_empty() {
            p { strong { "Delete the following books before attempting to delete this genre." } }
            div style="margin-left:20px;margin-top:20px" {
                h4 { "Books" }
                (books_in_genre(books))
            }
        } @else {
            p { "Do you really want to delete this Genre?" }
            form method="POST" action="" {
                input #genreid type="hidden" name="genreid" value=(genre.id);
                button class="btn btn-primary" type="submit" { "Delete" }
            }
        }
    }
}
