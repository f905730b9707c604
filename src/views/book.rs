use maud::{Markup, html};

use super::layout::field_errors;
use super::stored;
use crate::domain::{Author, Book, BookDraft, BookInstance, BookStatus, Genre};
use crate::services::validation::FieldError;

pub fn list(books: &[Book]) -> Markup {
    html! {
        ul {
            @for book in books {
                li {
                    a href=(book.url()) { (stored(&book.title)) }
                    " (" (stored(&book.author.name())) ")"
                }
            }
            @if books.is_empty() {
                li { "There are no books." }
            }
        }
    }
}

pub(super) fn status_class(status: BookStatus) -> &'static str {
    match status {
        BookStatus::Available => "text-success",
        BookStatus::Maintenance => "text-danger",
        BookStatus::Loaned | BookStatus::Reserved => "text-warning",
    }
}

fn copies(instances: &[BookInstance]) -> Markup {
    html! {
        @for copy in instances {
            hr;
            p class=(status_class(copy.status)) { (copy.status.as_str()) }
            p { strong { "Imprint: " } (stored(&copy.imprint)) }
            @if copy.status != BookStatus::Available {
                p { strong { "Due back: " } (copy.due_back_formatted()) }
            }
            p { strong { "Id: " } a href=(copy.url()) { (copy.id) } }
        }
    }
}

fn summary(book: &Book) -> Markup {
    html! {
        p { strong { "Author: " } a href=(book.author.url()) { (stored(&book.author.name())) } }
        p { strong { "Summary: " } (stored(&book.summary)) }
        p { strong { "ISBN: " } (stored(&book.isbn)) }
        p {
            strong { "Genre: " }
            @for (i, genre) in book.genre.iter().enumerate() {
                @if i > 0 { ", " }
                a href=(genre.url()) { (stored(&genre.name)) }
            }
        }
    }
}

pub fn detail(book: &Book, instances: &[BookInstance]) -> Markup {
    html! {
        h2 { "Title: " (stored(&book.title)) }
        (summary(book))
        div style="margin-left:20px;margin-top:20px" {
            h4 { "Copies" }
            @if instances.is_empty() {
                p { "There are no copies of this book in the library." }
            } @else {
                (copies(instances))
            }
        }
        hr;
        p { a href={ (book.url()) "/delete" } { "Delete Book" } }
        p { a href={ (book.url()) "/update" } { "Update Book" } }
    }
}

pub fn form(
    authors: &[Author],
    genres: &[Genre],
    book: &BookDraft,
    errors: &[FieldError],
) -> Markup {
    html! {
        form method="POST" action="" {
            div class="form-group" {
                label for="title" { "Title:" }
                input #title class="form-control" type="text" placeholder="Name of book"
                    name="title" required value=(stored(&book.title));
            }
            div class="form-group" {
                label for="author" { "Author:" }
                select #author class="form-control" name="author" required {
                    option value="" { "--Please select an author--" }
                    @for author in authors {
                        option value=(author.id) selected[book.author_id == Some(author.id)] {
                            (stored(&author.name()))
                        }
                    }
                }
            }
            div class="form-group" {
                label for="summary" { "Summary:" }
                textarea #summary class="form-control" placeholder="Summary" name="summary" required {
                    (stored(&book.summary))
                }
            }
            div class="form-group" {
                label for="isbn" { "ISBN:" }
                input #isbn class="form-control" type="text" placeholder="ISBN13" name="isbn"
                    required value=(stored(&book.isbn));
            }
            div class="form-group" {
                label { "Genre:" }
                div {
                    @for genre in genres {
                        div style="display: inline; padding-right:10px;" {
                            input class="checkbox-input" type="checkbox" name="genre"
                                id={ "genre-" (genre.id) } value=(genre.id)
                                checked[book.genre_ids.contains(&genre.id)];
                            label for={ "genre-" (genre.id) } { " " (stored(&genre.name)) }
                        }
                    }
                }
            }
            button class="btn btn-primary" type="submit" { "Submit" }
        }
        (field_errors(errors))
    }
}

pub fn delete(book: &Book, instances: &[BookInstance]) -> Markup {
    html! {
        h2 { "Title: " (stored(&book.title)) }
        (summary(book))
        @if !instances.is_empty() {
            p { strong { "Delete the following copies before attempting to delete this book." } }
            div style="margin-left:20px;margin-top:20px" {
                h4 { "Copies" }
                (copies(instances))
            }
        } @else {
            p { "Do you really want to delete this Book?" }
            form method="POST" action="" {
                input #bookid type="hidden" name="bookid" value=(book.id);
                button class="btn btn-primary" type="submit" { "Delete" }
            }
        }
    }
}
