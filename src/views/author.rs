use maud::{Markup, html};

use super::layout::field_errors;
use super::stored;
use crate::domain::{Author, AuthorDraft, Book};
use crate::services::validation::FieldError;

pub fn list(authors: &[Author]) -> Markup {
    html! {
        ul {
            @for author in authors {
                li {
                    a href=(author.url()) { (stored(&author.name())) }
                    " (" (author.lifespan()) ")"
                }
            }
            @if authors.is_empty() {
                li { "There are no authors." }
            }
        }
    }
}

fn books_by_author(books: &[Book]) -> Markup {
    html! {
        dl {
            @for book in books {
                dt { a href=(book.url()) { (stored(&book.title)) } }
                dd { (stored(&book.summary)) }
            }
        }
    }
}

pub fn detail(author: &Author, books: &[Book]) -> Markup {
    html! {
        h2 { "Author: " (stored(&author.name())) }
        p { (author.lifespan()) }
        div style="margin-left:20px;margin-top:20px" {
            h4 { "Books" }
            @if books.is_empty() {
                p { "This author has no books." }
            } @else {
                (books_by_author(books))
            }
        }
        hr;
        p { a href={ (author.url()) "/delete" } { "Delete author" } }
        p { a href={ (author.url()) "/update" } { "Update author" } }
    }
}

pub fn form(author: &AuthorDraft, errors: &[FieldError]) -> Markup {
    html! {
        form method="POST" action="" {
            div class="form-group" {
                label for="first_name" { "First Name:" }
                input #first_name class="form-control" type="text" placeholder="First name"
                    name="first_name" required value=(stored(&author.first_name));
                label for="family_name" { "Family Name:" }
                input #family_name class="form-control" type="text" placeholder="Family name"
                    name="family_name" required value=(stored(&author.family_name));
            }
            div class="form-group" {
                label for="date_of_birth" { "Date of birth:" }
                input #date_of_birth class="form-control" type="date" name="date_of_birth"
                    value=(author.birth());
            }
            div class="form-group" {
                label for="date_of_death" { "Date of death:" }
                input #date_of_death class="form-control" type="date" name="date_of_death"
                    value=(author.death());
            }
            button class="btn btn-primary" type="submit" { "Submit" }
        }
        (field_errors(errors))
    }
}

pub fn delete(author: &Author, books: &[Book]) -> Markup {
    html! {
        h2 { "Author: " (stored(&author.name())) }
        p { (author.lifespan()) }
        @if !books.is_empty() {
            p { strong { "Delete the following books before attempting to delete this author." } }
            div style="margin-left:20px;margin-top:20px" {
                h4 { "Books" }
                (books_by_author(books))
            }
        } @else {
            p { "Do you really want to delete this Author?" }
            form method="POST" action="" {
                input #authorid type="hidden" name="authorid" value=(author.id);
                button class="btn btn-primary" type="submit" { "Delete" }
            }
        }
    }
}
