use maud::{Markup, html};

use super::book::status_class;
use super::layout::field_errors;
use super::stored;
use crate::domain::{BookInstance, BookInstanceDraft, BookRef, BookStatus};
use crate::services::validation::FieldError;

pub fn list(instances: &[BookInstance]) -> Markup {
    html! {
        ul {
            @for instance in instances {
                li {
                    a href=(instance.url()) {
                        (stored(&instance.book.title)) " : " (stored(&instance.imprint))
                    }
                    " - "
                    span class=(status_class(instance.status)) { (instance.status.as_str()) }
                    @if instance.status != BookStatus::Available {
                        span { " (Due: " (instance.due_back_formatted()) ")" }
                    }
                }
            }
            @if instances.is_empty() {
                li { "There are no book copies in this library." }
            }
        }
    }
}

fn summary(instance: &BookInstance) -> Markup {
    html! {
        p {
            strong { "Title: " }
            a href=(instance.book.url()) { (stored(&instance.book.title)) }
        }
        p { strong { "Imprint: " } (stored(&instance.imprint)) }
        p {
            strong { "Status: " }
            span class=(status_class(instance.status)) { (instance.status.as_str()) }
        }
        @if instance.status != BookStatus::Available {
            p { strong { "Due back: " } (instance.due_back_formatted()) }
        }
    }
}

pub fn detail(instance: &BookInstance) -> Markup {
    html! {
        h2 { "ID: " (instance.id) }
        (summary(instance))
        hr;
        p { a href={ (instance.url()) "/delete" } { "Delete BookInstance" } }
        p { a href={ (instance.url()) "/update" } { "Update BookInstance" } }
    }
}

pub fn form(
    books: &[BookRef],
    selected_book: Option<i32>,
    instance: &BookInstanceDraft,
    errors: &[FieldError],
) -> Markup {
    html! {
        form method="POST" action="" {
            div class="form-group" {
                label for="book" { "Book:" }
                select #book class="form-control" name="book" required {
                    option value="" { "--Please select a book--" }
                    @for book in books {
                        option value=(book.id) selected[selected_book == Some(book.id)] {
                            (stored(&book.title))
                        }
                    }
                }
            }
            div class="form-group" {
                label for="imprint" { "Imprint:" }
                input #imprint class="form-control" type="text"
                    placeholder="Publisher and date information" name="imprint" required
                    value=(stored(&instance.imprint));
            }
            div class="form-group" {
                label for="due_back" { "Date when book available:" }
                input #due_back class="form-control" type="date" name="due_back"
                    value=(instance.due());
            }
            div class="form-group" {
                label for="status" { "Status:" }
                select #status class="form-control" name="status" required {
                    @for status in BookStatus::ALL {
                        option value=(status.as_str()) selected[instance.status == status] { (status.as_str()) }
                    }
                }
            }
            button class="btn btn-primary" type="submit" { "Submit" }
        }
        (field_errors(errors))
    }
}

pub fn delete(instance: &BookInstance) -> Markup {
    html! {
        h2 { "ID: " (instance.id) }
        (summary(instance))
        p { "Do you really want to delete this BookInstance?" }
        form method="POST" action="" {
            input #id type="hidden" name="id" value=(instance.id);
            button class="btn btn-primary" type="submit" { "Delete" }
        }
    }
}
