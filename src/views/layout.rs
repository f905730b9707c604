use maud::{DOCTYPE, Markup, html};

use crate::services::validation::FieldError;

const NAV: &[(&str, &str)] = &[
    ("/catalog", "Home"),
    ("/catalog/books", "All books"),
    ("/catalog/authors", "All authors"),
    ("/catalog/genres", "All genres"),
    ("/catalog/bookinstances", "All book-instances"),
];

const CREATE_NAV: &[(&str, &str)] = &[
    ("/catalog/author/create", "Create new author"),
    ("/catalog/genre/create", "Create new genre"),
    ("/catalog/book/create", "Create new book"),
    ("/catalog/bookinstance/create", "Create new book instance (copy)"),
];

/// Shared page chrome: head, sidebar navigation, content column
pub fn page(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href="/static/stylesheets/style.css";
            }
            body {
                div class="container" {
                    nav class="sidebar" {
                        ul class="sidebar-nav" {
                            @for (href, label) in NAV {
                                li { a href=(href) { (label) } }
                            }
                            li { hr; }
                            @for (href, label) in CREATE_NAV {
                                li { a href=(href) { (label) } }
                            }
                        }
                    }
                    main class="content" {
                        h1 { (title) }
                        (content)
                    }
                }
            }
        }
    }
}

/// Generic failure page for not-found and storage errors
pub fn error_page(status: u16, message: &str) -> Markup {
    page(
        "Error",
        html! {
            h2 { (status) }
            p class="error-message" { (message) }
            p { a href="/catalog" { "Back to the catalog" } }
        },
    )
}

/// Violation list shown under a form
pub fn field_errors(errors: &[FieldError]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul class="errors" {
                @for error in errors {
                    li data-field=(error.field) { (error.message) }
                }
            }
        }
    }
}
