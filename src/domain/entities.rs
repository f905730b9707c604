//! Catalog records as seen by controllers and views.
//!
//! Derived display values (names, formatted dates, canonical URLs) are
//! methods, so they are recomputed from the stored fields on every read.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub const CATALOG_ROOT: &str = "/catalog";

/// `2026-10-17`
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `October 17, 2026`
pub fn full_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("{}/genre/{}", CATALOG_ROOT, self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Sortable display name, `family, first`
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn birth(&self) -> String {
        self.date_of_birth.map(iso_date).unwrap_or_default()
    }

    pub fn death(&self) -> String {
        self.date_of_death.map(iso_date).unwrap_or_default()
    }

    pub fn lifespan(&self) -> String {
        let mut lifespan = self.date_of_birth.map(full_date).unwrap_or_default();
        lifespan.push_str(" - ");
        match self.date_of_death {
            Some(death) => lifespan.push_str(&full_date(death)),
            None => lifespan.push_str("Present"),
        }
        lifespan
    }

    pub fn url(&self) -> String {
        format!("{}/author/{}", CATALOG_ROOT, self.id)
    }
}

/// Book with its author and genres populated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author: Author,
    pub genre: Vec<Genre>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("{}/book/{}", CATALOG_ROOT, self.id)
    }
}

/// Lightweight book reference carried by book instances
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookRef {
    pub id: i32,
    pub title: String,
}

impl BookRef {
    pub fn url(&self) -> String {
        format!("{}/book/{}", CATALOG_ROOT, self.id)
    }
}

impl From<&Book> for BookRef {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BookStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookStatus {
    pub const ALL: [BookStatus; 4] = [
        BookStatus::Available,
        BookStatus::Maintenance,
        BookStatus::Loaned,
        BookStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Maintenance => "Maintenance",
            BookStatus::Loaned => "Loaned",
            BookStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown book instance status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for BookStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BookStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookInstance {
    pub id: i32,
    pub book: BookRef,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back: DateTime<Utc>,
}

impl BookInstance {
    pub fn due(&self) -> String {
        iso_date(self.due_back.date_naive())
    }

    pub fn due_back_formatted(&self) -> String {
        full_date(self.due_back.date_naive())
    }

    pub fn url(&self) -> String {
        format!("{}/bookinstance/{}", CATALOG_ROOT, self.id)
    }
}

/// Totals shown on the catalog home page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub book_count: u64,
    pub book_instance_count: u64,
    pub book_instance_available_count: u64,
    pub author_count: u64,
    pub genre_count: u64,
}

// Drafts: sanitized, not-yet-persisted values rebuilt from form input.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenreDraft {
    pub name: String,
}

impl From<&Genre> for GenreDraft {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorDraft {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl AuthorDraft {
    pub fn birth(&self) -> String {
        self.date_of_birth.map(iso_date).unwrap_or_default()
    }

    pub fn death(&self) -> String {
        self.date_of_death.map(iso_date).unwrap_or_default()
    }
}

impl From<&Author> for AuthorDraft {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookDraft {
    pub title: String,
    pub author_id: Option<i32>,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<i32>,
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author_id: Some(book.author.id),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            genre_ids: book.genre.iter().map(|g| g.id).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookInstanceDraft {
    pub book_id: Option<i32>,
    pub imprint: String,
    pub status: BookStatus,
    /// `None` means "due back now" once persisted
    pub due_back: Option<NaiveDate>,
}

impl BookInstanceDraft {
    pub fn due(&self) -> String {
        self.due_back.map(iso_date).unwrap_or_default()
    }

    /// Timestamp to persist: midnight UTC of the chosen day, or `now`
    pub fn due_back_at(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.due_back
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
            .unwrap_or(now)
    }
}

impl From<&BookInstance> for BookInstanceDraft {
    fn from(instance: &BookInstance) -> Self {
        Self {
            book_id: Some(instance.book.id),
            imprint: instance.imprint.clone(),
            status: instance.status,
            due_back: Some(instance.due_back.date_naive()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn author(birth: Option<NaiveDate>, death: Option<NaiveDate>) -> Author {
        Author {
            id: 7,
            first_name: "Isaac".to_string(),
            family_name: "Asimov".to_string(),
            date_of_birth: birth,
            date_of_death: death,
        }
    }

    #[test]
    fn test_author_name_is_family_then_first() {
        assert_eq!(author(None, None).name(), "Asimov, Isaac");
    }

    #[test]
    fn test_author_dates_format_as_iso_or_empty() {
        let a = author(NaiveDate::from_ymd_opt(1920, 1, 2), None);
        assert_eq!(a.birth(), "1920-01-02");
        assert_eq!(a.death(), "");
    }

    #[test]
    fn test_lifespan_with_and_without_death() {
        let living = author(NaiveDate::from_ymd_opt(1920, 1, 2), None);
        assert_eq!(living.lifespan(), "January 2, 1920 - Present");

        let dead = author(
            NaiveDate::from_ymd_opt(1920, 1, 2),
            NaiveDate::from_ymd_opt(1992, 4, 6),
        );
        assert_eq!(dead.lifespan(), "January 2, 1920 - April 6, 1992");

        assert_eq!(author(None, None).lifespan(), " - Present");
    }

    #[test]
    fn test_canonical_urls() {
        assert_eq!(author(None, None).url(), "/catalog/author/7");
        let genre = Genre {
            id: 3,
            name: "Fantasy".to_string(),
        };
        assert_eq!(genre.url(), "/catalog/genre/3");
    }

    #[test]
    fn test_book_instance_due_formats() {
        let instance = BookInstance {
            id: 11,
            book: BookRef {
                id: 2,
                title: "Foundation".to_string(),
            },
            imprint: "Gnome Press, 1951".to_string(),
            status: BookStatus::Loaned,
            due_back: Utc.with_ymd_and_hms(2026, 10, 17, 15, 30, 0).unwrap(),
        };
        assert_eq!(instance.due(), "2026-10-17");
        assert_eq!(instance.due_back_formatted(), "October 17, 2026");
        assert_eq!(instance.url(), "/catalog/bookinstance/11");
        assert_eq!(instance.book.url(), "/catalog/book/2");
    }

    #[test]
    fn test_status_parsing_and_default() {
        assert_eq!(BookStatus::default(), BookStatus::Maintenance);
        assert_eq!("Reserved".parse::<BookStatus>(), Ok(BookStatus::Reserved));
        assert!("reserved".parse::<BookStatus>().is_err());
    }

    #[test]
    fn test_instance_draft_defaults_due_back_to_now() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
        let draft = BookInstanceDraft::default();
        assert_eq!(draft.due_back_at(now), now);

        let dated = BookInstanceDraft {
            due_back: NaiveDate::from_ymd_opt(2026, 12, 1),
            ..Default::default()
        };
        assert_eq!(
            dated.due_back_at(now),
            Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap()
        );
    }
}
