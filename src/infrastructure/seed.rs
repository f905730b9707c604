//! Demo catalog inserted on first start when `SEED_DEMO` is set

use chrono::NaiveDate;

use crate::domain::{AuthorDraft, BookDraft, BookInstanceDraft, BookStatus, DomainError, GenreDraft};
use crate::infrastructure::AppState;
use crate::services::validation::escape;

struct DemoBook {
    title: &'static str,
    author: usize,
    summary: &'static str,
    isbn: &'static str,
    genres: &'static [usize],
}

const GENRES: &[&str] = &["Fantasy", "Science Fiction", "French Poetry"];

const AUTHORS: &[(&str, &str, Option<(i32, u32, u32)>, Option<(i32, u32, u32)>)] = &[
    ("Patrick", "Rothfuss", Some((1973, 6, 6)), None),
    ("Ben", "Bova", Some((1932, 11, 8)), Some((2020, 11, 29))),
    ("Isaac", "Asimov", Some((1920, 1, 2)), Some((1992, 4, 6))),
    ("Bob", "Billings", None, None),
];

const BOOKS: &[DemoBook] = &[
    DemoBook {
        title: "The Name of the Wind (The Kingkiller Chronicle, #1)",
        author: 0,
        summary: "I have stolen princesses back from sleeping barrow kings. I burned down the town of Trebon. I have spent the night with Felurian and left with both my sanity and my life.",
        isbn: "9781473211896",
        genres: &[0],
    },
    DemoBook {
        title: "The Wise Man's Fear (The Kingkiller Chronicle, #2)",
        author: 0,
        summary: "Picking up the tale of Kvothe Kingkiller once again, we follow him into exile, into political intrigue, courtship, adventure, love and magic.",
        isbn: "9788401352836",
        genres: &[0],
    },
    DemoBook {
        title: "Apes and Angels",
        author: 1,
        summary: "Humankind headed out to the stars not for conquest, nor exploration, nor even for curiosity. Humans went to the stars in a desperate crusade to save intelligent life wherever they found it.",
        isbn: "9780765379528",
        genres: &[1],
    },
    DemoBook {
        title: "Foundation",
        author: 2,
        summary: "For twelve thousand years the Galactic Empire has ruled supreme. Now it is dying.",
        isbn: "9780553293357",
        genres: &[1],
    },
    DemoBook {
        title: "Test Book 1",
        author: 3,
        summary: "Summary of test book 1",
        isbn: "ISBN111111",
        genres: &[0, 1],
    },
];

const INSTANCES: &[(usize, &str, BookStatus, Option<(i32, u32, u32)>)] = &[
    (0, "London Gollancz, 2014.", BookStatus::Available, None),
    (1, "Gollancz, 2011.", BookStatus::Loaned, Some((2026, 11, 1))),
    (2, "New York Tom Doherty Associates, 2016.", BookStatus::Available, None),
    (3, "Bantam Spectra, 1991.", BookStatus::Maintenance, None),
    (3, "Bantam Spectra, 1991.", BookStatus::Reserved, None),
    (4, "Imprint XXX2", BookStatus::Available, None),
];

fn ymd(date: Option<(i32, u32, u32)>) -> Option<NaiveDate> {
    date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
}

/// Insert the demo catalog unless the catalog already has genres
pub async fn seed_demo_data(state: &AppState) -> Result<(), DomainError> {
    if state.genre_repo.count().await? > 0 {
        tracing::info!("Catalog already populated, skipping demo data");
        return Ok(());
    }

    let mut genre_ids = Vec::with_capacity(GENRES.len());
    for name in GENRES {
        let genre = state
            .genre_repo
            .create(GenreDraft { name: escape(name) })
            .await?;
        genre_ids.push(genre.id);
    }

    let mut author_ids = Vec::with_capacity(AUTHORS.len());
    for (first_name, family_name, birth, death) in AUTHORS {
        let author = state
            .author_repo
            .create(AuthorDraft {
                first_name: escape(first_name),
                family_name: escape(family_name),
                date_of_birth: ymd(*birth),
                date_of_death: ymd(*death),
            })
            .await?;
        author_ids.push(author.id);
    }

    let mut book_ids = Vec::with_capacity(BOOKS.len());
    for demo in BOOKS {
        let book = state
            .book_repo
            .create(BookDraft {
                title: escape(demo.title),
                author_id: Some(author_ids[demo.author]),
                summary: escape(demo.summary),
                isbn: escape(demo.isbn),
                genre_ids: demo.genres.iter().map(|g| genre_ids[*g]).collect(),
            })
            .await?;
        book_ids.push(book.id);
    }

    for (book, imprint, status, due_back) in INSTANCES {
        state
            .instance_repo
            .create(BookInstanceDraft {
                book_id: Some(book_ids[*book]),
                imprint: escape(imprint),
                status: *status,
                due_back: ymd(*due_back),
            })
            .await?;
    }

    tracing::info!(
        genres = GENRES.len(),
        authors = AUTHORS.len(),
        books = BOOKS.len(),
        instances = INSTANCES.len(),
        "Demo catalog seeded"
    );

    Ok(())
}
