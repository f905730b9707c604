use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::{NaiveDate, Utc};
use local_library::api;
use local_library::db;
use local_library::domain::{AuthorDraft, BookDraft, BookInstanceDraft, BookStatus, GenreDraft};
use local_library::infrastructure::AppState;
use tower::util::ServiceExt; // for `oneshot`

// Helper to create a test app state
async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

fn app(state: &AppState) -> Router {
    api::catalog_router(state.clone())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

async fn post_form(app: Router, uri: &str, body: &str) -> (StatusCode, Option<String>, String) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, location, String::from_utf8(body.to_vec()).unwrap())
}

// Helper to create an author, a genre and a book linking them
async fn create_test_book(state: &AppState) -> (i32, i32, i32) {
    let author = state
        .author_repo
        .create(AuthorDraft {
            first_name: "Patrick".to_string(),
            family_name: "Rothfuss".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1973, 6, 6),
            date_of_death: None,
        })
        .await
        .expect("Failed to create author");
    let genre = state
        .genre_repo
        .create(GenreDraft {
            name: "Fantasy".to_string(),
        })
        .await
        .expect("Failed to create genre");
    let book = state
        .book_repo
        .create(BookDraft {
            title: "The Name of the Wind".to_string(),
            author_id: Some(author.id),
            summary: "Kvothe tells his story.".to_string(),
            isbn: "9781473211896".to_string(),
            genre_ids: vec![genre.id],
        })
        .await
        .expect("Failed to create book");
    (author.id, genre.id, book.id)
}

async fn create_test_copy(state: &AppState, book_id: i32, status: BookStatus) -> i32 {
    state
        .instance_repo
        .create(BookInstanceDraft {
            book_id: Some(book_id),
            imprint: "Gollancz, 2011".to_string(),
            status,
            due_back: None,
        })
        .await
        .expect("Failed to create copy")
        .id
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let state = setup_test_state().await;
    let (status, location, _) = get(app(&state), "/").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/catalog"));
}

#[tokio::test]
async fn test_health_check() {
    let state = setup_test_state().await;
    let (status, _, body) = get(app(&state), "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_index_counts_match_stored_rows() {
    let state = setup_test_state().await;
    let (_, _, book_id) = create_test_book(&state).await;
    create_test_copy(&state, book_id, BookStatus::Available).await;
    create_test_copy(&state, book_id, BookStatus::Loaned).await;

    let (status, _, body) = get(app(&state), "/catalog").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<strong>Books: </strong>1"));
    assert!(body.contains("<strong>Copies: </strong>2"));
    assert!(body.contains("<strong>Copies available: </strong>1"));
    assert!(body.contains("<strong>Authors: </strong>1"));
    assert!(body.contains("<strong>Genres: </strong>1"));
}

#[tokio::test]
async fn test_create_genre_stores_trimmed_name() {
    let state = setup_test_state().await;
    let (status, location, _) =
        post_form(app(&state), "/catalog/genre/create", "name=%20Fantasy%20").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    let genres = state.genre_repo.find_all().await.unwrap();
    assert_eq!(genres.len(), 1);
    assert_eq!(genres[0].name, "Fantasy");
    assert_eq!(location, Some(genres[0].url()));
}

#[tokio::test]
async fn test_create_duplicate_genre_redirects_to_existing() {
    let state = setup_test_state().await;
    let (_, first, _) = post_form(app(&state), "/catalog/genre/create", "name=Poetry").await;
    let (status, second, _) = post_form(app(&state), "/catalog/genre/create", "name=Poetry").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(first, second);
    assert_eq!(state.genre_repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_genre_with_empty_name_rerenders_form() {
    let state = setup_test_state().await;
    let (status, location, body) =
        post_form(app(&state), "/catalog/genre/create", "name=%20%20").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(location, None);
    assert!(body.contains(r#"<li data-field="name">Genre name required</li>"#));
    assert_eq!(state.genre_repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_genre_name_is_escaped_before_storage() {
    let state = setup_test_state().await;
    post_form(app(&state), "/catalog/genre/create", "name=%3Cb%3ESci-Fi%3C%2Fb%3E").await;

    let genres = state.genre_repo.find_all().await.unwrap();
    assert_eq!(genres[0].name, "&lt;b&gt;Sci-Fi&lt;&#x2F;b&gt;");

    let (_, _, body) = get(app(&state), "/catalog/genres").await;
    assert!(body.contains("&lt;b&gt;Sci-Fi"));
    assert!(!body.contains("<b>Sci-Fi"));
}

#[tokio::test]
async fn test_rename_genre_onto_existing_name_is_rejected() {
    let state = setup_test_state().await;
    let (_, genre_id, _) = create_test_book(&state).await;
    let other = state
        .genre_repo
        .create(GenreDraft {
            name: "Poetry".to_string(),
        })
        .await
        .unwrap();

    let uri = format!("/catalog/genre/{}/update", other.id);
    let (status, _, body) = post_form(app(&state), &uri, "name=Fantasy").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Genre name already exists"));
    let unchanged = state.genre_repo.find_by_id(other.id).await.unwrap().unwrap();
    assert_eq!(unchanged.name, "Poetry");
    assert_ne!(genre_id, other.id);
}

#[tokio::test]
async fn test_genre_delete_blocked_while_books_exist() {
    let state = setup_test_state().await;
    let (_, genre_id, _) = create_test_book(&state).await;

    let uri = format!("/catalog/genre/{}/delete", genre_id);
    let (status, _, body) = post_form(app(&state), &uri, &format!("genreid={}", genre_id)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Delete the following books"));
    assert!(body.contains("The Name of the Wind"));
    assert!(state.genre_repo.find_by_id(genre_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_genre_delete_removes_only_that_genre() {
    let state = setup_test_state().await;
    let horror = state
        .genre_repo
        .create(GenreDraft {
            name: "Horror".to_string(),
        })
        .await
        .unwrap();
    let poetry = state
        .genre_repo
        .create(GenreDraft {
            name: "Poetry".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(state.genre_repo.count().await.unwrap(), 2);

    let uri = format!("/catalog/genre/{}/delete", horror.id);
    let (status, location, _) = post_form(app(&state), &uri, "").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/catalog/genres"));
    assert!(state.genre_repo.find_by_id(horror.id).await.unwrap().is_none());
    assert!(state.genre_repo.find_by_id(poetry.id).await.unwrap().is_some());
    assert_eq!(state.genre_repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_genre_round_trip() {
    let state = setup_test_state().await;
    let (_, genre_id, _) = create_test_book(&state).await;

    let uri = format!("/catalog/genre/{}/update", genre_id);
    let (status, location, _) = post_form(app(&state), &uri, "name=%20Epic%20Fantasy%20").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, Some(format!("/catalog/genre/{}", genre_id)));

    let (status, _, body) = get(app(&state), &format!("/catalog/genre/{}", genre_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Genre: Epic Fantasy"));
    assert!(body.contains("The Name of the Wind"));
    assert_eq!(state.genre_repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_genre_detail_not_found() {
    let state = setup_test_state().await;
    let (status, _, body) = get(app(&state), "/catalog/genre/999").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Genre not found"));
}

#[tokio::test]
async fn test_author_detail_lists_books_and_lifespan() {
    let state = setup_test_state().await;
    let (author_id, _, _) = create_test_book(&state).await;

    let uri = format!("/catalog/author/{}", author_id);
    let (status, _, body) = get(app(&state), &uri).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Rothfuss, Patrick"));
    assert!(body.contains("June 6, 1973 - Present"));
    assert!(body.contains("The Name of the Wind"));
}

#[tokio::test]
async fn test_create_author_reports_every_invalid_field() {
    let state = setup_test_state().await;
    let (status, _, body) = post_form(
        app(&state),
        "/catalog/author/create",
        "first_name=J.R.R.&family_name=&date_of_birth=1892-13-45&date_of_death=",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("First name has non-alphanumeric characters."));
    assert!(body.contains("Family name must be specified."));
    assert!(body.contains("Invalid date of birth"));
    assert!(!body.contains("Invalid date of death"));
    assert_eq!(state.author_repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_update_author_round_trip() {
    let state = setup_test_state().await;
    let (author_id, _, _) = create_test_book(&state).await;

    let uri = format!("/catalog/author/{}/update", author_id);
    let (status, location, _) = post_form(
        app(&state),
        &uri,
        "first_name=Pat&family_name=Rothfuss&date_of_birth=1973-06-06&date_of_death=",
    )
    .await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, Some(format!("/catalog/author/{}", author_id)));

    let (_, _, body) = get(app(&state), &uri).await;
    assert!(body.contains(r#"value="Pat""#));
    assert!(body.contains(r#"value="1973-06-06""#));
}

#[tokio::test]
async fn test_update_missing_author_is_not_found() {
    let state = setup_test_state().await;
    let (status, _, _) = post_form(
        app(&state),
        "/catalog/author/42/update",
        "first_name=Ursula&family_name=LeGuin",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_form_for_missing_author_redirects() {
    let state = setup_test_state().await;
    let (status, location, _) = get(app(&state), "/catalog/author/42/delete").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/catalog/authors"));
}

#[tokio::test]
async fn test_author_delete_blocked_while_books_exist() {
    let state = setup_test_state().await;
    let (author_id, _, _) = create_test_book(&state).await;

    let uri = format!("/catalog/author/{}/delete", author_id);
    let (status, _, body) = post_form(app(&state), &uri, "").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Delete the following books"));
    assert_eq!(state.author_repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_create_book_with_genres() {
    let state = setup_test_state().await;
    let (author_id, genre_id, _) = create_test_book(&state).await;
    let poetry = state
        .genre_repo
        .create(GenreDraft {
            name: "Poetry".to_string(),
        })
        .await
        .unwrap();

    let body = format!(
        "title=The+Wise+Man%27s+Fear&author={}&summary=Day+two.&isbn=9780756407919&genre={}&genre={}",
        author_id, genre_id, poetry.id
    );
    let (status, location, _) = post_form(app(&state), "/catalog/book/create", &body).await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    let books = state.book_repo.find_by_genre(poetry.id).await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "The Wise Man&#x27;s Fear");
    assert_eq!(books[0].genre.len(), 2);
    assert_eq!(location, Some(books[0].url()));
}

#[tokio::test]
async fn test_create_book_requires_author() {
    let state = setup_test_state().await;
    let (status, _, body) = post_form(
        app(&state),
        "/catalog/book/create",
        "title=Orphan&author=&summary=No+author&isbn=123",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Author must not be empty."));
    assert_eq!(state.book_repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_book_delete_blocked_while_copies_exist() {
    let state = setup_test_state().await;
    let (_, _, book_id) = create_test_book(&state).await;
    create_test_copy(&state, book_id, BookStatus::Available).await;

    let uri = format!("/catalog/book/{}/delete", book_id);
    let (status, _, body) = post_form(app(&state), &uri, "").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Delete the following copies"));
    assert_eq!(state.book_repo.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_book_detail_lists_copies() {
    let state = setup_test_state().await;
    let (_, _, book_id) = create_test_book(&state).await;
    create_test_copy(&state, book_id, BookStatus::Reserved).await;

    let (status, _, body) = get(app(&state), &format!("/catalog/book/{}", book_id)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Gollancz, 2011"));
    assert!(body.contains("Reserved"));
    assert!(body.contains("Fantasy"));
}

#[tokio::test]
async fn test_create_copy_defaults_status_and_due_back() {
    let state = setup_test_state().await;
    let (_, _, book_id) = create_test_book(&state).await;
    let before = Utc::now();

    let body = format!("book={}&imprint=Tor%2C+2007", book_id);
    let (status, location, _) =
        post_form(app(&state), "/catalog/bookinstance/create", &body).await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    let copies = state.instance_repo.find_by_book(book_id).await.unwrap();
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].status, BookStatus::Maintenance);
    assert!(copies[0].due_back >= before - chrono::Duration::seconds(1));
    assert_eq!(location, Some(copies[0].url()));
}

#[tokio::test]
async fn test_create_copy_rejects_unknown_status() {
    let state = setup_test_state().await;
    let (_, _, book_id) = create_test_book(&state).await;

    let body = format!("book={}&imprint=Tor&status=Lost&due_back=2026-02-30", book_id);
    let (status, _, body) = post_form(app(&state), "/catalog/bookinstance/create", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Invalid status"));
    assert!(body.contains("Invalid date"));
    assert_eq!(state.instance_repo.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_copy_then_missing_copy_redirects() {
    let state = setup_test_state().await;
    let (_, _, book_id) = create_test_book(&state).await;
    let copy_id = create_test_copy(&state, book_id, BookStatus::Loaned).await;

    let uri = format!("/catalog/bookinstance/{}/delete", copy_id);
    let (status, location, _) = post_form(app(&state), &uri, "").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/catalog/bookinstances"));

    let (status, location, _) = get(app(&state), &uri).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/catalog/bookinstances"));

    let (status, _, _) = get(app(&state), &format!("/catalog/bookinstance/{}", copy_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_book_round_trip_replaces_genres() {
    let state = setup_test_state().await;
    let (author_id, _, book_id) = create_test_book(&state).await;
    let poetry = state
        .genre_repo
        .create(GenreDraft {
            name: "Poetry".to_string(),
        })
        .await
        .unwrap();

    let uri = format!("/catalog/book/{}/update", book_id);
    let body = format!(
        "title=%20Earthsea%202%20&author={}&summary=%20Second%20book.%20&isbn=%20123%20&genre={}",
        author_id, poetry.id
    );
    let (status, location, _) = post_form(app(&state), &uri, &body).await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, Some(format!("/catalog/book/{}", book_id)));

    let book = state.book_repo.find_by_id(book_id).await.unwrap().unwrap();
    assert_eq!(book.title, "Earthsea 2");
    assert_eq!(book.summary, "Second book.");
    assert_eq!(book.isbn, "123");
    assert_eq!(book.genre.len(), 1);
    assert_eq!(book.genre[0].id, poetry.id);

    let (status, _, body) = get(app(&state), &format!("/catalog/book/{}", book_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Earthsea 2"));
    assert!(body.contains("Poetry"));
    assert!(!body.contains("Fantasy"));
}

#[tokio::test]
async fn test_update_copy_round_trip() {
    let state = setup_test_state().await;
    let (_, _, book_id) = create_test_book(&state).await;
    let copy_id = create_test_copy(&state, book_id, BookStatus::Available).await;

    let uri = format!("/catalog/bookinstance/{}/update", copy_id);
    let body = format!(
        "book={}&imprint=Tor%2C+2007&status=Loaned&due_back=2026-12-01",
        book_id
    );
    let (status, location, _) = post_form(app(&state), &uri, &body).await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location, Some(format!("/catalog/bookinstance/{}", copy_id)));

    let (status, _, body) = get(app(&state), &format!("/catalog/bookinstance/{}", copy_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Tor, 2007"));
    assert!(body.contains("Loaned"));
    assert!(body.contains("December 1, 2026"));
}

#[tokio::test]
async fn test_update_copy_with_blank_due_date_keeps_stored_date() {
    let state = setup_test_state().await;
    let (_, _, book_id) = create_test_book(&state).await;
    let copy_id = create_test_copy(&state, book_id, BookStatus::Loaned).await;

    let uri = format!("/catalog/bookinstance/{}/update", copy_id);
    let dated = format!("book={}&imprint=Tor&status=Loaned&due_back=2026-12-01", book_id);
    post_form(app(&state), &uri, &dated).await;

    let blank = format!("book={}&imprint=Tor&status=Reserved&due_back=", book_id);
    let (status, _, _) = post_form(app(&state), &uri, &blank).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let copy = state.instance_repo.find_by_id(copy_id).await.unwrap().unwrap();
    assert_eq!(copy.status, BookStatus::Reserved);
    assert_eq!(copy.due(), "2026-12-01");
}
