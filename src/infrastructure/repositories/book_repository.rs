//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use std::collections::{BTreeSet, HashMap};

use super::{now_rfc3339, write_error};
use crate::domain::{Author, Book, BookDraft, BookRepository, DomainError, Genre};
use crate::models::author::{self, Entity as AuthorEntity};
use crate::models::book::{ActiveModel, Column, Entity as BookEntity, Model, Relation};
use crate::models::book_genres::{self, Entity as BookGenreEntity};
use crate::models::genre::Entity as GenreEntity;

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Populate author and genre references for a batch of books, keeping their order
    async fn populate(&self, books: Vec<Model>) -> Result<Vec<Book>, DomainError> {
        if books.is_empty() {
            return Ok(Vec::new());
        }

        let book_ids: Vec<i32> = books.iter().map(|b| b.id).collect();
        let author_ids: BTreeSet<i32> = books.iter().map(|b| b.author_id).collect();

        let (authors, links) = tokio::try_join!(
            AuthorEntity::find()
                .filter(author::Column::Id.is_in(author_ids))
                .all(&self.db),
            BookGenreEntity::find()
                .filter(book_genres::Column::BookId.is_in(book_ids))
                .find_also_related(GenreEntity)
                .all(&self.db),
        )?;

        let authors: HashMap<i32, Author> = authors
            .into_iter()
            .map(|a| (a.id, Author::from(a)))
            .collect();

        let mut genres_by_book: HashMap<i32, Vec<Genre>> = HashMap::new();
        for (link, genre) in links {
            if let Some(genre) = genre {
                genres_by_book
                    .entry(link.book_id)
                    .or_default()
                    .push(Genre::from(genre));
            }
        }

        books
            .into_iter()
            .map(|model| {
                let author = authors.get(&model.author_id).cloned().ok_or_else(|| {
                    DomainError::Internal(format!(
                        "book {} references missing author {}",
                        model.id, model.author_id
                    ))
                })?;
                let mut genre = genres_by_book.remove(&model.id).unwrap_or_default();
                genre.sort_by(|a, b| a.name.cmp(&b.name));

                Ok(Book {
                    id: model.id,
                    title: model.title,
                    summary: model.summary,
                    isbn: model.isbn,
                    author,
                    genre,
                })
            })
            .collect()
    }

    async fn find_populated(&self, id: i32) -> Result<Book, DomainError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Book"))
    }
}

/// Replace the genre links of a book inside the caller's transaction
async fn link_genres<C: ConnectionTrait>(
    conn: &C,
    book_id: i32,
    genre_ids: &[i32],
) -> Result<(), DomainError> {
    BookGenreEntity::delete_many()
        .filter(book_genres::Column::BookId.eq(book_id))
        .exec(conn)
        .await?;

    let unique: BTreeSet<i32> = genre_ids.iter().copied().collect();
    if unique.is_empty() {
        return Ok(());
    }

    let links = unique.into_iter().map(|genre_id| book_genres::ActiveModel {
        book_id: Set(book_id),
        genre_id: Set(genre_id),
    });
    BookGenreEntity::insert_many(links)
        .exec_without_returning(conn)
        .await?;

    Ok(())
}

fn require_author(draft: &BookDraft) -> Result<i32, DomainError> {
    draft
        .author_id
        .ok_or_else(|| DomainError::Internal("book draft without author".to_string()))
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>, DomainError> {
        let books = BookEntity::find()
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await?;

        self.populate(books).await
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        let Some(book) = BookEntity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        Ok(self.populate(vec![book]).await?.pop())
    }

    async fn find_by_genre(&self, genre_id: i32) -> Result<Vec<Book>, DomainError> {
        let books = BookEntity::find()
            .join(JoinType::InnerJoin, Relation::BookGenres.def())
            .filter(book_genres::Column::GenreId.eq(genre_id))
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await?;

        self.populate(books).await
    }

    async fn find_by_author(&self, author_id: i32) -> Result<Vec<Book>, DomainError> {
        let books = BookEntity::find()
            .filter(Column::AuthorId.eq(author_id))
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await?;

        self.populate(books).await
    }

    async fn create(&self, draft: BookDraft) -> Result<Book, DomainError> {
        let author_id = require_author(&draft)?;
        let now = now_rfc3339();

        let txn = self.db.begin().await?;

        let book = ActiveModel {
            title: Set(draft.title),
            author_id: Set(author_id),
            summary: Set(draft.summary),
            isbn: Set(draft.isbn),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };
        let inserted = book.insert(&txn).await.map_err(|e| write_error("Book", e))?;
        link_genres(&txn, inserted.id, &draft.genre_ids).await?;

        txn.commit().await?;

        self.find_populated(inserted.id).await
    }

    async fn update(&self, id: i32, draft: BookDraft) -> Result<Book, DomainError> {
        let author_id = require_author(&draft)?;

        let txn = self.db.begin().await?;

        let existing = BookEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::not_found("Book"))?;

        let mut active: ActiveModel = existing.into();
        active.title = Set(draft.title);
        active.author_id = Set(author_id);
        active.summary = Set(draft.summary);
        active.isbn = Set(draft.isbn);
        active.updated_at = Set(now_rfc3339());
        active.update(&txn).await.map_err(|e| write_error("Book", e))?;

        link_genres(&txn, id, &draft.genre_ids).await?;

        txn.commit().await?;

        self.find_populated(id).await
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = BookEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Book"));
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(BookEntity::find().count(&self.db).await?)
    }
}
