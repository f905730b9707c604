//! SeaORM implementation of BookInstanceRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::{now_rfc3339, write_error};
use crate::domain::{
    BookInstance, BookInstanceDraft, BookInstanceRepository, BookRef, BookStatus, DomainError,
};
use crate::models::book::{Entity as BookEntity, Model as BookModel};
use crate::models::book_instance::{ActiveModel, Column, Entity as InstanceEntity, Model};

/// SeaORM-based implementation of BookInstanceRepository
pub struct SeaOrmBookInstanceRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookInstanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_populated(&self, id: i32) -> Result<BookInstance, DomainError> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Book copy"))
    }
}

fn to_domain((instance, book): (Model, Option<BookModel>)) -> Result<BookInstance, DomainError> {
    let book = book.ok_or_else(|| {
        DomainError::Internal(format!(
            "book instance {} references missing book {}",
            instance.id, instance.book_id
        ))
    })?;
    let status: BookStatus = instance
        .status
        .parse()
        .map_err(|e: crate::domain::UnknownStatus| DomainError::Internal(e.to_string()))?;

    Ok(BookInstance {
        id: instance.id,
        book: BookRef {
            id: book.id,
            title: book.title,
        },
        imprint: instance.imprint,
        status,
        due_back: instance.due_back,
    })
}

fn require_book(draft: &BookInstanceDraft) -> Result<i32, DomainError> {
    draft
        .book_id
        .ok_or_else(|| DomainError::Internal("book instance draft without book".to_string()))
}

#[async_trait]
impl BookInstanceRepository for SeaOrmBookInstanceRepository {
    async fn find_all(&self) -> Result<Vec<BookInstance>, DomainError> {
        let instances = InstanceEntity::find()
            .find_also_related(BookEntity)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        instances.into_iter().map(to_domain).collect()
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<BookInstance>, DomainError> {
        let result = InstanceEntity::find_by_id(id)
            .find_also_related(BookEntity)
            .one(&self.db)
            .await?;

        result.map(to_domain).transpose()
    }

    async fn find_by_book(&self, book_id: i32) -> Result<Vec<BookInstance>, DomainError> {
        let instances = InstanceEntity::find()
            .filter(Column::BookId.eq(book_id))
            .find_also_related(BookEntity)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await?;

        instances.into_iter().map(to_domain).collect()
    }

    async fn create(&self, draft: BookInstanceDraft) -> Result<BookInstance, DomainError> {
        let book_id = require_book(&draft)?;
        let now = now_rfc3339();

        let instance = ActiveModel {
            book_id: Set(book_id),
            imprint: Set(draft.imprint.clone()),
            status: Set(draft.status.as_str().to_string()),
            due_back: Set(draft.due_back_at(Utc::now())),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = instance
            .insert(&self.db)
            .await
            .map_err(|e| write_error("Book copy", e))?;

        self.find_populated(result.id).await
    }

    async fn update(
        &self,
        id: i32,
        draft: BookInstanceDraft,
    ) -> Result<BookInstance, DomainError> {
        let book_id = require_book(&draft)?;

        let existing = InstanceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Book copy"))?;

        let mut active: ActiveModel = existing.into();
        active.book_id = Set(book_id);
        active.imprint = Set(draft.imprint.clone());
        active.status = Set(draft.status.as_str().to_string());
        // blank keeps the stored due date
        if draft.due_back.is_some() {
            active.due_back = Set(draft.due_back_at(Utc::now()));
        }
        active.updated_at = Set(now_rfc3339());

        active
            .update(&self.db)
            .await
            .map_err(|e| write_error("Book copy", e))?;

        self.find_populated(id).await
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = InstanceEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Book copy"));
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(InstanceEntity::find().count(&self.db).await?)
    }

    async fn count_by_status(&self, status: BookStatus) -> Result<u64, DomainError> {
        let count = InstanceEntity::find()
            .filter(Column::Status.eq(status.as_str()))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
