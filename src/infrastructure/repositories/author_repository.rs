//! SeaORM implementation of AuthorRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use super::{now_rfc3339, write_error};
use crate::domain::{Author, AuthorDraft, AuthorRepository, DomainError};
use crate::models::author::{ActiveModel, Column, Entity as AuthorEntity, Model};

impl From<Model> for Author {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            family_name: model.family_name,
            date_of_birth: model.date_of_birth,
            date_of_death: model.date_of_death,
        }
    }
}

/// SeaORM-based implementation of AuthorRepository
pub struct SeaOrmAuthorRepository {
    db: DatabaseConnection,
}

impl SeaOrmAuthorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthorRepository for SeaOrmAuthorRepository {
    async fn find_all(&self) -> Result<Vec<Author>, DomainError> {
        let authors = AuthorEntity::find()
            .order_by_asc(Column::FamilyName)
            .order_by_asc(Column::FirstName)
            .all(&self.db)
            .await?;

        Ok(authors.into_iter().map(Author::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, DomainError> {
        let author = AuthorEntity::find_by_id(id).one(&self.db).await?;
        Ok(author.map(Author::from))
    }

    async fn create(&self, draft: AuthorDraft) -> Result<Author, DomainError> {
        let now = now_rfc3339();

        let author = ActiveModel {
            first_name: Set(draft.first_name),
            family_name: Set(draft.family_name),
            date_of_birth: Set(draft.date_of_birth),
            date_of_death: Set(draft.date_of_death),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = author
            .insert(&self.db)
            .await
            .map_err(|e| write_error("Author", e))?;

        Ok(result.into())
    }

    async fn update(&self, id: i32, draft: AuthorDraft) -> Result<Author, DomainError> {
        let existing = AuthorEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Author"))?;

        let mut active: ActiveModel = existing.into();
        active.first_name = Set(draft.first_name);
        active.family_name = Set(draft.family_name);
        active.date_of_birth = Set(draft.date_of_birth);
        active.date_of_death = Set(draft.date_of_death);
        active.updated_at = Set(now_rfc3339());

        let result = active
            .update(&self.db)
            .await
            .map_err(|e| write_error("Author", e))?;

        Ok(result.into())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = AuthorEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Author"));
        }

        Ok(())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(AuthorEntity::find().count(&self.db).await?)
    }
}
