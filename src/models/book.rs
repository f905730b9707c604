use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub author_id: i32,
    pub summary: String,
    pub isbn: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Author,
    #[sea_orm(has_many = "super::book_instance::Entity")]
    BookInstances,
    #[sea_orm(has_many = "super::book_genres::Entity")]
    BookGenres,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::book_instance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookInstances.def()
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::book_genres::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::book_genres::Relation::Book.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
