use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book_instances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub book_id: i32,
    pub imprint: String,
    /// Circulation status of this physical copy.
    /// Valid values:
    /// - `Available`: On shelf, can be loaned
    /// - `Maintenance`: Being repaired or processed (default)
    /// - `Loaned`: Currently lent out, see `due_back`
    /// - `Reserved`: Held for a patron
    #[sea_orm(default_value = "Maintenance")]
    pub status: String,
    pub due_back: DateTimeUtc,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
