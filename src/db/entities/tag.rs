use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    // Tag names are globally unique and case-sensitive.
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_like::Entity")]
    UserLikes,

    #[sea_orm(has_many = "super::user_dislike::Entity")]
    UserDislikes,
}

impl Related<super::user_like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserLikes.def()
    }
}

impl Related<super::user_dislike::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserDislikes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
