use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
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

/// Tags a user likes, reached through the `user_likes` association table.
///
/// A `Linked` path is used instead of `Related` because users reach tags
/// through two different join tables (likes and dislikes), and `Related`
/// only supports a single `via`.
#[derive(Debug)]
pub struct LikedTags;

impl Linked for LikedTags {
    type FromEntity = Entity;
    type ToEntity = super::tag::Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![
            super::user_like::Relation::User.def().rev(),
            super::user_like::Relation::Tag.def(),
        ]
    }
}

/// Tags a user dislikes, reached through the `user_dislikes` table.
#[derive(Debug)]
pub struct DislikedTags;

impl Linked for DislikedTags {
    type FromEntity = Entity;
    type ToEntity = super::tag::Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![
            super::user_dislike::Relation::User.def().rev(),
            super::user_dislike::Relation::Tag.def(),
        ]
    }
}

impl ActiveModelBehavior for ActiveModel {}
