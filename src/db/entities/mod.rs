//! SeaORM entities mapping to the database tables.
//!
//! `user_like` and `user_dislike` are plain association tables between
//! users and tags; they carry no attributes of their own.

pub mod tag;
pub mod user;
pub mod user_dislike;
pub mod user_like;

pub mod prelude {
    pub use super::tag::Entity as Tag;
    pub use super::tag::Model as TagModel;

    pub use super::user::Entity as User;
    pub use super::user::Model as UserModel;

    pub use super::user_dislike::Entity as UserDislike;
    pub use super::user_like::Entity as UserLike;
}
