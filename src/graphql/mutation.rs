use async_graphql::{Context, Object, Result, ID};
use sea_orm::DatabaseConnection;

use crate::db::services::{user_service, StoreError};
use crate::graphql::error::{bad_input, store_error};
use crate::graphql::types::User;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn create_user(&self, ctx: &Context<'_>, name: String, email: String) -> Result<User> {
        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(bad_input("name and email must not be empty"));
        }
        let db = ctx.data_unchecked::<DatabaseConnection>();
        let user = user_service::create_user(db, &name, &email)
            .await
            .map_err(store_error)?;
        Ok(User(user))
    }

    async fn add_like(&self, ctx: &Context<'_>, user_id: ID, tag_name: String) -> Result<User> {
        let user_id = parse_user_id(&user_id)?;
        if tag_name.trim().is_empty() {
            return Err(bad_input("tagName must not be empty"));
        }
        let db = ctx.data_unchecked::<DatabaseConnection>();
        let user = user_service::add_like(db, user_id, &tag_name)
            .await
            .map_err(store_error)?;
        Ok(User(user))
    }

    async fn add_dislike(&self, ctx: &Context<'_>, user_id: ID, tag_name: String) -> Result<User> {
        let user_id = parse_user_id(&user_id)?;
        if tag_name.trim().is_empty() {
            return Err(bad_input("tagName must not be empty"));
        }
        let db = ctx.data_unchecked::<DatabaseConnection>();
        let user = user_service::add_dislike(db, user_id, &tag_name)
            .await
            .map_err(store_error)?;
        Ok(User(user))
    }
}

/// A userId that does not parse as a numeric key cannot reference any
/// user, so it gets the same treatment as an unknown id.
fn parse_user_id(id: &ID) -> Result<i32> {
    id.parse::<i32>()
        .map_err(|_| store_error(StoreError::NotFound(format!("user {} not found", id.as_str()))))
}
