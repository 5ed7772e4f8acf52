use async_graphql::{Context, Object, Result, ID};
use sea_orm::DatabaseConnection;

use crate::db::services::user_service;
use crate::graphql::error::store_error;
use crate::graphql::types::User;

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All users; likes and dislikes resolve through the per-request
    /// dataloaders.
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let db = ctx.data_unchecked::<DatabaseConnection>();
        let users = user_service::get_all_users(db)
            .await
            .map_err(|e| store_error(e.into()))?;
        Ok(users.into_iter().map(User).collect())
    }

    /// Single user by id, or null if absent. A non-numeric id cannot match
    /// any row and resolves to null as well.
    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<Option<User>> {
        let Ok(user_id) = id.parse::<i32>() else {
            return Ok(None);
        };
        let db = ctx.data_unchecked::<DatabaseConnection>();
        let user = user_service::get_user_by_id(db, user_id)
            .await
            .map_err(|e| store_error(e.into()))?;
        Ok(user.map(User))
    }
}
