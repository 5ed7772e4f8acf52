use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::dataloader::{DataLoader, Loader};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::db::entities::{tag, user_dislike, user_like};

/// Batches "liked tags of user N" lookups for one request into a single
/// join-table query.
pub struct LikedTagLoader {
    db: DatabaseConnection,
}

impl LikedTagLoader {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Loader<i32> for LikedTagLoader {
    type Value = Vec<tag::Model>;
    type Error = Arc<DbErr>;

    async fn load(&self, keys: &[i32]) -> Result<HashMap<i32, Self::Value>, Self::Error> {
        let rows = user_like::Entity::find()
            .filter(user_like::Column::UserId.is_in(keys.iter().copied()))
            .find_also_related(tag::Entity)
            .order_by_asc(user_like::Column::TagId)
            .all(&self.db)
            .await
            .map_err(Arc::new)?;
        Ok(group_by_user(rows))
    }
}

/// Same batching for the dislikes set.
pub struct DislikedTagLoader {
    db: DatabaseConnection,
}

impl DislikedTagLoader {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl Loader<i32> for DislikedTagLoader {
    type Value = Vec<tag::Model>;
    type Error = Arc<DbErr>;

    async fn load(&self, keys: &[i32]) -> Result<HashMap<i32, Self::Value>, Self::Error> {
        let rows = user_dislike::Entity::find()
            .filter(user_dislike::Column::UserId.is_in(keys.iter().copied()))
            .find_also_related(tag::Entity)
            .order_by_asc(user_dislike::Column::TagId)
            .all(&self.db)
            .await
            .map_err(Arc::new)?;
        Ok(group_by_user(rows))
    }
}

fn group_by_user<L>(rows: Vec<(L, Option<tag::Model>)>) -> HashMap<i32, Vec<tag::Model>>
where
    L: UserKeyed,
{
    let mut map: HashMap<i32, Vec<tag::Model>> = HashMap::new();
    for (link, tag) in rows {
        if let Some(tag) = tag {
            map.entry(link.user_id()).or_default().push(tag);
        }
    }
    map
}

trait UserKeyed {
    fn user_id(&self) -> i32;
}

impl UserKeyed for user_like::Model {
    fn user_id(&self) -> i32 {
        self.user_id
    }
}

impl UserKeyed for user_dislike::Model {
    fn user_id(&self) -> i32 {
        self.user_id
    }
}

/// Attaches fresh dataloaders to a request. Loaders cache within one
/// request only; sharing them across requests would leak stale entries
/// between unrelated callers, so this runs once per inbound request.
pub fn attach_loaders(
    request: async_graphql::Request,
    db: &DatabaseConnection,
) -> async_graphql::Request {
    request
        .data(DataLoader::new(LikedTagLoader::new(db.clone()), tokio::spawn))
        .data(DataLoader::new(
            DislikedTagLoader::new(db.clone()),
            tokio::spawn,
        ))
}
