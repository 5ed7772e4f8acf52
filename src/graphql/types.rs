use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, Object, Result, ID};

use crate::db::entities::{tag, user};
use crate::graphql::error::loader_error;
use crate::graphql::loaders::{DislikedTagLoader, LikedTagLoader};

pub struct Tag(pub tag::Model);

#[Object]
impl Tag {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }
}

pub struct User(pub user::Model);

#[Object]
impl User {
    async fn id(&self) -> ID {
        ID(self.0.id.to_string())
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn email(&self) -> &str {
        &self.0.email
    }

    async fn likes(&self, ctx: &Context<'_>) -> Result<Vec<Tag>> {
        let loader = ctx.data_unchecked::<DataLoader<LikedTagLoader>>();
        let tags = loader.load_one(self.0.id).await.map_err(loader_error)?;
        Ok(tags.unwrap_or_default().into_iter().map(Tag).collect())
    }

    async fn dislikes(&self, ctx: &Context<'_>) -> Result<Vec<Tag>> {
        let loader = ctx.data_unchecked::<DataLoader<DislikedTagLoader>>();
        let tags = loader.load_one(self.0.id).await.map_err(loader_error)?;
        Ok(tags.unwrap_or_default().into_iter().map(Tag).collect())
    }
}
