use async_graphql::{EmptySubscription, Schema};
use sea_orm::DatabaseConnection;

pub mod error;
pub mod loaders;
pub mod mutation;
pub mod query;
pub mod types;

pub use mutation::MutationRoot;
pub use query::QueryRoot;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the process-wide schema. The store handle lives in schema data;
/// per-request values (identity, dataloaders) are attached to each request
/// by the HTTP handler instead.
pub fn build_schema(db: DatabaseConnection) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(db)
        .limit_depth(10)
        .limit_complexity(200)
        .finish()
}
