use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub mod tag_service;
pub mod user_service;

/// Store-layer failures, classified so the GraphQL layer can map each
/// variant to a stable client-facing code instead of leaking the raw
/// database message.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(DbErr),
}

impl From<DbErr> for StoreError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => StoreError::Conflict(msg),
            _ => StoreError::Db(err),
        }
    }
}
