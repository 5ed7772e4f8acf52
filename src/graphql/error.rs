use async_graphql::{Error, ErrorExtensions};
use tracing::error;

use crate::db::services::StoreError;

/// Maps a store failure onto a client-facing GraphQL error with a stable
/// `extensions.code`. Raw database causes are logged server-side and never
/// cross the trust boundary: the client only sees a fixed generic message.
pub fn store_error(err: StoreError) -> Error {
    match err {
        StoreError::NotFound(msg) => {
            Error::new(msg).extend_with(|_, e| e.set("code", "NOT_FOUND"))
        }
        StoreError::Conflict(msg) => {
            Error::new(msg).extend_with(|_, e| e.set("code", "CONFLICT"))
        }
        StoreError::Db(cause) => {
            error!(error = %cause, "store error during resolver execution");
            Error::new("internal server error").extend_with(|_, e| e.set("code", "INTERNAL"))
        }
    }
}

/// Masks a dataloader failure the same way as `StoreError::Db`.
pub fn loader_error(cause: std::sync::Arc<sea_orm::DbErr>) -> Error {
    error!(error = %cause, "store error during batched load");
    Error::new("internal server error").extend_with(|_, e| e.set("code", "INTERNAL"))
}

/// Input that failed resolver-level validation (empty names and the like).
pub fn bad_input(msg: impl Into<String>) -> Error {
    Error::new(msg).extend_with(|_, e| e.set("code", "BAD_USER_INPUT"))
}
