use sea_orm::DatabaseConnection;
use tracing::info;

use crate::db::entities::user;
use crate::db::services::{tag_service, user_service, StoreError};

const TAG_NAMES: &[&str] = &[
    "JavaScript",
    "Python",
    "Java",
    "Ruby",
    "Go",
    "C#",
    "TypeScript",
    "Rust",
];

const USERS: &[(&str, &str)] = &[
    ("Alice", "alice@example.com"),
    ("Bob", "bob@example.com"),
    ("Charlie", "charlie@example.com"),
    ("Diana", "diana@example.com"),
    ("Ethan", "ethan@example.com"),
];

/// Upserts a user by email: creating it wins, losing to an existing row
/// falls back to the lookup.
async fn ensure_user(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
) -> Result<user::Model, StoreError> {
    match user_service::create_user(db, name, email).await {
        Ok(user) => Ok(user),
        Err(StoreError::Conflict(_)) => user_service::get_user_by_email(db, email)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("user '{email}' missing after upsert"))),
        Err(err) => Err(err),
    }
}

/// Populates the development dataset. Safe to run repeatedly; every
/// insert is conflict-ignoring.
pub async fn run(db: &DatabaseConnection) -> Result<(), StoreError> {
    for name in TAG_NAMES {
        tag_service::find_or_create_tag(db, name).await?;
    }

    for (name, email) in USERS {
        ensure_user(db, name, email).await?;
    }

    let alice = ensure_user(db, "Alice", "alice@example.com").await?;
    user_service::add_like(db, alice.id, "JavaScript").await?;
    user_service::add_like(db, alice.id, "Python").await?;
    user_service::add_dislike(db, alice.id, "Ruby").await?;

    let bob = ensure_user(db, "Bob", "bob@example.com").await?;
    user_service::add_like(db, bob.id, "Java").await?;
    user_service::add_like(db, bob.id, "C#").await?;
    user_service::add_dislike(db, bob.id, "Go").await?;

    info!("seed data inserted");
    Ok(())
}
