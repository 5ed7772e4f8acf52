use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::db::entities::{tag, user, user_dislike, user_like};
use crate::db::services::{tag_service, StoreError};

/// Retrieves all users.
pub async fn get_all_users(db: &DatabaseConnection) -> Result<Vec<user::Model>, DbErr> {
    user::Entity::find().all(db).await
}

/// Retrieves a user by id.
pub async fn get_user_by_id(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find_by_id(user_id).one(db).await
}

/// Retrieves a user by email.
pub async fn get_user_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> Result<Option<user::Model>, DbErr> {
    user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await
}

/// Creates a new user. A duplicate email surfaces as `Conflict`.
pub async fn create_user(
    db: &DatabaseConnection,
    name: &str,
    email: &str,
) -> Result<user::Model, StoreError> {
    let user = user::ActiveModel {
        name: Set(name.to_owned()),
        email: Set(email.to_owned()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    user.insert(db).await.map_err(|err| match err.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
            StoreError::Conflict(format!("a user with email '{email}' already exists"))
        }
        _ => StoreError::Db(err),
    })
}

/// Connects a tag to the user's likes set. The conflict-ignoring insert
/// makes repeated connects idempotent.
pub async fn add_like(
    db: &DatabaseConnection,
    user_id: i32,
    tag_name: &str,
) -> Result<user::Model, StoreError> {
    let user = get_user_by_id(db, user_id)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("user {user_id} not found")))?;
    let tag = tag_service::find_or_create_tag(db, tag_name).await?;

    let link = user_like::ActiveModel {
        user_id: Set(user.id),
        tag_id: Set(tag.id),
    };
    match user_like::Entity::insert(link)
        .on_conflict(
            OnConflict::columns([user_like::Column::UserId, user_like::Column::TagId])
                .do_nothing()
                .to_owned(),
        )
        .exec(db)
        .await
    {
        Ok(_) | Err(DbErr::RecordNotInserted) => Ok(user),
        Err(err) => Err(err.into()),
    }
}

/// Connects a tag to the user's dislikes set. Same semantics as `add_like`;
/// the two sets are independent, so a tag may appear in both.
pub async fn add_dislike(
    db: &DatabaseConnection,
    user_id: i32,
    tag_name: &str,
) -> Result<user::Model, StoreError> {
    let user = get_user_by_id(db, user_id)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("user {user_id} not found")))?;
    let tag = tag_service::find_or_create_tag(db, tag_name).await?;

    let link = user_dislike::ActiveModel {
        user_id: Set(user.id),
        tag_id: Set(tag.id),
    };
    match user_dislike::Entity::insert(link)
        .on_conflict(
            OnConflict::columns([user_dislike::Column::UserId, user_dislike::Column::TagId])
                .do_nothing()
                .to_owned(),
        )
        .exec(db)
        .await
    {
        Ok(_) | Err(DbErr::RecordNotInserted) => Ok(user),
        Err(err) => Err(err.into()),
    }
}

/// Tags the user likes, in insertion-independent name order.
pub async fn get_liked_tags(
    db: &DatabaseConnection,
    user: &user::Model,
) -> Result<Vec<tag::Model>, DbErr> {
    user.find_linked(user::LikedTags)
        .order_by_asc(tag::Column::Id)
        .all(db)
        .await
}

/// Tags the user dislikes.
pub async fn get_disliked_tags(
    db: &DatabaseConnection,
    user: &user::Model,
) -> Result<Vec<tag::Model>, DbErr> {
    user.find_linked(user::DislikedTags)
        .order_by_asc(tag::Column::Id)
        .all(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_util::sqlite_db;

    #[tokio::test]
    async fn creates_and_fetches_users() {
        let db = sqlite_db().await;
        let alice = create_user(&db, "Alice", "alice@example.com").await.unwrap();
        let bob = create_user(&db, "Bob", "bob@example.com").await.unwrap();
        assert_ne!(alice.id, bob.id);

        let all = get_all_users(&db).await.unwrap();
        assert_eq!(all.len(), 2);

        let fetched = get_user_by_id(&db, alice.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "alice@example.com");
        assert!(get_user_by_id(&db, 9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict_not_an_overwrite() {
        let db = sqlite_db().await;
        create_user(&db, "Alice", "alice@example.com").await.unwrap();
        let err = create_user(&db, "Impostor", "alice@example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        let all = get_all_users(&db).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Alice");
    }

    #[tokio::test]
    async fn add_like_is_idempotent() {
        let db = sqlite_db().await;
        let alice = create_user(&db, "Alice", "alice@example.com").await.unwrap();

        add_like(&db, alice.id, "JavaScript").await.unwrap();
        add_like(&db, alice.id, "JavaScript").await.unwrap();

        let likes = get_liked_tags(&db, &alice).await.unwrap();
        assert_eq!(likes.len(), 1);
        assert_eq!(likes[0].name, "JavaScript");
    }

    #[tokio::test]
    async fn add_like_for_unknown_user_is_not_found() {
        let db = sqlite_db().await;
        let err = add_like(&db, 42, "JavaScript").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        // The tag must not be created for a rejected connect either way;
        // the user lookup happens first.
        assert!(tag_service::get_tag_by_name(&db, "JavaScript")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn likes_and_dislikes_are_independent_sets() {
        let db = sqlite_db().await;
        let alice = create_user(&db, "Alice", "alice@example.com").await.unwrap();

        add_like(&db, alice.id, "Ruby").await.unwrap();
        add_dislike(&db, alice.id, "Ruby").await.unwrap();

        let likes = get_liked_tags(&db, &alice).await.unwrap();
        let dislikes = get_disliked_tags(&db, &alice).await.unwrap();
        assert_eq!(likes.len(), 1);
        assert_eq!(dislikes.len(), 1);
        assert_eq!(likes[0].id, dislikes[0].id);
    }

    #[tokio::test]
    async fn liking_reuses_an_existing_tag_row() {
        let db = sqlite_db().await;
        let alice = create_user(&db, "Alice", "alice@example.com").await.unwrap();
        let bob = create_user(&db, "Bob", "bob@example.com").await.unwrap();

        add_like(&db, alice.id, "Python").await.unwrap();
        add_like(&db, bob.id, "Python").await.unwrap();

        let tags = crate::db::entities::tag::Entity::find().all(&db).await.unwrap();
        assert_eq!(tags.len(), 1);
    }
}
