use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};

use crate::db::entities::tag;
use crate::db::services::StoreError;

/// Retrieves a tag by its exact (case-sensitive) name.
pub async fn get_tag_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<tag::Model>, DbErr> {
    tag::Entity::find()
        .filter(tag::Column::Name.eq(name))
        .one(db)
        .await
}

/// Looks up a tag by name, creating it if absent. Idempotent.
///
/// Two concurrent callers may both miss the lookup and race on the insert.
/// The insert ignores the unique-name conflict and the loser re-reads the
/// winner's row, so a uniqueness violation never reaches the caller.
pub async fn find_or_create_tag(
    db: &DatabaseConnection,
    name: &str,
) -> Result<tag::Model, StoreError> {
    if let Some(tag) = get_tag_by_name(db, name).await? {
        return Ok(tag);
    }

    let insert = tag::ActiveModel {
        name: Set(name.to_owned()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    match tag::Entity::insert(insert)
        .on_conflict(
            OnConflict::column(tag::Column::Name)
                .do_nothing()
                .to_owned(),
        )
        .exec(db)
        .await
    {
        // RecordNotInserted means a concurrent caller won the race.
        Ok(_) | Err(DbErr::RecordNotInserted) => {}
        Err(err) => return Err(err.into()),
    }

    get_tag_by_name(db, name)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("tag '{name}' missing after insert")))
}
