use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};

pub mod entities;
pub mod seed;
pub mod services;

/// Creates the application tables if they do not exist yet.
///
/// Statements are generated from the entity definitions, so this works
/// against both Postgres and the SQLite databases used in tests.
pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let stmts = [
        schema.create_table_from_entity(entities::user::Entity),
        schema.create_table_from_entity(entities::tag::Entity),
        schema.create_table_from_entity(entities::user_like::Entity),
        schema.create_table_from_entity(entities::user_dislike::Entity),
    ];
    for mut stmt in stmts {
        stmt.if_not_exists();
        db.execute(builder.build(&stmt)).await?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_util {
    use sea_orm::{ConnectOptions, Database, DatabaseConnection};

    /// Fresh in-memory SQLite database with the application schema.
    ///
    /// The pool is capped at one connection: every handle must see the
    /// same in-memory database.
    pub async fn sqlite_db() -> DatabaseConnection {
        let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
        opt.max_connections(1);
        let db = Database::connect(opt)
            .await
            .expect("failed to open in-memory sqlite");
        super::create_tables(&db).await.expect("failed to create tables");
        db
    }
}
