use dotenv::dotenv;
use sea_orm::{ConnectOptions, Database};
use tracing::error;

use likeboard::db;
use likeboard::server::config::ServerConfig;

/// Populates the database with the development dataset. Exits non-zero if
/// any store operation fails.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();
    dotenv().ok();

    if let Err(err) = run().await {
        error!(error = %err, "seeding failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = ServerConfig::from_env()?;

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(2);
    let db = Database::connect(opt).await?;

    db::create_tables(&db).await?;
    db::seed::run(&db).await?;
    Ok(())
}
