use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use dotenv::dotenv;
use sea_orm::{ConnectOptions, Database};
use tokio::time::interval;
use tracing::info;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use likeboard::db;
use likeboard::graphql;
use likeboard::server::config::ServerConfig;
use likeboard::web::middleware::rate_limit::RateLimiter;
use likeboard::web::{self, AppState};

const RATE_LIMIT_MAX_REQUESTS: u32 = 100;
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(15 * 60);

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Listening port, overriding PORT from the environment
    #[arg(short, long)]
    port: Option<u16>,
}

fn init_logging() {
    // Log to a file: JSON format, daily rotation
    let file_appender = rolling::daily("logs", "likeboard.log");
    let file_layer = fmt::layer().with_writer(file_appender).with_ansi(false).json();

    // Log to stdout: human-readable format
    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sea_orm=warn,sqlx::query=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    init_logging();
    dotenv().ok();

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.port = port;
    }
    let config = Arc::new(config);
    info!(environment = %config.environment, "starting likeboard");
    // Recognized for a future shared rate-limit counter store; the limiter
    // below is process-local.
    info!(
        redis_host = %config.redis_host,
        redis_port = config.redis_port,
        "external counter store configured but unused, rate limiting is in-process"
    );

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(10).min_connections(2);
    let db = Database::connect(opt).await?;
    db::create_tables(&db).await?;

    let rate_limiter = Arc::new(RateLimiter::new(RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW));
    let limiter_for_prune = rate_limiter.clone();
    tokio::spawn(async move {
        let mut ticker = interval(RATE_LIMIT_WINDOW);
        loop {
            ticker.tick().await;
            limiter_for_prune.prune();
        }
    });

    let schema = graphql::build_schema(db.clone());
    let state = Arc::new(AppState {
        db,
        schema,
        config: config.clone(),
        rate_limiter,
    });
    let app = web::create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, "GraphQL server listening on /graphql");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
