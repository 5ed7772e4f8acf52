use std::any::Any;
use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    middleware as axum_middleware,
    response::{Html, IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use sea_orm::DatabaseConnection;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::graphql::{self, AppSchema};
use crate::server::config::ServerConfig;
use crate::web::middleware::rate_limit::RateLimiter;
use crate::web::models::AuthenticatedUser;

pub mod error;
pub mod middleware;
pub mod models;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub schema: AppSchema,
    pub config: Arc<ServerConfig>,
    pub rate_limiter: Arc<RateLimiter>,
}

async fn health_check_handler() -> &'static str {
    "OK"
}

/// Interactive explorer on GET, available outside production only.
async fn graphiql_handler(State(state): State<Arc<AppState>>) -> Response {
    if state.config.is_production() {
        return StatusCode::NOT_FOUND.into_response();
    }
    Html(GraphiQLSource::build().endpoint("/graphql").finish()).into_response()
}

/// GraphQL execution step. Builds the per-request context: fresh
/// dataloaders (never shared across requests) plus the identity decoded by
/// the auth gate.
async fn graphql_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<AuthenticatedUser>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let request = graphql::loaders::attach_loaders(req.into_inner(), &state.db).data(identity);
    state.schema.execute(request).await.into()
}

/// Fallback for anything that escapes the pipeline: full detail goes to the
/// server log, the client gets one fixed generic message.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    };
    error!(panic = %detail, "request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": "internal server error" })),
    )
        .into_response()
}

/// Composes the request pipeline. Gate order is fixed: security headers,
/// rate limit, request logging, CORS, authentication, GraphQL execution.
/// Cheap rejections run before credential verification; `.layer` calls are
/// listed innermost-first because axum wraps bottom-up.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = if state.config.is_production() {
        let origin = state
            .config
            .frontend_url
            .parse::<HeaderValue>()
            .expect("FRONTEND_URL is not a valid origin");
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    } else {
        CorsLayer::new()
            .allow_origin(AnyOrigin)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
    };

    let graphql_routes = Router::new()
        .route("/graphql", get(graphiql_handler).post(graphql_handler))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::auth,
        ));

    Router::new()
        .route("/api/health", get(health_check_handler))
        .merge(graphql_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::security::security_headers,
        ))
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::Arc;
    use std::time::Duration;

    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use sea_orm::DatabaseConnection;

    use super::AppState;
    use crate::server::config::ServerConfig;
    use crate::web::middleware::rate_limit::RateLimiter;
    use crate::web::models::Claims;

    pub const TEST_SECRET: &str = "your-secret-key";

    pub fn test_config() -> ServerConfig {
        ServerConfig {
            port: 4000,
            frontend_url: "http://localhost:3000".to_string(),
            jwt_secret: TEST_SECRET.to_string(),
            database_url: String::new(),
            redis_host: "localhost".to_string(),
            redis_port: 6379,
            environment: "development".to_string(),
        }
    }

    pub fn test_state() -> Arc<AppState> {
        test_state_with_limiter(RateLimiter::new(1000, Duration::from_secs(900)))
    }

    /// State over a disconnected handle; suitable for gate tests that
    /// never touch the store.
    pub fn test_state_with_limiter(limiter: RateLimiter) -> Arc<AppState> {
        state_for(DatabaseConnection::Disconnected, limiter)
    }

    pub fn state_for(db: DatabaseConnection, limiter: RateLimiter) -> Arc<AppState> {
        Arc::new(AppState {
            schema: crate::graphql::build_schema(db.clone()),
            db,
            config: Arc::new(test_config()),
            rate_limiter: Arc::new(limiter),
        })
    }

    pub fn mint_token(sub: &str, ttl_secs: i64) -> String {
        let exp = (Utc::now() + chrono::Duration::seconds(ttl_secs)).timestamp() as usize;
        let claims = Claims {
            sub: sub.to_string(),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_ref()),
        )
        .expect("failed to mint test token")
    }
}
