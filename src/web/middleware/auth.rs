use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};
use tracing::warn;

use crate::web::error::ApiError;
use crate::web::models::{AuthenticatedUser, Claims};
use crate::web::AppState;

/// Bearer-token gate. A missing Authorization header is rejected before
/// any verification work; a present but bad credential (malformed,
/// tampered, expired) is rejected after one verification attempt.
pub async fn auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(ApiError::AuthenticationRequired)?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(ApiError::InvalidToken)?;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.config.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| {
        warn!(error = ?e, "rejected bearer token");
        ApiError::InvalidToken
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        subject: token_data.claims.sub,
    });
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::test_util::{mint_token, test_state};
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware as axum_middleware,
        routing::get,
        Extension, Router,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn whoami(Extension(user): Extension<AuthenticatedUser>) -> String {
        user.subject
    }

    fn router() -> Router {
        let state = test_state();
        Router::new()
            .route("/protected", get(whoami))
            .route_layer(axum_middleware::from_fn_with_state(state, auth))
    }

    async fn body_string(res: axum::response::Response) -> String {
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn missing_header_is_401_authentication_required() {
        let res = router()
            .oneshot(
                HttpRequest::builder()
                    .uri("/protected")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(body_string(res).await.contains("authentication required"));
    }

    #[tokio::test]
    async fn tampered_token_is_403_invalid_or_expired() {
        let mut token = mint_token("alice", 3600);
        token.push('x');
        let res = router()
            .oneshot(
                HttpRequest::builder()
                    .uri("/protected")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert!(body_string(res).await.contains("invalid or expired token"));
    }

    #[tokio::test]
    async fn expired_token_is_403() {
        let token = mint_token("alice", -3600);
        let res = router()
            .oneshot(
                HttpRequest::builder()
                    .uri("/protected")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_403() {
        let res = router()
            .oneshot(
                HttpRequest::builder()
                    .uri("/protected")
                    .header("authorization", "Basic dXNlcjpwYXNz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn valid_token_passes_identity_downstream() {
        let token = mint_token("alice", 3600);
        let res = router()
            .oneshot(
                HttpRequest::builder()
                    .uri("/protected")
                    .header("authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_string(res).await, "alice");
    }
}
