use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::UNAUTHORIZED;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated user in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates bearer tokens and adds the subject to request extensions.
///
/// Every failure produces the same 401 body; only the log line says why.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(req.headers()).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        ApiError::Unauthorized(UNAUTHORIZED.to_string())
    })?;

    let subject = state.authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Token validation failed");
        ApiError::Unauthorized(UNAUTHORIZED.to_string())
    })?;

    req.extensions_mut().insert(AuthenticatedUser {
        user_id: UserId::from(subject),
    });

    Ok(next.run(req).await)
}

/// Middleware counting every request to the static file server.
pub async fn count_file_server_hits(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    state.metrics.record_file_server_hit();
    next.run(req).await
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
