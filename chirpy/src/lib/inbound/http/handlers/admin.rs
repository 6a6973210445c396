use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;

use super::ApiError;
use super::ApiSuccess;
use crate::config::Platform;
use crate::inbound::http::router::AppState;

pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r#"<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {} times!</p>
  </body>
</html>"#,
        state.metrics.file_server_hits()
    ))
}

pub async fn reset(State(state): State<AppState>) -> Result<ApiSuccess<()>, ApiError> {
    if state.platform != Platform::Dev {
        tracing::warn!(platform = ?state.platform, "Reset refused outside dev");
        return Err(ApiError::Forbidden("Forbidden: dev access only".to_string()));
    }

    state.metrics.reset();
    state
        .user_service
        .delete_all_users()
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::OK, ()))
}
