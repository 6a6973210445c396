use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::ChirpData;
use super::JsonBody;
use crate::chirp::errors::ChirpError;
use crate::domain::chirp::models::ChirpBody;
use crate::domain::chirp::models::CreateChirpCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_chirp(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<CreateChirpRequest>,
) -> Result<ApiSuccess<ChirpData>, ApiError> {
    let body = ChirpBody::new(body.body).map_err(ChirpError::from)?;

    state
        .chirp_service
        .create_chirp(CreateChirpCommand {
            author: user.user_id,
            body,
        })
        .await
        .map_err(ApiError::from)
        .map(|ref chirp| ApiSuccess::new(StatusCode::CREATED, chirp.into()))
}

/// HTTP request body for posting a chirp. The author comes from the bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateChirpRequest {
    body: String,
}
