use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::ChirpData;
use crate::inbound::http::router::AppState;

pub async fn list_chirps(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<ChirpData>>, ApiError> {
    state
        .chirp_service
        .list_chirps()
        .await
        .map_err(ApiError::from)
        .map(|chirps| ApiSuccess::new(StatusCode::OK, chirps.iter().map(ChirpData::from).collect()))
}
