use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::create_user::UserData;
use super::ApiError;
use super::ApiSuccess;
use super::JsonBody;
use super::INCORRECT_CREDENTIALS;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // A malformed email cannot belong to an account; answer exactly like a wrong password
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::Unauthorized(INCORRECT_CREDENTIALS.to_string()))?;

    let session = state
        .user_service
        .authenticate(LoginCommand {
            email,
            password: body.password,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            user: (&session.user).into(),
            token: session.token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    #[serde(flatten)]
    pub user: UserData,
    pub token: String,
}
