use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use store::{Store, User};
use tower_sessions::Session;

use crate::auth::{issue, CurrentUser, Profile};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    #[serde(alias = "firstName")]
    pub first_name: String,
    #[serde(alias = "lastName")]
    pub last_name: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// `POST /users`: start a session (setting the cookie) and create its user.
/// A session that already has a user gets it back unchanged with 200.
pub async fn create<S: Store>(
    State(state): State<AppState<S>>,
    session: Session,
    body: Result<Json<CreateUserBody>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(body) = body?;

    let first_name = body.first_name.trim();
    if first_name.is_empty() {
        return Err(ApiError::Validation(
            "first_name must not be empty".to_string(),
        ));
    }

    let token = issue(&session).await?;
    let profile = Profile {
        first_name: first_name.to_string(),
        last_name: body.last_name.trim().to_string(),
    };
    let resolved = state.resolver().resolve_with(&token, profile).await?;

    let status = if resolved.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(UserResponse { user: resolved.user })))
}

/// `GET /users/me`
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(UserResponse { user })
}
