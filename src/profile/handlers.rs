use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    error::{ApiError, ApiJson},
    profile::{
        dto::{CompleteRegistrationRequest, MessageResponse, ProfileResponse},
        repo,
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/complete_registration", post(complete_registration))
        .route("/profile", get(get_profile))
}

/// One-time step after registration. Calling it again for the same user
/// fails on the profile's uniqueness constraint.
#[instrument(skip(state, payload))]
pub async fn complete_registration(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<CompleteRegistrationRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    repo::complete(&state.db, user_id, &payload).await?;
    info!(user_id, "registration completed");
    Ok(Json(MessageResponse {
        message: "Registration completed successfully".into(),
    }))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = repo::get(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("Profile not found"))?;
    Ok(Json(ProfileResponse { profile }))
}
