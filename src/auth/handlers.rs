use axum::{
    extract::{FromRef, State},
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, ProtectedResponse, RegisterRequest, RegisterResponse},
        jwt::{AuthUser, JwtKeys},
        password,
        repo::User,
    },
    error::{ApiError, ApiJson},
    profile,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/protected", get(protected))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    if payload.username.trim().is_empty() {
        warn!("register with empty username");
        return Err(ApiError::Validation("Username must not be empty".into()));
    }
    if payload.password.len() < 8 {
        warn!("register with too short password");
        return Err(ApiError::Validation("Password too short".into()));
    }

    let hash = password::hash_password(&payload.password)?;
    let user = User::create(&state.db, &payload.username, &hash).await?;

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(user.id)?;

    info!(user_id = user.id, "user registered");
    Ok(Json(RegisterResponse {
        message: "User registered successfully".into(),
        user_id: user.id,
        access_token,
    }))
}

/// Login verifies credentials, advances the treatment streak, then issues
/// the session token. Unknown usernames and wrong passwords are
/// indistinguishable to the caller.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = User::find_by_username(&state.db, &payload.username)
        .await?
        .ok_or_else(|| {
            warn!("login with unknown username");
            ApiError::InvalidCredentials
        })?;

    if !password::verify_password(&payload.password, &user.password_hash)? {
        warn!(user_id = user.id, "login with invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let profile =
        profile::repo::record_login(&state.db, user.id, OffsetDateTime::now_utc()).await?;

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(user.id)?;

    info!(user_id = user.id, "user logged in");
    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".into(),
        profile,
    }))
}

#[instrument(skip_all)]
pub async fn protected(AuthUser(user_id): AuthUser) -> Json<ProtectedResponse> {
    Json(ProtectedResponse {
        message: "Protected resource accessed.".into(),
        user_id,
    })
}
