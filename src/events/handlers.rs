use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};

use crate::{
    auth::jwt::AuthUser,
    error::{ApiError, ApiJson},
    events::{
        dto::{EventLoggedResponse, EventsResponse, LogEventRequest, MedicationLogRequest},
        repo,
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/log_event", post(log_event))
        .route("/medication_log", post(medication_log))
}

#[instrument(skip(state))]
pub async fn list_events(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<EventsResponse>, ApiError> {
    let events = repo::list_for(&state.db, user_id).await?;
    Ok(Json(EventsResponse { events }))
}

#[instrument(skip(state, payload))]
pub async fn log_event(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<LogEventRequest>,
) -> Result<Json<EventLoggedResponse>, ApiError> {
    let event_id = repo::append(
        &state.db,
        user_id,
        &payload.title,
        payload.event_date,
        payload.event_time,
    )
    .await?;
    info!(user_id, event_id, "event logged");
    Ok(Json(EventLoggedResponse {
        message: "Event logged".into(),
        event_id,
    }))
}

/// Medication intake is an ordinary timeline event dated today (UTC), with
/// the intake time taken from the request.
#[instrument(skip(state, payload))]
pub async fn medication_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    ApiJson(payload): ApiJson<MedicationLogRequest>,
) -> Result<Json<EventLoggedResponse>, ApiError> {
    let title = format!("Took {}", payload.medication);
    let today = OffsetDateTime::now_utc().date();
    let event_id = repo::append(&state.db, user_id, &title, today, payload.time).await?;
    info!(user_id, event_id, "medication logged");
    Ok(Json(EventLoggedResponse {
        message: "Medication logged".into(),
        event_id,
    }))
}
