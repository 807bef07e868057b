use axum::Router;

use crate::state::AppState;

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod streak;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
