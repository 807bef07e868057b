use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::{Date, Time};

use crate::error::ApiError;

/// One row of the append-only per-user timeline. Never mutated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    #[serde(with = "super::dto::iso_date")]
    pub event_date: Date,
    #[serde(with = "super::dto::wall_time")]
    pub event_time: Time,
}

pub async fn append(
    db: &PgPool,
    user_id: i64,
    title: &str,
    event_date: Date,
    event_time: Time,
) -> Result<i64, ApiError> {
    let event_id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO events (user_id, title, event_date, event_time)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(title)
    .bind(event_date)
    .bind(event_time)
    .fetch_one(db)
    .await?;
    Ok(event_id)
}

/// All events for a user, oldest first. The `id` tie-break keeps rows with
/// equal date and time in insertion order.
pub async fn list_for(db: &PgPool, user_id: i64) -> Result<Vec<Event>, ApiError> {
    let events = sqlx::query_as::<_, Event>(
        r#"
        SELECT id, user_id, title, event_date, event_time
        FROM events
        WHERE user_id = $1
        ORDER BY event_date ASC, event_time ASC, id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, time};

    #[test]
    fn timeline_ordering_key_sorts_by_date_then_time_then_insertion() {
        let mut events = vec![
            Event {
                id: 1,
                user_id: 7,
                title: "first inserted".into(),
                event_date: date!(2025 - 03 - 10),
                event_time: time!(09:00),
            },
            Event {
                id: 2,
                user_id: 7,
                title: "second inserted".into(),
                event_date: date!(2025 - 03 - 09),
                event_time: time!(08:00),
            },
            Event {
                id: 3,
                user_id: 7,
                title: "third inserted".into(),
                event_date: date!(2025 - 03 - 10),
                event_time: time!(08:00),
            },
        ];
        events.sort_by_key(|e| (e.event_date, e.event_time, e.id));
        let order: Vec<i64> = events.iter().map(|e| e.id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }
}
