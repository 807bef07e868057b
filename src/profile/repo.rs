use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

use super::{dto::CompleteRegistrationRequest, streak};
use crate::error::{is_unique_violation, ApiError};

/// One-time registration profile plus the adherence fields mutated on login.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub gender: String,
    pub diagnosis: String,
    pub medicine: String,
    pub recommended_activities: Vec<String>,
    pub treatment_streak: i32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_login: Option<OffsetDateTime>,
}

/// Inserts the one-time profile record. The primary key on `user_id` makes a
/// repeated completion fail with `Conflict`.
pub async fn complete(
    db: &PgPool,
    user_id: i64,
    data: &CompleteRegistrationRequest,
) -> Result<(), ApiError> {
    sqlx::query(
        r#"
        INSERT INTO user_profiles
            (user_id, first_name, last_name, age, gender, diagnosis, medicine,
             recommended_activities)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(user_id)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(data.age)
    .bind(&data.gender)
    .bind(&data.diagnosis)
    .bind(&data.medicine)
    .bind(&data.recommended_activities)
    .execute(db)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("Registration already completed")
        } else {
            e.into()
        }
    })?;
    Ok(())
}

pub async fn get(db: &PgPool, user_id: i64) -> Result<Option<Profile>, ApiError> {
    let profile = sqlx::query_as::<_, Profile>(
        r#"
        SELECT user_id, first_name, last_name, age, gender, diagnosis, medicine,
               recommended_activities, treatment_streak, last_login
        FROM user_profiles
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(profile)
}

/// Applies the streak rule for a login at `now` and persists the result.
/// The read and write run in one transaction with the row locked, so
/// concurrent logins for the same user serialize instead of racing.
/// Returns `None` (writing nothing) when the user has no profile yet.
pub async fn record_login(
    db: &PgPool,
    user_id: i64,
    now: OffsetDateTime,
) -> Result<Option<Profile>, ApiError> {
    let mut tx = db.begin().await?;

    let profile = sqlx::query_as::<_, Profile>(
        r#"
        SELECT user_id, first_name, last_name, age, gender, diagnosis, medicine,
               recommended_activities, treatment_streak, last_login
        FROM user_profiles
        WHERE user_id = $1
        FOR UPDATE
        "#,
    )
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(profile) = profile else {
        tx.rollback().await?;
        return Ok(None);
    };

    let (treatment_streak, last_login) =
        streak::advance(profile.treatment_streak, profile.last_login, now);

    let updated = sqlx::query_as::<_, Profile>(
        r#"
        UPDATE user_profiles
        SET treatment_streak = $2, last_login = $3
        WHERE user_id = $1
        RETURNING user_id, first_name, last_name, age, gender, diagnosis, medicine,
                  recommended_activities, treatment_streak, last_login
        "#,
    )
    .bind(user_id)
    .bind(treatment_streak)
    .bind(last_login)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some(updated))
}
