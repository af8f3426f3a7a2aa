use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::training::{ExerciseEntry, HistoryQuery, TrainingHistoryEntry, TrainingLogOutcome, TrainingLogRequest};
use crate::training::progression::Progress;

const HISTORY_UNIQUE_CONSTRAINT: &str = "training_history_user_date_exercise_key";

#[derive(Debug, thiserror::Error)]
pub enum TrainingLogError {
    #[error("No exercises were submitted")]
    EmptyBatch,
    #[error("Exercise '{0}' was already logged for this day")]
    DuplicateSession(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persist a batch of exercises as one unit.
///
/// Rejects the whole batch when any (user, date, exercise) already exists.
/// The first batch for a date creates the training day and awards
/// experience; later batches on the same date only add history rows.
/// Dropping the transaction on any early return rolls everything back.
#[tracing::instrument(
    name = "Record training session",
    skip(pool, request),
    fields(
        user_id = %request.user_id,
        device_id = %request.device_id,
        training_date = %request.training_date,
        entries = request.exercises.len()
    )
)]
pub async fn record_training_session(
    pool: &PgPool,
    request: &TrainingLogRequest,
) -> Result<TrainingLogOutcome, TrainingLogError> {
    if request.exercises.is_empty() {
        return Err(TrainingLogError::EmptyBatch);
    }

    let mut tx = pool.begin().await?;

    if let Some(exercise) = find_logged_exercise(
        &mut tx,
        request.user_id,
        request.training_date,
        &request.exercises,
    )
    .await?
    {
        tracing::info!("Rejecting batch, '{}' already logged", exercise);
        return Err(TrainingLogError::DuplicateSession(exercise));
    }

    for entry in &request.exercises {
        insert_history_entry(&mut tx, request, entry).await?;
    }

    let progress = if insert_training_day(&mut tx, request.user_id, request.training_date).await? {
        Some(award_training_day(&mut tx, request.user_id).await?)
    } else {
        None
    };

    tx.commit().await?;

    tracing::info!("Recorded {} exercises", request.exercises.len());
    Ok(TrainingLogOutcome {
        entries_recorded: request.exercises.len(),
        progress,
    })
}

/// First exercise of `entries` already present in history for the day.
async fn find_logged_exercise(
    conn: &mut PgConnection,
    user_id: Uuid,
    training_date: NaiveDate,
    entries: &[ExerciseEntry],
) -> Result<Option<String>, sqlx::Error> {
    let names: Vec<String> = entries.iter().map(|e| e.exercise.clone()).collect();
    sqlx::query_scalar::<_, String>(
        r#"
        SELECT exercise
        FROM training_history
        WHERE user_id = $1 AND training_date = $2 AND exercise = ANY($3)
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .bind(training_date)
    .bind(&names)
    .fetch_optional(conn)
    .await
}

async fn insert_history_entry(
    conn: &mut PgConnection,
    request: &TrainingLogRequest,
    entry: &ExerciseEntry,
) -> Result<(), TrainingLogError> {
    sqlx::query(
        r#"
        INSERT INTO training_history (id, user_id, device_id, training_date, exercise, sets, reps, weight)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(request.user_id)
    .bind(request.device_id)
    .bind(request.training_date)
    .bind(&entry.exercise)
    .bind(entry.sets)
    .bind(entry.reps)
    .bind(entry.weight)
    .execute(conn)
    .await
    .map_err(|e| {
        // A concurrent submission can pass the duplicate check before either commits
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(HISTORY_UNIQUE_CONSTRAINT)
            {
                tracing::warn!("Unique constraint rejected '{}'", entry.exercise);
                return TrainingLogError::DuplicateSession(entry.exercise.clone());
            }
        }
        tracing::error!("Failed to insert training history: {:?}", e);
        TrainingLogError::Database(e)
    })?;
    Ok(())
}

/// Mark `training_date` as trained. Returns `true` only if this call created
/// the marker; an existing marker is left untouched and yields `false`.
pub async fn insert_training_day(
    conn: &mut PgConnection,
    user_id: Uuid,
    training_date: NaiveDate,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO training_days (user_id, training_date)
        VALUES ($1, $2)
        ON CONFLICT (user_id, training_date) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(training_date)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

async fn award_training_day(conn: &mut PgConnection, user_id: Uuid) -> Result<Progress, sqlx::Error> {
    let current = sqlx::query_as::<_, Progress>(
        "SELECT exp_progress, division_index FROM users WHERE id = $1 FOR UPDATE",
    )
    .bind(user_id)
    .fetch_one(&mut *conn)
    .await?;

    let next = current.award_training_day();

    sqlx::query("UPDATE users SET exp_progress = $1, division_index = $2 WHERE id = $3")
        .bind(next.exp_progress)
        .bind(next.division_index)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    tracing::info!(
        "Experience {} -> {}, division {} -> {}",
        current.exp_progress,
        next.exp_progress,
        current.division_index,
        next.division_index
    );
    Ok(next)
}

/// Distinct training days for a user, newest first.
pub async fn fetch_training_dates(pool: &PgPool, user_id: Uuid) -> Result<Vec<NaiveDate>, sqlx::Error> {
    sqlx::query_scalar::<_, NaiveDate>(
        "SELECT training_date FROM training_days WHERE user_id = $1 ORDER BY training_date DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// History rows for a user, newest first. An `exercise` filter takes
/// precedence over a `device_id` filter.
pub async fn fetch_user_history(
    pool: &PgPool,
    user_id: Uuid,
    filter: &HistoryQuery,
) -> Result<Vec<TrainingHistoryEntry>, sqlx::Error> {
    let device_id = if filter.exercise.is_some() { None } else { filter.device_id };
    sqlx::query_as::<_, TrainingHistoryEntry>(
        r#"
        SELECT id, user_id, device_id, training_date, exercise, sets, reps, weight, created_at
        FROM training_history
        WHERE user_id = $1
        AND ($2::text IS NULL OR exercise = $2)
        AND ($3::uuid IS NULL OR device_id = $3)
        ORDER BY training_date DESC, created_at DESC
        "#,
    )
    .bind(user_id)
    .bind(&filter.exercise)
    .bind(device_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_device_history(
    pool: &PgPool,
    device_id: Uuid,
) -> Result<Vec<TrainingHistoryEntry>, sqlx::Error> {
    sqlx::query_as::<_, TrainingHistoryEntry>(
        r#"
        SELECT id, user_id, device_id, training_date, exercise, sets, reps, weight, created_at
        FROM training_history
        WHERE device_id = $1
        ORDER BY training_date DESC, created_at DESC
        "#,
    )
    .bind(device_id)
    .fetch_all(pool)
    .await
}
