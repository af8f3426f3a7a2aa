use chrono::NaiveDate;
use reqwest::{Client, Method, Response};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::common::utils::{make_authenticated_request, TestApp};

pub fn exercise(name: &str, sets: i32, reps: i32, weight: f64) -> Value {
    json!({ "exercise": name, "sets": sets, "reps": reps, "weight": weight })
}

pub async fn submit_training_log(
    app: &TestApp,
    token: &str,
    user_id: Uuid,
    device_id: Uuid,
    training_date: NaiveDate,
    exercises: Vec<Value>,
) -> Response {
    make_authenticated_request(
        &Client::new(),
        Method::POST,
        &app.api("/training/log"),
        token,
        Some(json!({
            "user_id": user_id,
            "device_id": device_id,
            "training_date": training_date,
            "exercises": exercises
        })),
    )
    .await
}

pub async fn history_count(app: &TestApp, user_id: Uuid) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM training_history WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to count history")
}

pub async fn training_day_count(app: &TestApp, user_id: Uuid) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM training_days WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to count training days")
}

pub async fn user_progress(app: &TestApp, user_id: Uuid) -> (i32, i32) {
    sqlx::query_as::<_, (i32, i32)>("SELECT exp_progress, division_index FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_one(&app.db_pool)
        .await
        .expect("Failed to fetch user progress")
}

pub async fn set_user_progress(app: &TestApp, user_id: Uuid, exp_progress: i32, division_index: i32) {
    sqlx::query("UPDATE users SET exp_progress = $1, division_index = $2 WHERE id = $3")
        .bind(exp_progress)
        .bind(division_index)
        .bind(user_id)
        .execute(&app.db_pool)
        .await
        .expect("Failed to set user progress");
}

pub async fn seed_training_days(app: &TestApp, user_id: Uuid, dates: &[NaiveDate]) {
    for date in dates {
        sqlx::query("INSERT INTO training_days (user_id, training_date) VALUES ($1, $2)")
            .bind(user_id)
            .bind(date)
            .execute(&app.db_pool)
            .await
            .expect("Failed to seed training day");
    }
}
