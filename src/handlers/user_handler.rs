use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{db_result, require_record};
use crate::db::{training, training_plans, users};
use crate::handlers::access::ensure_can_act_for;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::training::{HistoryQuery, StreakResponse};
use crate::models::user::UserSummary;
use crate::ok_or_return;
use crate::training::streak::current_streak;

// GET /api/users - leaderboard
pub async fn get_users(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let users = ok_or_return!(db_result(
        sqlx::query_as::<_, UserSummary>(
            "SELECT id, name, exp_progress, division_index FROM users ORDER BY name",
        )
        .fetch_all(pool.get_ref())
        .await
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::success("Users retrieved successfully", users)))
}

// GET /api/users/{id}
pub async fn get_user(pool: web::Data<PgPool>, path: web::Path<Uuid>) -> Result<HttpResponse> {
    let user = ok_or_return!(require_record(
        users::find_profile(pool.get_ref(), path.into_inner()).await,
        "User not found"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::success("User retrieved successfully", user)))
}

// GET /api/users/{id}/history
#[tracing::instrument(name = "Get training history", skip(pool, claims, query))]
pub async fn get_user_history(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    query: web::Query<HistoryQuery>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    ok_or_return!(ensure_can_act_for(pool.get_ref(), &claims, user_id).await);

    let history = ok_or_return!(db_result(
        training::fetch_user_history(pool.get_ref(), user_id, &query).await
    ));
    if history.is_empty() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error("No training history found")));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success("Training history retrieved successfully", history)))
}

// GET /api/users/{id}/streak
#[tracing::instrument(name = "Get training streak", skip(pool, claims))]
pub async fn get_user_streak(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    ok_or_return!(ensure_can_act_for(pool.get_ref(), &claims, user_id).await);
    let dates = ok_or_return!(db_result(
        training::fetch_training_dates(pool.get_ref(), user_id).await
    ));

    let response = StreakResponse {
        current_streak: current_streak(&dates, Utc::now().date_naive()),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success("Streak calculated successfully", response)))
}

// GET /api/users/{id}/training-plans
pub async fn get_user_plans(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let user_id = path.into_inner();
    ok_or_return!(ensure_can_act_for(pool.get_ref(), &claims, user_id).await);

    let plans = ok_or_return!(db_result(
        training_plans::fetch_plans_for_user(pool.get_ref(), user_id).await
    ));
    Ok(HttpResponse::Ok().json(ApiResponse::success("Training plans retrieved successfully", plans)))
}
