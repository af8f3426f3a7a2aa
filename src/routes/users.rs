use actix_web::{get, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::user_handler;
use crate::middleware::auth::Claims;
use crate::models::training::HistoryQuery;

/// Leaderboard of all users
#[get("")]
pub async fn get_users(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    user_handler::get_users(pool).await
}

#[get("/{user_id}")]
pub async fn get_user(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    user_handler::get_user(pool, path).await
}

/// Training history, optionally filtered by exercise or device
#[get("/{user_id}/history")]
pub async fn get_history(
    path: web::Path<Uuid>,
    query: web::Query<HistoryQuery>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    user_handler::get_user_history(pool, path, query, claims).await
}

#[get("/{user_id}/streak")]
pub async fn get_streak(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    user_handler::get_user_streak(pool, path, claims).await
}

#[get("/{user_id}/training-plans")]
pub async fn get_training_plans(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    user_handler::get_user_plans(pool, path, claims).await
}
