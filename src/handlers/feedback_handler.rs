use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{db_result, require_record, validate_request};
use crate::handlers::access::ensure_can_act_for;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::feedback::{CreateFeedbackRequest, Feedback, FeedbackQuery, FeedbackStatus, UpdateFeedbackRequest};
use crate::ok_or_return;

// POST /api/feedback
#[tracing::instrument(name = "Submit feedback", skip(request, pool, claims), fields(device_id = %request.device_id))]
pub async fn create_feedback(
    request: web::Json<CreateFeedbackRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    ok_or_return!(validate_request(&*request));
    ok_or_return!(ensure_can_act_for(pool.get_ref(), &claims, request.user_id).await);

    let feedback = ok_or_return!(db_result(
        sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (id, user_id, device_id, feedback_text, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, device_id, feedback_text, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(request.device_id)
        .bind(&request.feedback_text)
        .bind(FeedbackStatus::New.as_str())
        .fetch_one(pool.get_ref())
        .await
    ));

    Ok(HttpResponse::Created().json(ApiResponse::success("Feedback sent successfully", feedback)))
}

// GET /api/feedback
pub async fn get_feedback(
    query: web::Query<FeedbackQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let feedback = ok_or_return!(db_result(
        sqlx::query_as::<_, Feedback>(
            r#"
            SELECT id, user_id, device_id, feedback_text, status, created_at
            FROM feedback
            WHERE ($1::uuid IS NULL OR device_id = $1)
            AND ($2::text IS NULL OR status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(query.device_id)
        .bind(query.status.map(|s| s.as_str()))
        .fetch_all(pool.get_ref())
        .await
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::success("Feedback retrieved successfully", feedback)))
}

// PUT /api/admin/feedback/{id}
pub async fn update_feedback(
    path: web::Path<Uuid>,
    request: web::Json<UpdateFeedbackRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let feedback = ok_or_return!(require_record(
        sqlx::query_as::<_, Feedback>(
            r#"
            UPDATE feedback SET status = $1 WHERE id = $2
            RETURNING id, user_id, device_id, feedback_text, status, created_at
            "#,
        )
        .bind(request.status.as_str())
        .bind(path.into_inner())
        .fetch_optional(pool.get_ref())
        .await,
        "Feedback not found"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::success("Feedback updated successfully", feedback)))
}
