use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{db_result, require_record, validate_request, DbResult};
use crate::db::training_plans;
use crate::handlers::access::ensure_can_act_for;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::training_plan::{CreatePlanRequest, PlanStatus, StartPlanResponse, TrainingPlan, UpdatePlanRequest};
use crate::ok_or_return;

fn plan_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error("Training plan not found"))
}

/// Resolve the plan's owner and check the caller may manage it.
async fn authorize_plan(pool: &PgPool, claims: &Claims, plan_id: Uuid) -> DbResult<()> {
    let owner = require_record(
        sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM training_plans WHERE id = $1")
            .bind(plan_id)
            .fetch_optional(pool)
            .await,
        "Training plan not found",
    )?;
    ensure_can_act_for(pool, claims, owner).await
}

// POST /api/training-plans
#[tracing::instrument(name = "Create training plan", skip(request, pool, claims))]
pub async fn create_plan(
    request: web::Json<CreatePlanRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    ok_or_return!(validate_request(&*request));
    ok_or_return!(ensure_can_act_for(pool.get_ref(), &claims, request.user_id).await);

    let plan = ok_or_return!(db_result(
        sqlx::query_as::<_, TrainingPlan>(
            r#"
            INSERT INTO training_plans (id, user_id, name, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, name, status, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.user_id)
        .bind(&request.name)
        .bind(PlanStatus::Inactive.as_str())
        .fetch_one(pool.get_ref())
        .await
    ));

    Ok(HttpResponse::Created().json(ApiResponse::success("Training plan created successfully", plan)))
}

// PUT /api/training-plans/{id}
#[tracing::instrument(name = "Update training plan", skip(request, pool, claims))]
pub async fn update_plan(
    path: web::Path<Uuid>,
    request: web::Json<UpdatePlanRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let plan_id = path.into_inner();
    ok_or_return!(authorize_plan(pool.get_ref(), &claims, plan_id).await);

    let replaced = ok_or_return!(db_result(
        training_plans::replace_exercises(pool.get_ref(), plan_id, &request.exercises).await
    ));
    if !replaced {
        return Ok(plan_not_found());
    }

    let plan = ok_or_return!(require_record(
        training_plans::fetch_plan(pool.get_ref(), plan_id).await,
        "Training plan not found"
    ));
    Ok(HttpResponse::Ok().json(ApiResponse::success("Training plan updated successfully", plan)))
}

// DELETE /api/training-plans/{id}
#[tracing::instrument(name = "Delete training plan", skip(pool, claims))]
pub async fn delete_plan(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let plan_id = path.into_inner();
    ok_or_return!(authorize_plan(pool.get_ref(), &claims, plan_id).await);

    let deleted = ok_or_return!(db_result(training_plans::delete_plan(pool.get_ref(), plan_id).await));
    if !deleted {
        return Ok(plan_not_found());
    }
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Training plan deleted successfully")))
}

// POST /api/training-plans/{id}/start
#[tracing::instrument(name = "Start training plan", skip(pool, claims))]
pub async fn start_plan(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let plan_id = path.into_inner();
    ok_or_return!(authorize_plan(pool.get_ref(), &claims, plan_id).await);

    let exercise_order = ok_or_return!(require_record(
        training_plans::start_plan(pool.get_ref(), plan_id).await,
        "Training plan not found"
    ));
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Training plan started",
        StartPlanResponse { exercise_order },
    )))
}
