use actix_web::{delete, post, put, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::training_plan_handler;
use crate::middleware::auth::Claims;
use crate::models::training_plan::{CreatePlanRequest, UpdatePlanRequest};

#[post("")]
pub async fn create_plan(
    request: web::Json<CreatePlanRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    training_plan_handler::create_plan(request, pool, claims).await
}

/// Replace the plan's exercise list
#[put("/{plan_id}")]
pub async fn update_plan(
    path: web::Path<Uuid>,
    request: web::Json<UpdatePlanRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    training_plan_handler::update_plan(path, request, pool, claims).await
}

#[delete("/{plan_id}")]
pub async fn delete_plan(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    training_plan_handler::delete_plan(path, pool, claims).await
}

#[post("/{plan_id}/start")]
pub async fn start_plan(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    training_plan_handler::start_plan(path, pool, claims).await
}
