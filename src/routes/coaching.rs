use actix_web::{get, post, put, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::coaching_handler;
use crate::middleware::auth::Claims;
use crate::models::coaching::{ClientsQuery, CoachingByMembershipRequest, CoachingQuery, UpdateCoachingRequest};

#[post("/request/by-membership")]
pub async fn request_by_membership(
    request: web::Json<CoachingByMembershipRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    coaching_handler::request_by_membership(request, pool, claims).await
}

#[get("/request")]
pub async fn get_requests(
    query: web::Query<CoachingQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    coaching_handler::get_requests(query, pool).await
}

#[put("/request/{request_id}")]
pub async fn update_request(
    path: web::Path<Uuid>,
    request: web::Json<UpdateCoachingRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    coaching_handler::update_request(path, request, pool, claims).await
}

#[get("/clients")]
pub async fn get_clients(
    query: web::Query<ClientsQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    coaching_handler::get_clients(query, pool).await
}
