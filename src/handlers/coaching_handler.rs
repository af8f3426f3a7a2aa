use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{db_result, internal_error, require_record, validate_request};
use crate::db::users;
use crate::handlers::access::caller_id;
use crate::middleware::auth::Claims;
use crate::models::coaching::{
    ClientsQuery, CoachingByMembershipRequest, CoachingQuery, CoachingRequest, CoachingStatus, UpdateCoachingRequest,
};
use crate::models::common::ApiResponse;
use crate::models::user::ClientSummary;
use crate::ok_or_return;

const COACHING_COLUMNS: &str = "id, coach_id, client_id, status, created_at";

fn forbidden(message: &str) -> HttpResponse {
    HttpResponse::Forbidden().json(ApiResponse::<()>::error(message))
}

// POST /api/coaching/request/by-membership
#[tracing::instrument(name = "Create coaching request", skip(request, pool, claims), fields(coach_id = %request.coach_id))]
pub async fn request_by_membership(
    request: web::Json<CoachingByMembershipRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    ok_or_return!(validate_request(&*request));
    let caller = ok_or_return!(caller_id(&claims));
    if caller != request.coach_id && !claims.is_admin() {
        return Ok(forbidden("Coaching requests can only be sent as yourself"));
    }

    let client_id = ok_or_return!(require_record(
        users::find_id_by_membership(pool.get_ref(), &request.membership_number).await,
        "No user with this membership number"
    ));
    if client_id == request.coach_id {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error("You cannot coach yourself")));
    }

    let coaching_request = ok_or_return!(db_result(
        sqlx::query_as::<_, CoachingRequest>(&format!(
            "INSERT INTO coaching_requests (id, coach_id, client_id, status) VALUES ($1, $2, $3, $4) RETURNING {}",
            COACHING_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(request.coach_id)
        .bind(client_id)
        .bind(CoachingStatus::Pending.as_str())
        .fetch_one(pool.get_ref())
        .await
    ));

    Ok(HttpResponse::Created().json(ApiResponse::success("Coaching request sent", coaching_request)))
}

// GET /api/coaching/request
pub async fn get_requests(
    query: web::Query<CoachingQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let requests = ok_or_return!(db_result(
        sqlx::query_as::<_, CoachingRequest>(&format!(
            r#"
            SELECT {}
            FROM coaching_requests
            WHERE ($1::uuid IS NULL OR client_id = $1)
            AND ($2::uuid IS NULL OR coach_id = $2)
            ORDER BY created_at DESC
            "#,
            COACHING_COLUMNS
        ))
        .bind(query.client_id)
        .bind(query.coach_id)
        .fetch_all(pool.get_ref())
        .await
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::success("Coaching requests retrieved successfully", requests)))
}

// PUT /api/coaching/request/{id}
#[tracing::instrument(name = "Answer coaching request", skip(request, pool, claims))]
pub async fn update_request(
    path: web::Path<Uuid>,
    request: web::Json<UpdateCoachingRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let request_id = path.into_inner();
    if request.status == CoachingStatus::Pending {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error("Status must be accepted or rejected")));
    }
    let caller = ok_or_return!(caller_id(&claims));

    let mut tx = match pool.begin().await {
        Ok(tx) => tx,
        Err(e) => return Ok(internal_error("Failed to start transaction", &e)),
    };

    let existing = ok_or_return!(require_record(
        sqlx::query_as::<_, CoachingRequest>(&format!(
            "SELECT {} FROM coaching_requests WHERE id = $1 FOR UPDATE",
            COACHING_COLUMNS
        ))
        .bind(request_id)
        .fetch_optional(&mut *tx)
        .await,
        "Coaching request not found"
    ));
    if existing.client_id != caller && !claims.is_admin() {
        return Ok(forbidden("Only the client can answer a coaching request"));
    }

    let updated = ok_or_return!(db_result(
        sqlx::query_as::<_, CoachingRequest>(&format!(
            "UPDATE coaching_requests SET status = $1 WHERE id = $2 RETURNING {}",
            COACHING_COLUMNS
        ))
        .bind(request.status.as_str())
        .bind(request_id)
        .fetch_one(&mut *tx)
        .await
    ));

    if updated.status == CoachingStatus::Accepted {
        ok_or_return!(db_result(
            sqlx::query("UPDATE users SET coach_id = $1 WHERE id = $2")
                .bind(updated.coach_id)
                .bind(updated.client_id)
                .execute(&mut *tx)
                .await
        ));
    }

    if let Err(e) = tx.commit().await {
        return Ok(internal_error("Failed to commit coaching update", &e));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success("Coaching request updated successfully", updated)))
}

// GET /api/coaching/clients
pub async fn get_clients(
    query: web::Query<ClientsQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let clients = ok_or_return!(db_result(
        sqlx::query_as::<_, ClientSummary>("SELECT id, name, email FROM users WHERE coach_id = $1 ORDER BY name")
            .bind(query.coach_id)
            .fetch_all(pool.get_ref())
            .await
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::success("Clients retrieved successfully", clients)))
}
