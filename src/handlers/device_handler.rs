use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{db_result, require_record, validate_request};
use crate::db::training;
use crate::models::common::ApiResponse;
use crate::models::device::{Device, DeviceBySecretQuery, DeviceRequest, DeviceSummary};
use crate::ok_or_return;
use crate::utils::secret_code::generate_secret_code;

// GET /api/devices
pub async fn get_devices(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let devices = ok_or_return!(db_result(
        sqlx::query_as::<_, DeviceSummary>("SELECT id, name, exercise_mode FROM devices ORDER BY name")
            .fetch_all(pool.get_ref())
            .await
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::success("Devices retrieved successfully", devices)))
}

// GET /api/device_by_secret
pub async fn get_device_by_secret(
    pool: web::Data<PgPool>,
    query: web::Query<DeviceBySecretQuery>,
) -> Result<HttpResponse> {
    let device = ok_or_return!(require_record(
        sqlx::query_as::<_, Device>(
            "SELECT id, name, exercise_mode, secret_code, created_at FROM devices WHERE id = $1 AND secret_code = $2",
        )
        .bind(query.device_id)
        .bind(&query.secret_code)
        .fetch_optional(pool.get_ref())
        .await,
        "Device not found or secret code does not match"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::success("Device retrieved successfully", device)))
}

// POST /api/admin/devices
#[tracing::instrument(name = "Create device", skip(request, pool), fields(name = %request.name))]
pub async fn create_device(
    request: web::Json<DeviceRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    ok_or_return!(validate_request(&*request));

    let device = ok_or_return!(db_result(
        sqlx::query_as::<_, Device>(
            r#"
            INSERT INTO devices (id, name, exercise_mode, secret_code)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, exercise_mode, secret_code, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.name)
        .bind(&request.exercise_mode)
        .bind(generate_secret_code())
        .fetch_one(pool.get_ref())
        .await
    ));

    tracing::info!("Created device {}", device.id);
    Ok(HttpResponse::Created().json(ApiResponse::success("Device created successfully", device)))
}

// PUT /api/admin/devices/{id}
#[tracing::instrument(name = "Update device", skip(request, pool))]
pub async fn update_device(
    path: web::Path<Uuid>,
    request: web::Json<DeviceRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    ok_or_return!(validate_request(&*request));

    let device = ok_or_return!(require_record(
        sqlx::query_as::<_, Device>(
            r#"
            UPDATE devices
            SET name = $1, exercise_mode = COALESCE($2, exercise_mode)
            WHERE id = $3
            RETURNING id, name, exercise_mode, secret_code, created_at
            "#,
        )
        .bind(&request.name)
        .bind(&request.exercise_mode)
        .bind(path.into_inner())
        .fetch_optional(pool.get_ref())
        .await,
        "Device not found"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::success("Device updated successfully", device)))
}

// GET /api/admin/devices/{id}/history
pub async fn get_device_history(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let device_id = path.into_inner();
    let history = ok_or_return!(db_result(training::fetch_device_history(pool.get_ref(), device_id).await));
    if history.is_empty() {
        return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error(format!(
            "No training history for device {}",
            device_id
        ))));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        format!("Training history for device {}", device_id),
        history,
    )))
}
