use actix_web::{get, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::handlers::device_handler;
use crate::models::device::DeviceBySecretQuery;

#[get("/devices")]
pub async fn get_devices(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    device_handler::get_devices(pool).await
}

/// Device-initiated lookup, authenticated by the device's secret code
#[get("/device_by_secret")]
pub async fn get_device_by_secret(
    query: web::Query<DeviceBySecretQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    device_handler::get_device_by_secret(pool, query).await
}
