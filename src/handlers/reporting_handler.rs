use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;

use crate::db::helpers::db_result;
use crate::models::common::ApiResponse;
use crate::models::reporting::{DeviceUsage, UsageQuery};
use crate::ok_or_return;

// GET /api/admin/reporting/usage
pub async fn get_device_usage(
    query: web::Query<UsageQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        if start > end {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::<()>::error("start_date must not be after end_date")));
        }
    }

    let usage = ok_or_return!(db_result(
        sqlx::query_as::<_, DeviceUsage>(
            r#"
            SELECT s.device_id, COUNT(*) AS session_count
            FROM (
                SELECT DISTINCT device_id, user_id, training_date
                FROM training_history
                WHERE ($1::date IS NULL OR training_date >= $1)
                AND ($2::date IS NULL OR training_date <= $2)
            ) s
            WHERE ($3::uuid IS NULL OR s.device_id = $3)
            GROUP BY s.device_id
            ORDER BY session_count DESC
            "#,
        )
        .bind(query.start_date)
        .bind(query.end_date)
        .bind(query.device_id)
        .fetch_all(pool.get_ref())
        .await
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::success("Device usage retrieved successfully", usage)))
}
