use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{db_result, require_record, validate_request};
use crate::models::affiliate::{AffiliateClick, AffiliateClickRequest, AffiliateConversionRequest, AffiliateOffer};
use crate::models::common::ApiResponse;
use crate::ok_or_return;

const CLICK_COLUMNS: &str = "id, offer_id, user_id, clicked_at, conversion_value, converted_at";

// GET /api/affiliate_offers
pub async fn get_active_offers(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let today = Utc::now().date_naive();
    let offers = ok_or_return!(db_result(
        sqlx::query_as::<_, AffiliateOffer>(
            r#"
            SELECT id, title, description, affiliate_url, image_url, start_date, end_date
            FROM affiliate_offers
            WHERE (start_date IS NULL OR start_date <= $1)
            AND (end_date IS NULL OR end_date >= $1)
            ORDER BY created_at
            "#,
        )
        .bind(today)
        .fetch_all(pool.get_ref())
        .await
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::success("Affiliate offers retrieved successfully", offers)))
}

async fn ensure_offer_exists(pool: &PgPool, offer_id: Uuid) -> Result<(), HttpResponse> {
    require_record(
        sqlx::query_scalar::<_, Uuid>("SELECT id FROM affiliate_offers WHERE id = $1")
            .bind(offer_id)
            .fetch_optional(pool)
            .await,
        "Affiliate offer not found",
    )
    .map(|_| ())
}

// POST /api/affiliate_click
pub async fn record_click(
    request: web::Json<AffiliateClickRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    ok_or_return!(ensure_offer_exists(pool.get_ref(), request.offer_id).await);

    let click = ok_or_return!(db_result(
        sqlx::query_as::<_, AffiliateClick>(&format!(
            "INSERT INTO affiliate_clicks (id, offer_id, user_id) VALUES ($1, $2, $3) RETURNING {}",
            CLICK_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(request.offer_id)
        .bind(request.user_id)
        .fetch_one(pool.get_ref())
        .await
    ));

    Ok(HttpResponse::Created().json(ApiResponse::success("Click recorded", click)))
}

// POST /api/affiliate_conversion
#[tracing::instrument(name = "Record affiliate conversion", skip(request, pool), fields(offer_id = %request.offer_id))]
pub async fn record_conversion(
    request: web::Json<AffiliateConversionRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    ok_or_return!(validate_request(&*request));

    // Credit the most recent click by this user on this offer
    let click = ok_or_return!(require_record(
        sqlx::query_as::<_, AffiliateClick>(&format!(
            r#"
            UPDATE affiliate_clicks
            SET conversion_value = $1, converted_at = NOW()
            WHERE id = (
                SELECT id FROM affiliate_clicks
                WHERE offer_id = $2 AND user_id = $3
                ORDER BY clicked_at DESC
                LIMIT 1
            )
            RETURNING {}
            "#,
            CLICK_COLUMNS
        ))
        .bind(request.conversion_value)
        .bind(request.offer_id)
        .bind(request.user_id)
        .fetch_optional(pool.get_ref())
        .await,
        "No click found for this offer and user"
    ));

    Ok(HttpResponse::Ok().json(ApiResponse::success("Conversion recorded", click)))
}
