use actix_web::{get, post, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::handlers::affiliate_handler;
use crate::models::affiliate::{AffiliateClickRequest, AffiliateConversionRequest};

/// Offers whose date window contains today
#[get("/affiliate_offers")]
pub async fn get_offers(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    affiliate_handler::get_active_offers(pool).await
}

#[post("/affiliate_click")]
pub async fn record_click(
    request: web::Json<AffiliateClickRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    affiliate_handler::record_click(request, pool).await
}

#[post("/affiliate_conversion")]
pub async fn record_conversion(
    request: web::Json<AffiliateConversionRequest>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    affiliate_handler::record_conversion(request, pool).await
}
