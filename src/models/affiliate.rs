use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct AffiliateOffer {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub affiliate_url: String,
    pub image_url: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct AffiliateClick {
    pub id: Uuid,
    pub offer_id: Uuid,
    pub user_id: Option<Uuid>,
    pub clicked_at: DateTime<Utc>,
    pub conversion_value: Option<f64>,
    pub converted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct AffiliateClickRequest {
    pub offer_id: Uuid,
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AffiliateConversionRequest {
    pub offer_id: Uuid,
    pub user_id: Uuid,
    #[validate(range(exclusive_min = 0.0))]
    pub conversion_value: f64,
}
