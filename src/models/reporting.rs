use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct UsageQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub device_id: Option<Uuid>,
}

/// A session is one user on one device on one day.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct DeviceUsage {
    pub device_id: Uuid,
    pub session_count: i64,
}
