use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Full device row, including the secret code. Only returned to admins and
/// to callers that already proved knowledge of the code.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Device {
    pub id: Uuid,
    pub name: String,
    pub exercise_mode: Option<String>,
    pub secret_code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct DeviceSummary {
    pub id: Uuid,
    pub name: String,
    pub exercise_mode: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DeviceRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 50))]
    pub exercise_mode: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeviceBySecretQuery {
    pub device_id: Uuid,
    pub secret_code: String,
}
