// src/models/auth.rs
use serde::{Deserialize, Serialize};
use secrecy::SecretString;
use uuid::Uuid;

use crate::models::user::{UserProfile, UserRole};

#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    #[serde(serialize_with = "crate::models::user::serialize_secret_string",
            deserialize_with = "crate::models::user::deserialize_secret_string")]
    pub password: SecretString,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole,
    pub exp_progress: i32,
    pub division_index: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub token: String,
    pub user: UserProfile,
}
