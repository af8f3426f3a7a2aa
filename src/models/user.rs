use std::fmt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use secrecy::{ExposeSecret, SecretString};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Member,
    Admin,
    Coach,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Member => "member",
            UserRole::Admin => "admin",
            UserRole::Coach => "coach",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for UserRole {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "member" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            "coach" => Ok(Self::Coach),
            other => Err(format!("{} is not a valid user role", other)),
        }
    }
}

/// Full `users` row, only used where the password hash is needed.
#[derive(Debug, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub membership_number: String,
    pub exp_progress: i32,
    pub division_index: i32,
    #[sqlx(try_from = "String")]
    pub role: UserRole,
    pub coach_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub exp_progress: i32,
    pub division_index: i32,
    #[sqlx(try_from = "String")]
    pub role: UserRole,
    pub coach_id: Option<Uuid>,
}

impl From<UserRecord> for UserProfile {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id,
            name: user.name,
            exp_progress: user.exp_progress,
            division_index: user.division_index,
            role: user.role,
            coach_id: user.coach_id,
        }
    }
}

/// Leaderboard row
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub exp_progress: i32,
    pub division_index: i32,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClientSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Validate)]
pub struct RegistrationRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    // Checked by `validate_password`, the derive cannot see into a SecretString
    #[serde(serialize_with = "serialize_secret_string", deserialize_with = "deserialize_secret_string")]
    pub password: SecretString,
    #[validate(length(min = 1, max = 50))]
    pub membership_number: String,
}

impl std::fmt::Display for RegistrationRequest{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}, Email: {}", self.name, self.email)
    }
}

const MIN_PASSWORD_LENGTH: usize = 8;

impl RegistrationRequest {
    pub fn validate_password(&self) -> Result<(), ValidationError> {
        if self.password.expose_secret().len() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::new("password_too_short"));
        }
        Ok(())
    }
}

pub fn serialize_secret_string<S>(_: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str("[REDACTED]")
}

pub fn deserialize_secret_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(SecretString::new(s.into_boxed_str()))
}
