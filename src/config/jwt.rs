use secrecy::SecretString;
use serde::Deserialize;

/// Signing material for session tokens, loaded once at startup and shared
/// with handlers and middleware through `web::Data`.
#[derive(Debug, Deserialize)]
pub struct JwtSettings {
    pub secret: SecretString,
    pub expiration_hours: i64,
}

impl JwtSettings {
    pub fn new(secret: String, expiration_hours: i64) -> Self {
        Self {
            secret: SecretString::new(secret.into_boxed_str()),
            expiration_hours,
        }
    }
}
