use actix_web::{post, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::config::jwt::JwtSettings;
use crate::handlers::registration_handler::register_user;
use crate::models::user::RegistrationRequest;

#[post("/register")]
pub async fn register(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<PgPool>,
    jwt_settings: web::Data<JwtSettings>,
) -> Result<HttpResponse> {
    register_user(user_form, pool, jwt_settings).await
}
