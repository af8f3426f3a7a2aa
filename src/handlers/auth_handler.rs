// src/handlers/auth_handler.rs
use actix_web::{web, HttpResponse, Result};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::auth::jwt::generate_token;
use crate::config::jwt::JwtSettings;
use crate::db::helpers::internal_error;
use crate::db::users;
use crate::models::auth::{LoginRequest, LoginResponse};
use crate::models::common::ApiResponse;
use crate::utils::password::verify_password;

#[tracing::instrument(
    name = "Login user attempt",
    skip(login_form, pool, jwt_settings),
    fields(
        email = %login_form.email
    )
)]
pub async fn login_user(
    login_form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    jwt_settings: web::Data<JwtSettings>
) -> Result<HttpResponse> {
    let user = match users::find_by_email(pool.get_ref(), &login_form.email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::info!("User not found or invalid credentials");
            return Ok(invalid_credentials());
        }
        Err(e) => return Ok(internal_error("Database error occurred", &e)),
    };

    if !verify_password(login_form.password.expose_secret(), &user.password_hash) {
        tracing::info!("Invalid password");
        return Ok(invalid_credentials());
    }

    let token = match generate_token(user.id, &user.name, user.role, &jwt_settings) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("Error generating JWT token: {:?}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to log in")));
        }
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        "Login successful",
        LoginResponse {
            token,
            user_id: user.id,
            username: user.name,
            role: user.role,
            exp_progress: user.exp_progress,
            division_index: user.division_index,
        },
    )))
}

fn invalid_credentials() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::<()>::error("Invalid credentials"))
}
