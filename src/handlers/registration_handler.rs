use actix_web::{web, HttpResponse, Result};
use secrecy::ExposeSecret;
use sqlx::PgPool;

use crate::auth::jwt::generate_token;
use crate::config::jwt::JwtSettings;
use crate::db::helpers::{db_result, ensure_not_exists, validate_request};
use crate::db::users::{self, NewUser};
use crate::models::auth::RegistrationResponse;
use crate::models::common::ApiResponse;
use crate::models::user::RegistrationRequest;
use crate::ok_or_return;
use crate::utils::password::hash_password;

#[tracing::instrument(
    name = "Adding a new user",
    // Don't show arguments
    skip(user_form, pool, jwt_settings),
    fields(
        name = %user_form.name,
        email = %user_form.email
    )
)]
pub async fn register_user(
    user_form: web::Json<RegistrationRequest>,
    pool: web::Data<PgPool>,
    jwt_settings: web::Data<JwtSettings>,
) -> Result<HttpResponse> {
    ok_or_return!(validate_request(&*user_form));
    if let Err(e) = user_form.validate_password() {
        tracing::info!("Rejected registration: {}", e);
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(format!("Invalid input: {}", e))));
    }

    let pool = pool.get_ref();
    ok_or_return!(ensure_not_exists(
        users::find_id_by_membership(pool, &user_form.membership_number).await,
        "This membership number is already taken"
    ));
    ok_or_return!(ensure_not_exists(
        users::find_id_by_name(pool, &user_form.name).await,
        "This name is already taken"
    ));
    ok_or_return!(ensure_not_exists(
        users::find_id_by_email(pool, &user_form.email).await,
        "This email is already registered"
    ));

    let password_hash = match hash_password(user_form.password.expose_secret()) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Failed to hash password: {:?}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to register user")));
        }
    };

    let user = ok_or_return!(db_result(
        users::insert_user(
            pool,
            &NewUser {
                name: &user_form.name,
                email: &user_form.email,
                password_hash: &password_hash,
                membership_number: &user_form.membership_number,
            },
        )
        .await
    ));

    let token = match generate_token(user.id, &user.name, user.role, &jwt_settings) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Error generating JWT token: {:?}", e);
            return Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to register user")));
        }
    };

    tracing::info!("Registered user {}", user.id);
    Ok(HttpResponse::Created().json(ApiResponse::success(
        "User registered successfully",
        RegistrationResponse { token, user },
    )))
}
