use actix_web::HttpResponse;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::helpers::{db_result, DbResult};
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::user::UserRole;

/// Caller id from the token, or a 400 when the subject is not a UUID.
pub fn caller_id(claims: &Claims) -> DbResult<Uuid> {
    claims.user_id().ok_or_else(|| {
        tracing::error!("Invalid user ID in claims");
        HttpResponse::BadRequest().json(ApiResponse::<()>::error("Invalid user ID"))
    })
}

/// Allow the user themselves, an admin, or the user's coach.
pub async fn ensure_can_act_for(pool: &PgPool, claims: &Claims, user_id: Uuid) -> DbResult<()> {
    let caller = caller_id(claims)?;
    if caller == user_id || claims.is_admin() {
        return Ok(());
    }

    if claims.role == UserRole::Coach {
        let coaches_user = db_result(
            sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND coach_id = $2)",
            )
            .bind(user_id)
            .bind(caller)
            .fetch_one(pool)
            .await,
        )?;
        if coaches_user {
            return Ok(());
        }
    }

    tracing::warn!("User {} attempted to act for user {}", caller, user_id);
    Err(HttpResponse::Forbidden().json(ApiResponse::<()>::error("Not allowed to act for this user")))
}
