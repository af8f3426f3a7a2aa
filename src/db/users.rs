use sqlx::PgPool;
use uuid::Uuid;

use crate::models::user::{UserProfile, UserRecord, UserRole};

pub struct NewUser<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub membership_number: &'a str,
}

#[tracing::instrument(name = "Insert user", skip(pool, user), fields(name = %user.name))]
pub async fn insert_user(pool: &PgPool, user: &NewUser<'_>) -> Result<UserProfile, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        r#"
        INSERT INTO users (id, name, email, password_hash, membership_number, exp_progress, division_index, role)
        VALUES ($1, $2, $3, $4, $5, 0, 0, $6)
        RETURNING id, name, exp_progress, division_index, role, coach_id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user.name)
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.membership_number)
    .bind(UserRole::Member.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to execute user insert query: {:?}", e);
        e
    })
}

pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>, sqlx::Error> {
    sqlx::query_as::<_, UserRecord>(
        r#"
        SELECT id, name, email, password_hash, membership_number, exp_progress, division_index, role, coach_id
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_id_by_membership(pool: &PgPool, membership_number: &str) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE membership_number = $1")
        .bind(membership_number)
        .fetch_optional(pool)
        .await
}

pub async fn find_id_by_name(pool: &PgPool, name: &str) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await
}

pub async fn find_id_by_email(pool: &PgPool, email: &str) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

pub async fn find_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<UserProfile>, sqlx::Error> {
    sqlx::query_as::<_, UserProfile>(
        "SELECT id, name, exp_progress, division_index, role, coach_id FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}
