use actix_web::{get, post, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::handlers::feedback_handler;
use crate::middleware::auth::Claims;
use crate::models::feedback::{CreateFeedbackRequest, FeedbackQuery};

#[post("")]
pub async fn create_feedback(
    request: web::Json<CreateFeedbackRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    feedback_handler::create_feedback(request, pool, claims).await
}

#[get("")]
pub async fn get_feedback(
    query: web::Query<FeedbackQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    feedback_handler::get_feedback(query, pool).await
}
