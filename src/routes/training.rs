use actix_web::{post, web, HttpResponse, Result};
use sqlx::PgPool;

use crate::handlers::training_handler::submit_training_log;
use crate::middleware::auth::Claims;
use crate::models::training::TrainingLogRequest;

/// Record a batch of exercises for one user, device and day
#[post("/log")]
pub async fn submit_log(
    request: web::Json<TrainingLogRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    submit_training_log(request, pool, claims).await
}
