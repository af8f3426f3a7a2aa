use actix_web::{web, HttpResponse, Result};
use sqlx::PgPool;

use crate::db::helpers::validate_request;
use crate::db::training::{record_training_session, TrainingLogError};
use crate::handlers::access::ensure_can_act_for;
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::training::TrainingLogRequest;
use crate::ok_or_return;

// POST /api/training/log
#[tracing::instrument(
    name = "Submit training log",
    skip(request, pool, claims),
    fields(
        user_id = %request.user_id,
        training_date = %request.training_date
    )
)]
pub async fn submit_training_log(
    request: web::Json<TrainingLogRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    ok_or_return!(validate_request(&*request));
    ok_or_return!(ensure_can_act_for(pool.get_ref(), &claims, request.user_id).await);

    match record_training_session(pool.get_ref(), &request).await {
        Ok(outcome) => {
            if let Some(progress) = outcome.progress {
                tracing::info!(
                    "New training day, user now at {} exp in division {}",
                    progress.exp_progress,
                    progress.division_index
                );
            }
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message("Training logged successfully")))
        }
        Err(TrainingLogError::EmptyBatch) => Ok(HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("At least one exercise is required"))),
        Err(TrainingLogError::DuplicateSession(exercise)) => Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error(
            format!("You already trained '{}' today", exercise),
        ))),
        Err(TrainingLogError::Database(e)) => {
            tracing::error!("Training log transaction failed: {:?}", e);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Failed to log training")))
        }
    }
}
