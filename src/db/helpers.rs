//! Database query helper functions to reduce boilerplate error handling.
//!
//! These helpers simplify common patterns like:
//! - Fetching a required record (NotFound if missing)
//! - Ensuring a record doesn't exist (Conflict if it does)
//! - Rejecting invalid request bodies before touching the database
//!
//! # Usage
//!
//! For handlers returning `Result<HttpResponse>`:
//! ```ignore
//! let user = ok_or_return!(require_record(query.fetch_optional(pool).await, "User not found"));
//! ```

use actix_web::HttpResponse;
use validator::Validate;

use crate::models::common::ApiResponse;

/// Macro for handlers returning `Result<HttpResponse>`.
/// Converts a `DbResult<T>` to return `Ok(error_response)` on error.
///
/// # Example
/// ```ignore
/// let device = ok_or_return!(require_record(
///     sqlx::query_as::<_, Device>(...).fetch_optional(pool).await,
///     "Device not found"
/// ));
/// ```
#[macro_export]
macro_rules! ok_or_return {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(response) => return Ok(response),
        }
    };
}

/// Result type for database operations that return an HttpResponse on error
pub type DbResult<T> = Result<T, HttpResponse>;

/// Opaque 500 used whenever a query fails. The underlying error is logged,
/// never sent to the client.
pub fn internal_error(context: &str, error: &sqlx::Error) -> HttpResponse {
    tracing::error!("{}: {:?}", context, error);
    HttpResponse::InternalServerError().json(ApiResponse::<()>::error("Internal server error"))
}

/// Unwrap an optional database result, returning NotFound if None.
pub fn require_record<T>(
    result: Result<Option<T>, sqlx::Error>,
    not_found_message: &str,
) -> DbResult<T> {
    match result {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::<()>::error(not_found_message))),
        Err(e) => Err(internal_error("Database error", &e)),
    }
}

/// Ensure a record does NOT exist, returning Conflict if it does.
///
/// # Example
/// ```ignore
/// ensure_not_exists(
///     sqlx::query("SELECT id FROM users WHERE name = $1").bind(name)
///         .fetch_optional(pool)
///         .await,
///     "This name is already taken"
/// )?;
/// ```
pub fn ensure_not_exists<T>(
    result: Result<Option<T>, sqlx::Error>,
    conflict_message: &str,
) -> DbResult<()> {
    match result {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::<()>::error(conflict_message))),
        Ok(None) => Ok(()),
        Err(e) => Err(internal_error("Database error", &e)),
    }
}

/// Unwrap a database result, returning InternalServerError on error.
/// Use this when you just need to handle the Err case.
pub fn db_result<T>(result: Result<T, sqlx::Error>) -> DbResult<T> {
    result.map_err(|e| internal_error("Database error", &e))
}

/// Run `validator` rules on a request body, returning BadRequest with the
/// collected messages when they fail.
pub fn validate_request<T: Validate>(request: &T) -> DbResult<()> {
    request.validate().map_err(|e| {
        tracing::info!("Rejected invalid request: {}", e);
        HttpResponse::BadRequest().json(ApiResponse::<()>::error(format!("Invalid input: {}", e)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn require_record_maps_none_to_not_found() {
        let response = require_record::<i32>(Ok(None), "Missing").unwrap_err();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn require_record_maps_errors_to_internal() {
        let response = require_record::<i32>(Err(sqlx::Error::RowNotFound), "Missing").unwrap_err();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn ensure_not_exists_maps_some_to_conflict() {
        let response = ensure_not_exists(Ok(Some(1)), "Taken").unwrap_err();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(ensure_not_exists::<i32>(Ok(None), "Taken").is_ok());
    }
}
