use actix_web::web;

use crate::handlers::{device_handler, feedback_handler, reporting_handler};
use crate::middleware::admin::AdminMiddleware;

pub fn init_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AdminMiddleware)
            // Device management routes
            .service(
                web::resource("/devices")
                    .route(web::post().to(device_handler::create_device))
            )
            .service(
                web::resource("/devices/{id}")
                    .route(web::put().to(device_handler::update_device))
            )
            .service(
                web::resource("/devices/{id}/history")
                    .route(web::get().to(device_handler::get_device_history))
            )

            // Feedback triage
            .service(
                web::resource("/feedback/{id}")
                    .route(web::put().to(feedback_handler::update_feedback))
            )

            // Reporting routes
            .service(
                web::resource("/reporting/usage")
                    .route(web::get().to(reporting_handler::get_device_usage))
            )
    );
}
