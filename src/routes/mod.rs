use actix_web::web;

pub mod admin;
pub mod affiliate;
pub mod auth;
pub mod backend_health;
pub mod coaching;
pub mod devices;
pub mod feedback;
pub mod registration;
pub mod training;
pub mod training_plans;
pub mod users;

use crate::middleware::auth::AuthMiddleware;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    cfg.service(
        web::scope("/api")
            // Public routes
            .service(registration::register)
            .service(auth::login)
            .service(devices::get_devices)
            .service(devices::get_device_by_secret)
            .service(affiliate::get_offers)
            .service(affiliate::record_click)
            .service(affiliate::record_conversion)
            // User routes (require authentication)
            .service(
                web::scope("/users")
                    .wrap(AuthMiddleware)
                    .service(users::get_users)
                    .service(users::get_user)
                    .service(users::get_history)
                    .service(users::get_streak)
                    .service(users::get_training_plans)
            )
            // Training plan routes (require authentication)
            .service(
                web::scope("/training-plans")
                    .wrap(AuthMiddleware)
                    .service(training_plans::create_plan)
                    .service(training_plans::update_plan)
                    .service(training_plans::delete_plan)
                    .service(training_plans::start_plan)
            )
            // Training log routes (require authentication)
            .service(
                web::scope("/training")
                    .wrap(AuthMiddleware)
                    .service(training::submit_log)
            )
            // Coaching routes (require authentication)
            .service(
                web::scope("/coaching")
                    .wrap(AuthMiddleware)
                    .service(coaching::request_by_membership)
                    .service(coaching::get_requests)
                    .service(coaching::update_request)
                    .service(coaching::get_clients)
            )
            // Feedback routes (require authentication)
            .service(
                web::scope("/feedback")
                    .wrap(AuthMiddleware)
                    .service(feedback::create_feedback)
                    .service(feedback::get_feedback)
            )
            .configure(admin::init_admin_routes)
    );
}
