pub mod access;
pub mod affiliate_handler;
pub mod auth_handler;
pub mod backend_health_handler;
pub mod coaching_handler;
pub mod device_handler;
pub mod feedback_handler;
pub mod registration_handler;
pub mod reporting_handler;
pub mod training_handler;
pub mod training_plan_handler;
pub mod user_handler;
