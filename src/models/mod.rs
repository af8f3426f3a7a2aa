pub mod affiliate;
pub mod auth;
pub mod coaching;
pub mod common;
pub mod device;
pub mod feedback;
pub mod reporting;
pub mod training;
pub mod training_plan;
pub mod user;
