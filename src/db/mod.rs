pub mod helpers;
pub mod training;
pub mod training_plans;
pub mod users;
