pub mod admin_helpers;
pub mod training_helpers;
pub mod utils;
