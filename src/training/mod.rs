pub mod progression;
pub mod streak;
