//! Experience and division bookkeeping for training days.

use serde::{Deserialize, Serialize};

/// Experience granted the first time a user trains on a given date.
pub const TRAINING_DAY_EXPERIENCE: i32 = 25;

/// Experience that rolls over into one division.
pub const EXPERIENCE_PER_DIVISION: i32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Progress {
    pub exp_progress: i32,
    pub division_index: i32,
}

impl Progress {
    pub fn new(exp_progress: i32, division_index: i32) -> Self {
        Self { exp_progress, division_index }
    }

    /// Add `experience` and carry every full `EXPERIENCE_PER_DIVISION` into
    /// the division index. Division never decreases for non-negative awards.
    pub fn award(self, experience: i32) -> Self {
        let total = self.exp_progress + experience;
        Self {
            exp_progress: total.rem_euclid(EXPERIENCE_PER_DIVISION),
            division_index: self.division_index + total.div_euclid(EXPERIENCE_PER_DIVISION),
        }
    }

    pub fn award_training_day(self) -> Self {
        self.award(TRAINING_DAY_EXPERIENCE)
    }
}
