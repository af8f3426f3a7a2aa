use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::training::progression::Progress;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExerciseEntry {
    #[validate(length(min = 1, max = 100))]
    pub exercise: String,
    #[validate(range(min = 1, max = 1000))]
    pub sets: i32,
    #[validate(range(min = 1, max = 10000))]
    pub reps: i32,
    #[validate(range(min = 0.0, max = 10000.0))]
    pub weight: f64,
}

/// One submission from a device: every entry shares user, device and date.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TrainingLogRequest {
    pub user_id: Uuid,
    pub device_id: Uuid,
    pub training_date: NaiveDate,
    #[validate(length(min = 1, max = 100), nested, custom(function = "validate_unique_exercises"))]
    pub exercises: Vec<ExerciseEntry>,
}

fn validate_unique_exercises(exercises: &[ExerciseEntry]) -> Result<(), ValidationError> {
    let mut seen = std::collections::HashSet::new();
    if exercises.iter().all(|entry| seen.insert(entry.exercise.as_str())) {
        Ok(())
    } else {
        Err(ValidationError::new("duplicate_exercise_in_batch"))
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct TrainingHistoryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub device_id: Uuid,
    pub training_date: NaiveDate,
    pub exercise: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub exercise: Option<String>,
    pub device_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StreakResponse {
    pub current_streak: u32,
}

/// What a committed training log changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingLogOutcome {
    pub entries_recorded: usize,
    /// `Some` only when this submission created the day's marker and
    /// therefore awarded experience.
    pub progress: Option<Progress>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(exercise: &str) -> ExerciseEntry {
        ExerciseEntry { exercise: exercise.into(), sets: 3, reps: 10, weight: 40.0 }
    }

    fn request(exercises: Vec<ExerciseEntry>) -> TrainingLogRequest {
        TrainingLogRequest {
            user_id: Uuid::new_v4(),
            device_id: Uuid::new_v4(),
            training_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            exercises,
        }
    }

    #[test]
    fn empty_batch_is_invalid() {
        assert!(request(vec![]).validate().is_err());
    }

    #[test]
    fn batch_with_distinct_exercises_is_valid() {
        assert!(request(vec![entry("bench press"), entry("rowing")]).validate().is_ok());
    }

    #[test]
    fn repeated_exercise_within_batch_is_invalid() {
        assert!(request(vec![entry("squat"), entry("squat")]).validate().is_err());
    }

    #[test]
    fn negative_weight_is_invalid() {
        let mut bad = entry("squat");
        bad.weight = -5.0;
        assert!(request(vec![bad]).validate().is_err());
    }

    #[test]
    fn training_date_parses_from_iso_day() {
        let body = serde_json::json!({
            "user_id": Uuid::new_v4(),
            "device_id": Uuid::new_v4(),
            "training_date": "2025-03-14",
            "exercises": [{"exercise": "squat", "sets": 3, "reps": 8, "weight": 80.5}]
        });
        let parsed: TrainingLogRequest = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.training_date, NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(parsed.exercises[0].weight, 80.5);
    }
}
