use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Inactive,
    Active,
}

impl PlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanStatus::Inactive => "inactive",
            PlanStatus::Active => "active",
        }
    }
}

impl TryFrom<String> for PlanStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "inactive" => Ok(Self::Inactive),
            "active" => Ok(Self::Active),
            other => Err(format!("{} is not a valid plan status", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct TrainingPlan {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub status: PlanStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlanExercise {
    #[serde(skip)]
    pub plan_id: Uuid,
    pub device_id: Uuid,
    pub exercise_order: i32,
    pub device_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TrainingPlanWithExercises {
    #[serde(flatten)]
    pub plan: TrainingPlan,
    pub exercises: Vec<PlanExercise>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlanRequest {
    pub user_id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlanExerciseInput {
    pub device_id: Uuid,
    pub exercise_order: i32,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlanRequest {
    pub exercises: Vec<PlanExerciseInput>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StartPlanResponse {
    pub exercise_order: Vec<Uuid>,
}
