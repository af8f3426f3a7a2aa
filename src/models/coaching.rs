use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachingStatus {
    Pending,
    Accepted,
    Rejected,
}

impl CoachingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoachingStatus::Pending => "pending",
            CoachingStatus::Accepted => "accepted",
            CoachingStatus::Rejected => "rejected",
        }
    }
}

impl TryFrom<String> for CoachingStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("{} is not a valid coaching status", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct CoachingRequest {
    pub id: Uuid,
    pub coach_id: Uuid,
    pub client_id: Uuid,
    #[sqlx(try_from = "String")]
    pub status: CoachingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CoachingByMembershipRequest {
    pub coach_id: Uuid,
    #[validate(length(min = 1, max = 50))]
    pub membership_number: String,
}

#[derive(Debug, Deserialize)]
pub struct CoachingQuery {
    pub client_id: Option<Uuid>,
    pub coach_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCoachingRequest {
    pub status: CoachingStatus,
}

#[derive(Debug, Deserialize)]
pub struct ClientsQuery {
    pub coach_id: Uuid,
}
