use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    sqlx::Type,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Announcement {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Semester exam schedule released")]
    pub title: String,
    pub message: String,
    pub priority: Priority,
    #[schema(example = "hod.cse@edusync.com")]
    pub created_by: String,
    #[schema(example = "HOD CSE")]
    pub created_by_name: String,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub title: String,
    pub message: String,
    pub priority: Priority,
    pub created_by: String,
    pub created_by_name: String,
}
