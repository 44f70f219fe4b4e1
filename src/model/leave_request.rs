use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::model::department::Department;

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
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// Terminal decision on a pending request. Deliberately excludes `pending`
/// so a decision can never move a request back.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LeaveDecision {
    Approved,
    Rejected,
}

impl From<LeaveDecision> for LeaveStatus {
    fn from(d: LeaveDecision) -> Self {
        match d {
            LeaveDecision::Approved => LeaveStatus::Approved,
            LeaveDecision::Rejected => LeaveStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "faculty1@edusync.com")]
    pub faculty_email: String,
    #[schema(example = "Dr. Ramesh Kumar")]
    pub faculty_name: String,
    #[schema(example = "ERP001")]
    pub faculty_erp_id: String,
    pub department: Department,
    #[schema(example = "Medical leave")]
    pub reason: String,
    #[schema(example = "2026-08-10", value_type = String, format = "date")]
    pub from_date: NaiveDate,
    #[schema(example = "2026-08-12", value_type = String, format = "date")]
    pub to_date: NaiveDate,
    pub status: LeaveStatus,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

/// Insert payload; status is always `pending` on creation.
#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    pub faculty_email: String,
    pub faculty_name: String,
    pub faculty_erp_id: String,
    pub department: Department,
    pub reason: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}
