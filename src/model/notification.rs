use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{department::Department, role::Role};

/// One delivery record. `to_email = None` means department-wide delivery to
/// every holder of `to_role` in `to_department`; `Some` pins it to a person.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Notification {
    #[schema(example = 1)]
    pub id: u64,
    pub to_role: Role,
    pub to_department: Department,
    #[schema(example = "faculty1@edusync.com", nullable = true)]
    pub to_email: Option<String>,
    #[schema(example = "New leave request from Dr. Ramesh Kumar (ERP001)")]
    pub message: String,
    #[sqlx(rename = "is_read")]
    pub read: bool,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub to_role: Role,
    pub to_department: Department,
    pub to_email: Option<String>,
    pub message: String,
}
