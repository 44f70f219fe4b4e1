use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// One timetable per faculty member. The schedule payload is free-form JSON
/// supplied by the client; it is stored verbatim and echoed back.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Timetable {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "faculty1@edusync.com")]
    pub faculty_email: String,
    /// JSON text of the weekly schedule.
    pub data: String,
    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,
}
