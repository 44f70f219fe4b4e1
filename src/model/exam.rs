use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

use crate::error::ApiError;

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
    EnumIter,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExamType {
    Mids,
    LabInternals,
    Semester,
    Placements,
}

impl ExamType {
    pub fn parse(value: &str) -> Result<Self, ApiError> {
        value.parse::<ExamType>().map_err(|_| {
            ApiError::invalid_argument(format!(
                "Invalid exam type. Must be one of: {}",
                ExamType::iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", ")
            ))
        })
    }
}

/// Schedule metadata only; the PDF itself lives in external object storage
/// and is referenced by URL.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct ExamSchedule {
    #[schema(example = 1)]
    pub id: u64,
    pub exam_type: ExamType,
    #[schema(example = "Mid-term examinations, August 2026")]
    pub title: String,
    #[schema(example = "https://storage.example.com/exams/mids-aug-2026.pdf")]
    pub pdf_url: String,
    #[schema(example = "hod.cse@edusync.com")]
    pub uploaded_by: String,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewExamSchedule {
    pub exam_type: ExamType,
    pub title: String,
    pub pdf_url: String,
    pub uploaded_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_exam_types() {
        for value in ["mids", "lab_internals", "semester", "placements"] {
            assert_eq!(ExamType::parse(value).unwrap().to_string(), value);
        }
    }

    #[test]
    fn rejects_unknown_exam_type() {
        let err = ExamType::parse("vivas").unwrap_err();
        match err {
            ApiError::InvalidArgument(msg) => assert!(msg.contains("mids")),
            other => panic!("expected invalid-argument, got {:?}", other),
        }
    }
}
