use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

use crate::error::ApiError;

/// Closed set of departments. Every user, leave request and notification is
/// scoped to exactly one of these; writes carrying anything else are rejected.
#[derive(
    Debug,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    sqlx::Type,
    Display,
    EnumString,
    EnumIter,
    ToSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Department {
    #[sqlx(rename = "CSE")]
    Cse,
    #[sqlx(rename = "CSE_AIML")]
    CseAiml,
    #[sqlx(rename = "CSE_AIDS")]
    CseAids,
    #[sqlx(rename = "CSE_DS")]
    CseDs,
    #[sqlx(rename = "ECE")]
    Ece,
    #[sqlx(rename = "HS")]
    Hs,
}

impl Department {
    /// Parse a wire value, rejecting anything outside the closed set with a
    /// validation error naming the allowed values.
    pub fn parse(value: &str) -> Result<Self, ApiError> {
        value.parse::<Department>().map_err(|_| {
            ApiError::invalid_argument(format!(
                "Invalid department. Must be one of: {}",
                Department::allowed_values()
            ))
        })
    }

    pub fn allowed_values() -> String {
        Department::iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_allowed_department() {
        for value in ["CSE", "CSE_AIML", "CSE_AIDS", "CSE_DS", "ECE", "HS"] {
            let dept = Department::parse(value).unwrap();
            assert_eq!(dept.to_string(), value);
        }
    }

    #[test]
    fn rejects_unknown_department_and_names_allowed_set() {
        let err = Department::parse("MECH").unwrap_err();
        match err {
            ApiError::InvalidArgument(msg) => {
                assert!(msg.contains("CSE, CSE_AIML, CSE_AIDS, CSE_DS, ECE, HS"));
            }
            other => panic!("expected invalid-argument, got {:?}", other),
        }
    }

    #[test]
    fn rejects_lowercase_spelling() {
        assert!(Department::parse("cse").is_err());
    }
}
