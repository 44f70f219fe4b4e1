use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{department::Department, role::Role};

/// Full user row, including the password hash. Never serialized as-is;
/// outward responses go through [`ProfileResponse`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub role: Role,
    pub department: Department,
    pub erp_id: Option<String>,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, ToSchema)]
pub struct ProfileResponse {
    #[schema(example = 42)]
    pub uid: u64,
    #[schema(example = "Dr. Ramesh Kumar")]
    pub name: String,
    #[schema(example = "faculty1@edusync.com")]
    pub email: String,
    #[schema(example = "+919876543301", nullable = true)]
    pub phone: Option<String>,
    pub role: Role,
    pub department: Department,
    #[schema(example = "ERP001", nullable = true)]
    pub erp_id: Option<String>,
    pub approved: bool,
    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(u: UserProfile) -> Self {
        ProfileResponse {
            uid: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            role: u.role,
            department: u.department,
            erp_id: u.erp_id,
            approved: u.approved,
            created_at: u.created_at,
        }
    }
}
