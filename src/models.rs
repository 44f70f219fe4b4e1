use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::{department::Department, role::Role};

#[derive(Deserialize, ToSchema)]
pub struct LoginReqDto {
    #[schema(example = "faculty1@edusync.com")]
    pub email: String,
    pub password: String,
}

/// Faculty self-registration. Accounts land unapproved and wait for the HOD.
#[derive(Deserialize, ToSchema)]
pub struct SignupReqDto {
    #[schema(example = "Dr. Ramesh Kumar")]
    pub name: String,
    #[schema(example = "faculty1@edusync.com")]
    pub email: String,
    #[schema(example = "+919876543301")]
    pub phone: String,
    #[schema(example = "ERP001")]
    #[serde(rename = "erpId")]
    pub erp_id: String,
    pub password: String,
    #[schema(example = "CSE")]
    pub department: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    /// Email of the authenticated identity.
    pub sub: String,
    pub role: Role,
    pub department: Department,
    pub approved: bool,
    pub exp: usize,
    pub jti: String,
    pub token_type: TokenType,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub enum TokenType {
    Access,
    Refresh,
}
