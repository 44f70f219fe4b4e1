use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures::future::{Ready, ready};

use crate::auth::jwt::verify_token;
use crate::config::Config;
use crate::error::ApiError;
use crate::model::{department::Department, role::Role};
use crate::models::TokenType;

/// Authenticated caller, decoded from the bearer token's claims. This is the
/// authorization input for every protected operation.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: u64,
    pub email: String,
    pub role: Role,
    pub department: Department,
    pub approved: bool,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(ApiError::unauthenticated("Missing token").into())),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(
                    ApiError::Internal("App config missing".to_string()).into()
                ));
            }
        };

        let claims = match verify_token(token, &config.jwt_secret) {
            Ok(c) => c,
            Err(_) => return ready(Err(ApiError::unauthenticated("Invalid token").into())),
        };

        if claims.token_type != TokenType::Access {
            return ready(Err(
                ApiError::unauthenticated("Access token required").into()
            ));
        }

        ready(Ok(AuthUser {
            user_id: claims.user_id,
            email: claims.sub,
            role: claims.role,
            department: claims.department,
            approved: claims.approved,
        }))
    }
}

impl AuthUser {
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(ApiError::permission_denied(
                "Only users with admin role can call this function",
            ))
        }
    }

    pub fn require_faculty(&self) -> Result<(), ApiError> {
        if self.role == Role::Faculty {
            Ok(())
        } else {
            Err(ApiError::permission_denied("Faculty only"))
        }
    }

    /// Faculty whose account an HOD has approved.
    pub fn require_approved_faculty(&self) -> Result<(), ApiError> {
        self.require_faculty()?;
        if self.approved {
            Ok(())
        } else {
            Err(ApiError::permission_denied(
                "Account is pending HOD approval",
            ))
        }
    }

    /// Admin of the given department; admins never act across departments.
    pub fn require_admin_of(&self, department: Department) -> Result<(), ApiError> {
        self.require_admin()?;
        if self.department == department {
            Ok(())
        } else {
            Err(ApiError::permission_denied(
                "Admins can only act within their own department",
            ))
        }
    }
}

#[cfg(test)]
impl AuthUser {
    pub fn test(role: Role, department: Department, approved: bool) -> Self {
        Self::test_with_email("someone@edusync.com", role, department, approved)
    }

    pub fn test_with_email(
        email: &str,
        role: Role,
        department: Department,
        approved: bool,
    ) -> Self {
        AuthUser {
            user_id: 1,
            email: email.to_string(),
            role,
            department,
            approved,
        }
    }
}
