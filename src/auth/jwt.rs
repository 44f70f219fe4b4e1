use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::model::user::UserProfile;
use crate::models::{Claims, TokenType};

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

fn claims_for(user: &UserProfile, token_type: TokenType, ttl: usize) -> Claims {
    Claims {
        user_id: user.id,
        sub: user.email.clone(),
        role: user.role,
        department: user.department,
        approved: user.approved,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        token_type,
    }
}

pub fn generate_access_token(user: &UserProfile, secret: &str, ttl: usize) -> String {
    let claims = claims_for(user, TokenType::Access, ttl);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

pub fn generate_refresh_token(user: &UserProfile, secret: &str, ttl: usize) -> (String, Claims) {
    let claims = claims_for(user, TokenType::Refresh, ttl);

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    (token, claims)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{department::Department, role::Role};
    use chrono::Utc;

    fn sample_user() -> UserProfile {
        UserProfile {
            id: 7,
            name: "Dr. Ramesh Kumar".to_string(),
            email: "faculty1@edusync.com".to_string(),
            phone: None,
            password: "hash".to_string(),
            role: Role::Faculty,
            department: Department::Cse,
            erp_id: Some("ERP001".to_string()),
            approved: true,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn access_token_round_trips_role_and_department() {
        let token = generate_access_token(&sample_user(), "secret", 900);
        let claims = verify_token(&token, "secret").unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.sub, "faculty1@edusync.com");
        assert_eq!(claims.role, Role::Faculty);
        assert_eq!(claims.department, Department::Cse);
        assert!(claims.approved);
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = generate_access_token(&sample_user(), "secret", 900);
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn refresh_token_carries_refresh_type_and_jti() {
        let (token, claims) = generate_refresh_token(&sample_user(), "secret", 3600);
        assert_eq!(claims.token_type, TokenType::Refresh);
        assert!(!claims.jti.is_empty());
        let decoded = verify_token(&token, "secret").unwrap();
        assert_eq!(decoded.jti, claims.jti);
    }
}
