use actix_web::{HttpRequest, HttpResponse, Responder, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, info, instrument};

use crate::auth::{
    jwt::{generate_access_token, generate_refresh_token, verify_token},
    password::{hash_password, verify_password},
};
use crate::config::Config;
use crate::error::ApiError;
use crate::model::department::Department;
use crate::models::{LoginReqDto, SignupReqDto, TokenType};
use crate::store::{NewUser, TokenStore, UserStore, mysql::MySqlStore};
use crate::utils::{email_cache, email_filter};

#[derive(Serialize, Deserialize)]
struct LoginResponse {
    access_token: String,
    refresh_token: String,
}

/// true  => email AVAILABLE
/// false => email TAKEN
pub async fn is_email_available(email: &str, store: &MySqlStore) -> bool {
    let email = email.to_lowercase();

    // 1. Cuckoo filter: a definite "never seen" answers immediately.
    if !email_filter::might_exist(&email) {
        return true;
    }

    // 2. Moka cache: fast positive.
    if email_cache::is_taken(&email).await {
        return false;
    }

    // 3. Database fallback.
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = ? LIMIT 1)",
    )
    .bind(&email)
    .fetch_one(store.pool())
    .await
    .unwrap_or(true); // fail-safe: treat errors as taken

    !exists
}

/// Faculty self-registration; the account waits for HOD approval.
#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = SignupReqDto,
    responses(
        (status = 201, description = "Account created, pending approval"),
        (status = 400, description = "Missing field or invalid department"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Auth"
)]
pub async fn signup(
    payload: web::Json<SignupReqDto>,
    store: web::Data<MySqlStore>,
) -> actix_web::Result<impl Responder> {
    let email = payload.email.trim().to_lowercase();

    if payload.name.trim().is_empty()
        || email.is_empty()
        || payload.phone.trim().is_empty()
        || payload.erp_id.trim().is_empty()
        || payload.password.is_empty()
    {
        return Err(ApiError::invalid_argument(
            "Missing required parameters: name, email, phone, erpId, password, department",
        )
        .into());
    }

    let department = Department::parse(&payload.department)?;

    if !is_email_available(&email, store.get_ref()).await {
        return Ok(HttpResponse::Conflict().json(json!({
            "error": "Email already registered"
        })));
    }

    let hashed = hash_password(&payload.password);
    let created = store
        .put_new_user(NewUser {
            name: payload.name.trim().to_string(),
            email: email.clone(),
            phone: payload.phone.trim().to_string(),
            password: hashed,
            erp_id: payload.erp_id.trim().to_string(),
            department,
        })
        .await
        .map_err(ApiError::from_store)?;

    match created {
        Some(_) => {
            email_filter::insert(&email);
            email_cache::mark_taken(&email).await;
            Ok(HttpResponse::Created().json(json!({
                "message": "Account created. An HOD must approve it before leave requests can be submitted."
            })))
        }
        // lost the race against a concurrent signup
        None => Ok(HttpResponse::Conflict().json(json!({
            "error": "Email already registered"
        }))),
    }
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Token pair"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
#[instrument(name = "auth_login", skip(store, config, payload), fields(email = %payload.email))]
pub async fn login(
    payload: web::Json<LoginReqDto>,
    store: web::Data<MySqlStore>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    if payload.email.trim().is_empty() || payload.password.is_empty() {
        info!("Validation failed: empty email or password");
        return HttpResponse::BadRequest().json(json!({
            "error": "invalid-argument",
            "message": "Email and password required"
        }));
    }

    debug!("Fetching user from database");

    let user = match store.get_user_by_email(&payload.email.to_lowercase()).await {
        Ok(Some(user)) => {
            debug!(user_id = user.id, "User found");
            user
        }
        Ok(None) => {
            info!("Invalid credentials: user not found");
            return HttpResponse::Unauthorized().json(json!({
                "error": "unauthenticated",
                "message": "Invalid credentials"
            }));
        }
        Err(e) => {
            error!(error = %e, "Database error while fetching user");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if verify_password(&payload.password, &user.password).is_err() {
        info!("Invalid credentials: password mismatch");
        return HttpResponse::Unauthorized().json(json!({
            "error": "unauthenticated",
            "message": "Invalid credentials"
        }));
    }

    debug!("Password verified, generating tokens");

    let access_token = generate_access_token(&user, &config.jwt_secret, config.access_token_ttl);
    let (refresh_token, refresh_claims) =
        generate_refresh_token(&user, &config.jwt_secret, config.refresh_token_ttl);

    if let Err(e) = store
        .put_refresh_token(user.id, &refresh_claims.jti, refresh_claims.exp as i64)
        .await
    {
        error!(error = %e, "Failed to store refresh token");
        return HttpResponse::InternalServerError().finish();
    }

    // non-fatal
    if let Err(e) = store.put_last_login(user.id).await {
        error!(error = %e, "Failed to update last_login_at");
    }

    info!("Login successful");

    HttpResponse::Ok().json(LoginResponse {
        access_token,
        refresh_token,
    })
}

#[utoipa::path(
    post,
    path = "/auth/refresh",
    responses(
        (status = 200, description = "New token pair"),
        (status = 401, description = "Missing, invalid or revoked refresh token")
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn refresh_token(
    req: HttpRequest,
    store: web::Data<MySqlStore>,
    config: web::Data<Config>,
) -> impl Responder {
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::Unauthorized().body("No token"),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::Unauthorized().body("Invalid token"),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::Unauthorized().finish(),
    };

    if claims.token_type != TokenType::Refresh {
        return HttpResponse::Unauthorized().finish();
    }

    let record = match store.get_refresh_token(&claims.jti).await {
        Ok(Some(r)) if !r.revoked => r,
        Ok(_) => return HttpResponse::Unauthorized().finish(),
        Err(e) => {
            error!(error = %e, "Failed to look up refresh token");
            return HttpResponse::InternalServerError().finish();
        }
    };

    // Re-read the profile so rotated tokens pick up approval/role changes.
    let user = match store.get_user(record.user_id).await {
        Ok(Some(u)) => u,
        Ok(None) => return HttpResponse::Unauthorized().finish(),
        Err(e) => {
            error!(error = %e, "Failed to load user for refresh");
            return HttpResponse::InternalServerError().finish();
        }
    };

    if let Err(e) = store.put_revoked(&claims.jti).await {
        error!(error = %e, "Failed to revoke refresh token");
        return HttpResponse::InternalServerError().finish();
    }

    let (new_refresh_token, new_claims) =
        generate_refresh_token(&user, &config.jwt_secret, config.refresh_token_ttl);

    if let Err(e) = store
        .put_refresh_token(user.id, &new_claims.jti, new_claims.exp as i64)
        .await
    {
        error!(error = %e, "Failed to store rotated refresh token");
        return HttpResponse::InternalServerError().finish();
    }

    let access_token = generate_access_token(&user, &config.jwt_secret, config.access_token_ttl);

    HttpResponse::Ok().json(json!({
        "access_token": access_token,
        "refresh_token": new_refresh_token
    }))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 204, description = "Refresh token revoked (idempotent)")),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn logout(
    req: HttpRequest,
    store: web::Data<MySqlStore>,
    config: web::Data<Config>,
) -> impl Responder {
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::NoContent().finish(),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::NoContent().finish(),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::NoContent().finish(),
    };

    // only refresh tokens can be revoked
    if claims.token_type != TokenType::Refresh {
        return HttpResponse::NoContent().finish();
    }

    let _ = store.put_revoked(&claims.jti).await;

    // success even if the token didn't exist
    HttpResponse::NoContent().finish()
}
