use actix_web::{HttpResponse, Responder};
use serde_json::json;

use crate::auth::{auth::AuthUser, guard};

/// Current identity plus its landing route, so clients can mirror the
/// role-based route policy without hardcoding it.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Current identity and landing route", body = Object,
         example = json!({
            "uid": 42,
            "email": "faculty1@edusync.com",
            "role": "faculty",
            "department": "CSE",
            "approved": true,
            "landing": "/faculty"
         })),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Session"
)]
pub async fn session(auth: AuthUser) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "uid": auth.user_id,
        "email": auth.email,
        "role": auth.role,
        "department": auth.department,
        "approved": auth.approved,
        "landing": guard::landing_page(auth.role),
    }))
}
