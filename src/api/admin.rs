use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::model::user::ProfileResponse;
use crate::service;
use crate::store::mysql::MySqlStore;

// Fields stay optional at the deserialization layer so the role check runs
// before required-field validation.

#[derive(Deserialize, ToSchema)]
pub struct CreateAdminReq {
    #[schema(example = "hod.ece@edusync.com")]
    pub email: Option<String>,
    pub password: Option<String>,
    #[schema(example = "ECE")]
    pub department: Option<String>,
    #[schema(example = "HOD ECE", nullable = true)]
    pub name: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct CreateFacultyReq {
    #[schema(example = "faculty1@edusync.com")]
    pub email: Option<String>,
    pub password: Option<String>,
    #[schema(example = "CSE")]
    pub department: Option<String>,
    #[schema(example = "Dr. Ramesh Kumar")]
    pub name: Option<String>,
    #[schema(example = "ERP001")]
    #[serde(rename = "erpId")]
    pub erp_id: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct ApproveFacultyReq {
    #[schema(example = 42)]
    pub uid: Option<u64>,
    #[schema(example = "CSE")]
    pub department: Option<String>,
}

/// Create another admin (idempotent on email).
#[utoipa::path(
    post,
    path = "/api/v1/admin/create-admin",
    request_body = CreateAdminReq,
    responses(
        (status = 200, description = "Admin created or updated", body = Object,
         example = json!({"success": true, "uid": 42})),
        (status = 400, description = "Missing field or invalid department"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_admin(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    payload: web::Json<CreateAdminReq>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let uid = service::admin::create_admin(
        store.get_ref(),
        &auth,
        payload.email,
        payload.password,
        payload.department,
        payload.name,
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "uid": uid })))
}

/// Create or update a faculty account; it stays unapproved until the HOD
/// approves it.
#[utoipa::path(
    post,
    path = "/api/v1/admin/create-faculty",
    request_body = CreateFacultyReq,
    responses(
        (status = 200, description = "Faculty created or updated", body = Object,
         example = json!({"success": true, "uid": 43})),
        (status = 400, description = "Missing field or invalid department"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_faculty(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    payload: web::Json<CreateFacultyReq>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let uid = service::admin::create_faculty(
        store.get_ref(),
        &auth,
        payload.email,
        payload.password,
        payload.department,
        payload.name,
        payload.erp_id,
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "uid": uid })))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/approve-faculty",
    request_body = ApproveFacultyReq,
    responses(
        (status = 200, description = "Faculty approved", body = Object,
         example = json!({"success": true, "uid": 43})),
        (status = 400, description = "Missing field or invalid department"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "No such user")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn approve_faculty(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    payload: web::Json<ApproveFacultyReq>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let uid = service::admin::approve_faculty(
        store.get_ref(),
        &auth,
        payload.uid,
        payload.department,
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "uid": uid })))
}

/// Unapproved faculty of the caller's department.
#[utoipa::path(
    get,
    path = "/api/v1/admin/pending-faculty",
    responses(
        (status = 200, description = "Pending faculty accounts", body = [ProfileResponse]),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn pending_faculty(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
) -> actix_web::Result<impl Responder> {
    let pending = service::admin::list_pending_faculty(store.get_ref(), &auth).await?;
    let response: Vec<ProfileResponse> = pending.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(response))
}
