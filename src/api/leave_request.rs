use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::model::leave_request::{LeaveDecision, LeaveRequest};
use crate::service;
use crate::store::mysql::MySqlStore;

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = "Medical leave")]
    pub reason: String,
    #[schema(example = "2026-08-10", format = "date", value_type = String)]
    pub from_date: chrono::NaiveDate,
    #[schema(example = "2026-08-12", format = "date", value_type = String)]
    pub to_date: chrono::NaiveDate,
}

/* =========================
Submit leave request (faculty)
========================= */
#[utoipa::path(
    post,
    path = "/api/v1/leave",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request submitted", body = LeaveRequest),
        (status = 400, description = "Empty reason or inverted date range"),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Caller is not approved faculty")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn create_leave(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    payload: web::Json<CreateLeave>,
) -> actix_web::Result<impl Responder> {
    let request = service::leave::submit(
        store.get_ref(),
        &auth,
        &payload.reason,
        payload.from_date,
        payload.to_date,
    )
    .await?;

    Ok(HttpResponse::Ok().json(request))
}

/* =========================
Department view (HOD)
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/leave",
    responses(
        (status = 200, description = "Requests of the admin's department, newest first",
         body = [LeaveRequest]),
        (status = 401, description = "Unauthenticated"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn leave_list(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
) -> actix_web::Result<impl Responder> {
    let requests = service::leave::list_for_department(store.get_ref(), &auth).await?;
    Ok(HttpResponse::Ok().json(requests))
}

/* =========================
Own history (faculty)
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/leave/mine",
    responses(
        (status = 200, description = "The caller's own requests, newest first",
         body = [LeaveRequest]),
        (status = 403, description = "Caller is not faculty")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn my_leaves(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
) -> actix_web::Result<impl Responder> {
    let requests = service::leave::list_own(store.get_ref(), &auth).await?;
    Ok(HttpResponse::Ok().json(requests))
}

#[utoipa::path(
    get,
    path = "/api/v1/leave/{leave_id}",
    params(("leave_id" = u64, Path, description = "ID of the leave request to fetch")),
    responses(
        (status = 200, description = "Leave request found", body = LeaveRequest),
        (status = 403, description = "Request belongs to another department"),
        (status = 404, description = "Leave request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn get_leave(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let request = service::leave::get(store.get_ref(), &auth, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(request))
}

/* =========================
Approve leave (HOD)
========================= */
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/approve",
    params(("leave_id" = u64, Path, description = "ID of the leave request to approve")),
    responses(
        (status = 200, description = "Leave approved", body = Object, example = json!({
            "message": "Leave approved", "status": "approved"
        })),
        (status = 400, description = "Already processed"),
        (status = 403, description = "Wrong role or wrong department"),
        (status = 404, description = "Leave request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let status = service::leave::decide(
        store.get_ref(),
        &auth,
        path.into_inner(),
        LeaveDecision::Approved,
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave approved",
        "status": status
    })))
}

/* =========================
Reject leave (HOD)
========================= */
#[utoipa::path(
    put,
    path = "/api/v1/leave/{leave_id}/reject",
    params(("leave_id" = u64, Path, description = "ID of the leave request to reject")),
    responses(
        (status = 200, description = "Leave rejected", body = Object, example = json!({
            "message": "Leave rejected", "status": "rejected"
        })),
        (status = 400, description = "Already processed"),
        (status = 403, description = "Wrong role or wrong department"),
        (status = 404, description = "Leave request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let status = service::leave::decide(
        store.get_ref(),
        &auth,
        path.into_inner(),
        LeaveDecision::Rejected,
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave rejected",
        "status": status
    })))
}
