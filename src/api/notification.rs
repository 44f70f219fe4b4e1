use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::model::notification::Notification;
use crate::service;
use crate::store::mysql::MySqlStore;

#[derive(Deserialize, ToSchema)]
pub struct BroadcastReq {
    #[schema(example = "Holiday notice")]
    pub message: Option<String>,
}

/// The caller's inbox, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    responses(
        (status = 200, description = "Notifications for the caller", body = [Notification]),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
pub async fn list_notifications(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
) -> actix_web::Result<impl Responder> {
    let notifications = service::notification::list_for_caller(store.get_ref(), &auth).await?;
    Ok(HttpResponse::Ok().json(notifications))
}

#[utoipa::path(
    put,
    path = "/api/v1/notifications/{notification_id}/read",
    params(("notification_id" = u64, Path, description = "Notification to mark read")),
    responses(
        (status = 200, description = "Marked read"),
        (status = 403, description = "Notification targets someone else"),
        (status = 404, description = "Notification not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
pub async fn mark_read(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    service::notification::mark_read(store.get_ref(), &auth, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Notification marked as read" })))
}

#[utoipa::path(
    put,
    path = "/api/v1/notifications/read-all",
    responses(
        (status = 200, description = "All own notifications marked read", body = Object,
         example = json!({"updated": 4})),
        (status = 403, description = "Caller is not faculty")
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
pub async fn mark_all_read(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
) -> actix_web::Result<impl Responder> {
    let updated = service::notification::mark_all_read(store.get_ref(), &auth).await?;
    Ok(HttpResponse::Ok().json(json!({ "updated": updated })))
}

/// One notification per known faculty profile; sequential writes with no
/// atomicity guarantee.
#[utoipa::path(
    post,
    path = "/api/v1/notifications/broadcast",
    request_body = BroadcastReq,
    responses(
        (status = 200, description = "Broadcast delivered", body = Object,
         example = json!({"delivered": 3})),
        (status = 400, description = "Missing message"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = [])),
    tag = "Notifications"
)]
pub async fn broadcast(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    payload: web::Json<BroadcastReq>,
) -> actix_web::Result<impl Responder> {
    let delivered = service::notification::broadcast_to_all_faculty(
        store.get_ref(),
        &auth,
        payload.into_inner().message,
    )
    .await?;
    Ok(HttpResponse::Ok().json(json!({ "delivered": delivered })))
}
