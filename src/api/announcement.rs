use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::model::announcement::Announcement;
use crate::service;
use crate::store::mysql::MySqlStore;

#[derive(Deserialize, ToSchema)]
pub struct CreateAnnouncement {
    #[schema(example = "Semester exam schedule released")]
    pub title: Option<String>,
    #[schema(example = "Check the exams page for the detailed timetable.")]
    pub message: Option<String>,
    /// low | medium | high; defaults to medium.
    #[schema(example = "high", nullable = true)]
    pub priority: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/announcements",
    request_body = CreateAnnouncement,
    responses(
        (status = 200, description = "Announcement posted", body = Object,
         example = json!({"id": 1})),
        (status = 400, description = "Missing title/message or invalid priority"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
pub async fn create_announcement(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    payload: web::Json<CreateAnnouncement>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let id = service::announcement::create(
        store.get_ref(),
        &auth,
        payload.title,
        payload.message,
        payload.priority,
    )
    .await?;
    Ok(HttpResponse::Ok().json(json!({ "id": id })))
}

#[utoipa::path(
    get,
    path = "/api/v1/announcements",
    responses(
        (status = 200, description = "All announcements, newest first", body = [Announcement])
    ),
    security(("bearer_auth" = [])),
    tag = "Announcements"
)]
pub async fn list_announcements(
    _auth: AuthUser,
    store: web::Data<MySqlStore>,
) -> actix_web::Result<impl Responder> {
    let announcements = service::announcement::list(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(announcements))
}
