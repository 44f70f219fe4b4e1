use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::auth::auth::AuthUser;
use crate::model::exam::ExamSchedule;
use crate::service;
use crate::store::mysql::MySqlStore;

#[derive(Deserialize, ToSchema)]
pub struct CreateExamSchedule {
    /// mids | lab_internals | semester | placements
    #[schema(example = "mids")]
    #[serde(rename = "examType")]
    pub exam_type: Option<String>,
    #[schema(example = "Mid-term examinations, August 2026")]
    pub title: Option<String>,
    #[schema(example = "https://storage.example.com/exams/mids-aug-2026.pdf")]
    #[serde(rename = "pdfUrl")]
    pub pdf_url: Option<String>,
}

#[derive(Deserialize, IntoParams)]
pub struct ExamFilter {
    /// Optional exam type to filter by.
    pub exam_type: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/exams",
    request_body = CreateExamSchedule,
    responses(
        (status = 200, description = "Schedule registered", body = Object,
         example = json!({"id": 1})),
        (status = 400, description = "Missing field or unknown exam type"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
pub async fn create_exam_schedule(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    payload: web::Json<CreateExamSchedule>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let id = service::exam::create(
        store.get_ref(),
        &auth,
        payload.exam_type,
        payload.title,
        payload.pdf_url,
    )
    .await?;
    Ok(HttpResponse::Ok().json(json!({ "id": id })))
}

/// Browse exam schedules, optionally filtered by type.
#[utoipa::path(
    get,
    path = "/api/v1/exams",
    params(ExamFilter),
    responses(
        (status = 200, description = "Schedules, newest first", body = [ExamSchedule]),
        (status = 400, description = "Unknown exam type")
    ),
    security(("bearer_auth" = [])),
    tag = "Exams"
)]
pub async fn list_exam_schedules(
    _auth: AuthUser,
    store: web::Data<MySqlStore>,
    query: web::Query<ExamFilter>,
) -> actix_web::Result<impl Responder> {
    let schedules =
        service::exam::list(store.get_ref(), query.into_inner().exam_type).await?;
    Ok(HttpResponse::Ok().json(schedules))
}
