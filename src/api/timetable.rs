use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::model::timetable::Timetable;
use crate::service;
use crate::store::mysql::MySqlStore;

#[derive(Deserialize, ToSchema)]
pub struct PutTimetable {
    /// Free-form weekly schedule; stored verbatim.
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
}

#[utoipa::path(
    get,
    path = "/api/v1/timetable",
    responses(
        (status = 200, description = "The caller's timetable", body = Timetable),
        (status = 403, description = "Caller is not faculty"),
        (status = 404, description = "No timetable uploaded yet")
    ),
    security(("bearer_auth" = [])),
    tag = "Timetable"
)]
pub async fn get_timetable(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
) -> actix_web::Result<impl Responder> {
    let timetable = service::timetable::get_own(store.get_ref(), &auth).await?;
    Ok(HttpResponse::Ok().json(timetable))
}

#[utoipa::path(
    put,
    path = "/api/v1/timetable",
    request_body = PutTimetable,
    responses(
        (status = 200, description = "Timetable stored", body = Timetable),
        (status = 403, description = "Caller is not faculty")
    ),
    security(("bearer_auth" = [])),
    tag = "Timetable"
)]
pub async fn put_timetable(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    payload: web::Json<PutTimetable>,
) -> actix_web::Result<impl Responder> {
    let timetable =
        service::timetable::put_own(store.get_ref(), &auth, payload.into_inner().data).await?;
    Ok(HttpResponse::Ok().json(timetable))
}
