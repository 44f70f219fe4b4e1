use actix_web::{HttpResponse, Responder, web};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::auth::auth::AuthUser;
use crate::model::user::ProfileResponse;
use crate::service;
use crate::store::mysql::MySqlStore;

#[derive(Deserialize, ToSchema)]
pub struct UpdateProfile {
    #[schema(example = "Dr. R. Kumar", nullable = true)]
    pub name: Option<String>,
    #[schema(example = "+919876543999", nullable = true)]
    pub phone: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/profile",
    responses(
        (status = 200, description = "The caller's profile", body = ProfileResponse),
        (status = 404, description = "Profile record missing")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn get_profile(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
) -> actix_web::Result<impl Responder> {
    let profile = service::profile::get_own(store.get_ref(), &auth).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(profile)))
}

/// Contact-field updates only; role and department never change here.
#[utoipa::path(
    put,
    path = "/api/v1/profile",
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Updated profile", body = ProfileResponse),
        (status = 400, description = "No fields provided"),
        (status = 404, description = "Profile record missing")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn update_profile(
    auth: AuthUser,
    store: web::Data<MySqlStore>,
    payload: web::Json<UpdateProfile>,
) -> actix_web::Result<impl Responder> {
    let payload = payload.into_inner();
    let profile =
        service::profile::update_own(store.get_ref(), &auth, payload.name, payload.phone).await?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(profile)))
}
