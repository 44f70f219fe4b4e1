use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::timetable::Timetable;
use crate::store::TimetableStore;

pub async fn get_own<S: TimetableStore>(
    store: &S,
    caller: &AuthUser,
) -> Result<Timetable, ApiError> {
    caller.require_faculty()?;
    store
        .get_timetable(&caller.email)
        .await
        .map_err(ApiError::from_store)?
        .ok_or_else(|| ApiError::not_found("No timetable uploaded yet"))
}

/// Upsert the caller's timetable. The schedule is free-form JSON; it is
/// stored verbatim and echoed back on reads.
pub async fn put_own<S: TimetableStore>(
    store: &S,
    caller: &AuthUser,
    data: serde_json::Value,
) -> Result<Timetable, ApiError> {
    caller.require_faculty()?;
    if data.is_null() {
        return Err(ApiError::invalid_argument("Missing required parameter: data"));
    }
    store
        .put_timetable(&caller.email, data.to_string())
        .await
        .map_err(ApiError::from_store)
}
