use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::user::UserProfile;
use crate::store::{ProfileUpdate, UserStore};

pub async fn get_own<S: UserStore>(
    store: &S,
    caller: &AuthUser,
) -> Result<UserProfile, ApiError> {
    store
        .get_user(caller.user_id)
        .await
        .map_err(ApiError::from_store)?
        .ok_or_else(|| ApiError::not_found("User profile not found"))
}

/// Partial update limited to contact fields; role, department and the
/// approval flag only change through the admin operations.
pub async fn update_own<S: UserStore>(
    store: &S,
    caller: &AuthUser,
    name: Option<String>,
    phone: Option<String>,
) -> Result<UserProfile, ApiError> {
    if name.is_none() && phone.is_none() {
        return Err(ApiError::invalid_argument("No fields provided for update"));
    }

    let updated = store
        .put_profile(caller.user_id, ProfileUpdate { name, phone })
        .await
        .map_err(ApiError::from_store)?;
    if !updated {
        return Err(ApiError::not_found("User profile not found"));
    }

    get_own(store, caller).await
}
