use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::announcement::{Announcement, NewAnnouncement, Priority};
use crate::store::{AnnouncementStore, UserStore};

pub async fn create<S>(
    store: &S,
    caller: &AuthUser,
    title: Option<String>,
    message: Option<String>,
    priority: Option<String>,
) -> Result<u64, ApiError>
where
    S: AnnouncementStore + UserStore,
{
    caller.require_admin()?;

    let title = match title.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => {
            return Err(ApiError::invalid_argument(
                "Missing required parameters: title, message",
            ));
        }
    };
    let message = match message.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => {
            return Err(ApiError::invalid_argument(
                "Missing required parameters: title, message",
            ));
        }
    };
    let priority = match priority.as_deref() {
        None => Priority::Medium,
        Some(p) => p.parse::<Priority>().map_err(|_| {
            ApiError::invalid_argument("Invalid priority. Must be one of: low, medium, high")
        })?,
    };

    let author_name = store
        .get_user(caller.user_id)
        .await
        .map_err(ApiError::from_store)?
        .map(|u| u.name)
        .unwrap_or_else(|| caller.email.clone());

    store
        .put_announcement(NewAnnouncement {
            title,
            message,
            priority,
            created_by: caller.email.clone(),
            created_by_name: author_name,
        })
        .await
        .map_err(ApiError::from_store)
}

pub async fn list<S: AnnouncementStore>(store: &S) -> Result<Vec<Announcement>, ApiError> {
    store.list_announcements().await.map_err(ApiError::from_store)
}
