//! Notification delivery and read-state handling.

use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::{
    notification::{NewNotification, Notification},
    role::Role,
};
use crate::store::{NotificationStore, UserStore};

/// The caller's inbox: admins see department-wide admin notifications,
/// faculty see the ones pinned to their email.
pub async fn list_for_caller<S: NotificationStore>(
    store: &S,
    caller: &AuthUser,
) -> Result<Vec<Notification>, ApiError> {
    match caller.role {
        Role::Admin => store
            .list_notifications_for_admin(caller.department)
            .await
            .map_err(ApiError::from_store),
        Role::Faculty => store
            .list_notifications_for_faculty(&caller.email)
            .await
            .map_err(ApiError::from_store),
    }
}

/// Flip the read flag. The caller must be the notification's target: the
/// addressed person for pinned deliveries, a same-role same-department user
/// for department-wide ones.
pub async fn mark_read<S: NotificationStore>(
    store: &S,
    caller: &AuthUser,
    id: u64,
) -> Result<(), ApiError> {
    let notification = store
        .get_notification(id)
        .await
        .map_err(ApiError::from_store)?
        .ok_or_else(|| ApiError::not_found("Notification not found"))?;

    if notification.to_role != caller.role {
        return Err(ApiError::permission_denied(
            "Notification is addressed to a different role",
        ));
    }
    match &notification.to_email {
        Some(email) if *email != caller.email => {
            return Err(ApiError::permission_denied(
                "Notification is addressed to a different user",
            ));
        }
        None if notification.to_department != caller.department => {
            return Err(ApiError::permission_denied(
                "Notification is addressed to a different department",
            ));
        }
        _ => {}
    }

    store
        .put_notification_read(id)
        .await
        .map_err(ApiError::from_store)?;
    Ok(())
}

/// Mark every unread notification of the calling faculty member read.
pub async fn mark_all_read<S: NotificationStore>(
    store: &S,
    caller: &AuthUser,
) -> Result<u64, ApiError> {
    caller.require_faculty()?;
    store
        .put_all_read_for_faculty(&caller.email)
        .await
        .map_err(ApiError::from_store)
}

/// One notification per known faculty profile. Writes are sequential and not
/// atomic: a failure partway through leaves the earlier recipients notified.
pub async fn broadcast_to_all_faculty<S>(
    store: &S,
    caller: &AuthUser,
    message: Option<String>,
) -> Result<u64, ApiError>
where
    S: NotificationStore + UserStore,
{
    caller.require_admin()?;
    let message = match message.as_deref().map(str::trim) {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => return Err(ApiError::invalid_argument("Missing required parameter: message")),
    };

    let faculty = store.list_faculty().await.map_err(ApiError::from_store)?;

    let mut delivered = 0;
    for profile in faculty {
        store
            .put_notification(NewNotification {
                to_role: Role::Faculty,
                to_department: profile.department,
                to_email: Some(profile.email),
                message: message.clone(),
            })
            .await
            .map_err(ApiError::from_store)?;
        delivered += 1;
    }

    Ok(delivered)
}
