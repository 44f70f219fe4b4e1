//! Leave workflow: submission by faculty, department-scoped review by the
//! HOD, with notification fanout on both sides.

use chrono::NaiveDate;

use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::{
    leave_request::{LeaveDecision, LeaveRequest, LeaveStatus, NewLeaveRequest},
    notification::NewNotification,
    role::Role,
};
use crate::store::{LeaveStore, NotificationStore, UserStore};

/// File a new leave request. Creates the pending record, then notifies the
/// department's admins; the two writes are not atomic (a crash in between
/// leaves a request without its notification).
pub async fn submit<S>(
    store: &S,
    caller: &AuthUser,
    reason: &str,
    from_date: NaiveDate,
    to_date: NaiveDate,
) -> Result<LeaveRequest, ApiError>
where
    S: LeaveStore + NotificationStore + UserStore,
{
    caller.require_approved_faculty()?;

    if reason.trim().is_empty() {
        return Err(ApiError::invalid_argument("Reason must not be empty"));
    }
    if from_date > to_date {
        return Err(ApiError::invalid_argument(
            "fromDate cannot be after toDate",
        ));
    }

    let profile = store
        .get_user_by_email(&caller.email)
        .await
        .map_err(ApiError::from_store)?
        .ok_or_else(|| ApiError::not_found("User profile not found"))?;

    let erp_id = profile.erp_id.unwrap_or_else(|| "N/A".to_string());
    let request = store
        .put_leave(NewLeaveRequest {
            faculty_email: profile.email,
            faculty_name: profile.name.clone(),
            faculty_erp_id: erp_id.clone(),
            department: caller.department,
            reason: reason.trim().to_string(),
            from_date,
            to_date,
        })
        .await
        .map_err(ApiError::from_store)?;

    store
        .put_notification(NewNotification {
            to_role: Role::Admin,
            to_department: caller.department,
            to_email: None,
            message: format!(
                "New leave request from {} ({}) from {} to {}",
                profile.name, erp_id, from_date, to_date
            ),
        })
        .await
        .map_err(ApiError::from_store)?;

    Ok(request)
}

/// Every request of the admin's own department, newest first.
pub async fn list_for_department<S: LeaveStore>(
    store: &S,
    caller: &AuthUser,
) -> Result<Vec<LeaveRequest>, ApiError> {
    caller.require_admin()?;
    store
        .list_leaves_by_department(caller.department)
        .await
        .map_err(ApiError::from_store)
}

/// The caller's own requests, newest first.
pub async fn list_own<S: LeaveStore>(
    store: &S,
    caller: &AuthUser,
) -> Result<Vec<LeaveRequest>, ApiError> {
    caller.require_faculty()?;
    store
        .list_leaves_by_requester(&caller.email)
        .await
        .map_err(ApiError::from_store)
}

pub async fn get<S: LeaveStore>(
    store: &S,
    caller: &AuthUser,
    id: u64,
) -> Result<LeaveRequest, ApiError> {
    caller.require_admin()?;
    let request = store
        .get_leave(id)
        .await
        .map_err(ApiError::from_store)?
        .ok_or_else(|| ApiError::not_found("Leave request not found"))?;
    caller.require_admin_of(request.department)?;
    Ok(request)
}

/// Resolve a pending request. The transition is one-way: an already-resolved
/// request cannot be decided again.
pub async fn decide<S>(
    store: &S,
    caller: &AuthUser,
    id: u64,
    decision: LeaveDecision,
) -> Result<LeaveStatus, ApiError>
where
    S: LeaveStore + NotificationStore,
{
    caller.require_admin()?;

    let request = store
        .get_leave(id)
        .await
        .map_err(ApiError::from_store)?
        .ok_or_else(|| ApiError::not_found("Leave request not found"))?;

    caller.require_admin_of(request.department)?;

    let status: LeaveStatus = decision.into();
    let updated = store
        .put_leave_status(id, status)
        .await
        .map_err(ApiError::from_store)?;
    if !updated {
        return Err(ApiError::invalid_argument(
            "Leave request not found or already processed",
        ));
    }

    let verb = match decision {
        LeaveDecision::Approved => "approved",
        LeaveDecision::Rejected => "rejected",
    };
    store
        .put_notification(NewNotification {
            to_role: Role::Faculty,
            to_department: request.department,
            to_email: Some(request.faculty_email),
            message: format!(
                "Your leave request has been {} by HOD ({})",
                verb, request.department
            ),
        })
        .await
        .map_err(ApiError::from_store)?;

    Ok(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::department::Department;
    use crate::store::memory::MemoryStore;

    fn requester() -> AuthUser {
        AuthUser::test_with_email("faculty1@edusync.com", Role::Faculty, Department::Cse, true)
    }

    fn cse_admin() -> AuthUser {
        AuthUser::test_with_email("hod.cse@edusync.com", Role::Admin, Department::Cse, true)
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn store_with_requester() -> MemoryStore {
        let store = MemoryStore::new();
        store.seed_user(
            "Dr. Ramesh Kumar",
            "faculty1@edusync.com",
            Role::Faculty,
            Department::Cse,
            true,
        );
        store
    }

    #[actix_web::test]
    async fn inverted_date_range_is_rejected_before_any_write() {
        let store = store_with_requester();

        let err = submit(
            &store,
            &requester(),
            "Medical leave",
            date("2026-08-12"),
            date("2026-08-10"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::InvalidArgument(_)));
        assert!(
            store
                .list_leaves_by_requester("faculty1@edusync.com")
                .await
                .unwrap()
                .is_empty()
        );
        assert_eq!(store.notification_count(), 0);
    }

    #[actix_web::test]
    async fn admins_cannot_submit_leave() {
        let store = store_with_requester();
        let err = submit(
            &store,
            &cse_admin(),
            "Vacation",
            date("2026-08-10"),
            date("2026-08-12"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::PermissionDenied(_)));
    }

    #[actix_web::test]
    async fn unapproved_faculty_cannot_submit_leave() {
        let store = MemoryStore::new();
        store.seed_user(
            "Dr. Pending",
            "pending@edusync.com",
            Role::Faculty,
            Department::Cse,
            false,
        );
        let caller = AuthUser::test_with_email(
            "pending@edusync.com",
            Role::Faculty,
            Department::Cse,
            false,
        );

        let err = submit(&store, &caller, "Leave", date("2026-08-10"), date("2026-08-12"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::PermissionDenied(_)));
    }

    #[actix_web::test]
    async fn submission_creates_pending_request_and_notifies_the_hod() {
        let store = store_with_requester();

        let request = submit(
            &store,
            &requester(),
            "Medical leave",
            date("2026-08-10"),
            date("2026-08-12"),
        )
        .await
        .unwrap();

        assert_eq!(request.status, LeaveStatus::Pending);
        assert_eq!(request.department, Department::Cse);

        let inbox = store
            .list_notifications_for_admin(Department::Cse)
            .await
            .unwrap();
        assert_eq!(inbox.len(), 1);
        assert!(inbox[0].message.contains("New leave request from Dr. Ramesh Kumar"));
        assert!(!inbox[0].read);
    }

    #[actix_web::test]
    async fn approval_round_trip_preserves_request_fields() {
        let store = store_with_requester();
        let request = submit(
            &store,
            &requester(),
            "Conference travel",
            date("2026-09-01"),
            date("2026-09-03"),
        )
        .await
        .unwrap();

        let status = decide(&store, &cse_admin(), request.id, LeaveDecision::Approved)
            .await
            .unwrap();
        assert_eq!(status, LeaveStatus::Approved);

        let stored = store.get_leave(request.id).await.unwrap().unwrap();
        assert_eq!(stored.status, LeaveStatus::Approved);
        assert_eq!(stored.reason, "Conference travel");
        assert_eq!(stored.from_date, date("2026-09-01"));
        assert_eq!(stored.to_date, date("2026-09-03"));
        assert_eq!(stored.faculty_email, "faculty1@edusync.com");

        let inbox = store
            .list_notifications_for_faculty("faculty1@edusync.com")
            .await
            .unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(
            inbox[0].message,
            "Your leave request has been approved by HOD (CSE)"
        );
    }

    #[actix_web::test]
    async fn cross_department_decision_is_denied_and_request_stays_pending() {
        let store = store_with_requester();
        let request = submit(
            &store,
            &requester(),
            "Medical leave",
            date("2026-08-10"),
            date("2026-08-12"),
        )
        .await
        .unwrap();

        let ece_admin =
            AuthUser::test_with_email("hod.ece@edusync.com", Role::Admin, Department::Ece, true);
        let err = decide(&store, &ece_admin, request.id, LeaveDecision::Approved)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::PermissionDenied(_)));
        let stored = store.get_leave(request.id).await.unwrap().unwrap();
        assert_eq!(stored.status, LeaveStatus::Pending);
    }

    #[actix_web::test]
    async fn resolved_request_cannot_be_decided_again() {
        let store = store_with_requester();
        let request = submit(
            &store,
            &requester(),
            "Medical leave",
            date("2026-08-10"),
            date("2026-08-12"),
        )
        .await
        .unwrap();

        decide(&store, &cse_admin(), request.id, LeaveDecision::Rejected)
            .await
            .unwrap();
        let err = decide(&store, &cse_admin(), request.id, LeaveDecision::Approved)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::InvalidArgument(_)));
        let stored = store.get_leave(request.id).await.unwrap().unwrap();
        assert_eq!(stored.status, LeaveStatus::Rejected);
    }

    #[actix_web::test]
    async fn deciding_an_unknown_request_is_not_found() {
        let store = store_with_requester();
        let err = decide(&store, &cse_admin(), 404, LeaveDecision::Approved)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[actix_web::test]
    async fn listings_are_scoped() {
        let store = store_with_requester();
        store.seed_user(
            "Dr. Anitha Rao",
            "faculty4@edusync.com",
            Role::Faculty,
            Department::Ece,
            true,
        );
        let ece_requester =
            AuthUser::test_with_email("faculty4@edusync.com", Role::Faculty, Department::Ece, true);

        submit(&store, &requester(), "A", date("2026-08-10"), date("2026-08-11"))
            .await
            .unwrap();
        submit(&store, &ece_requester, "B", date("2026-08-10"), date("2026-08-11"))
            .await
            .unwrap();

        let cse_view = list_for_department(&store, &cse_admin()).await.unwrap();
        assert_eq!(cse_view.len(), 1);
        assert_eq!(cse_view[0].department, Department::Cse);

        let own = list_own(&store, &ece_requester).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].reason, "B");
    }
}
