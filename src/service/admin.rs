//! Admin-only provisioning operations. Each one is idempotent on the target
//! email: an existing account is updated in place, never duplicated.
//!
//! Check order is fixed: authentication (handled by the extractor) -> role ->
//! required fields -> department membership -> store write.

use crate::auth::{auth::AuthUser, password::hash_password};
use crate::error::ApiError;
use crate::model::{department::Department, role::Role, user::UserProfile};
use crate::store::{UpsertUser, UserStore};

fn require_fields(fields: &[&Option<String>], message: &str) -> Result<(), ApiError> {
    if fields
        .iter()
        .any(|f| f.as_deref().map(str::trim).unwrap_or("").is_empty())
    {
        return Err(ApiError::invalid_argument(message));
    }
    Ok(())
}

/// Create (or take over) an admin account for a department.
pub async fn create_admin<S: UserStore>(
    store: &S,
    caller: &AuthUser,
    email: Option<String>,
    password: Option<String>,
    department: Option<String>,
    name: Option<String>,
) -> Result<u64, ApiError> {
    caller.require_admin()?;
    require_fields(
        &[&email, &password, &department],
        "Missing required parameters: email, password, department",
    )?;
    let department = Department::parse(department.as_deref().unwrap())?;

    let uid = store
        .put_user(UpsertUser {
            name,
            email: email.unwrap().trim().to_lowercase(),
            phone: None,
            password: hash_password(&password.unwrap()),
            role: Role::Admin,
            department,
            erp_id: None,
            approved: true,
        })
        .await
        .map_err(ApiError::from_store)?;

    Ok(uid)
}

/// Create (or take over) a faculty account. Lands unapproved either way.
pub async fn create_faculty<S: UserStore>(
    store: &S,
    caller: &AuthUser,
    email: Option<String>,
    password: Option<String>,
    department: Option<String>,
    name: Option<String>,
    erp_id: Option<String>,
) -> Result<u64, ApiError> {
    caller.require_admin()?;
    require_fields(
        &[&email, &password, &department, &name, &erp_id],
        "Missing required parameters: email, password, department, name, erpId",
    )?;
    let department = Department::parse(department.as_deref().unwrap())?;

    let uid = store
        .put_user(UpsertUser {
            name,
            email: email.unwrap().trim().to_lowercase(),
            phone: None,
            password: hash_password(&password.unwrap()),
            role: Role::Faculty,
            department,
            erp_id,
            approved: false,
        })
        .await
        .map_err(ApiError::from_store)?;

    Ok(uid)
}

/// Approve a pending faculty account, reasserting role and department.
pub async fn approve_faculty<S: UserStore>(
    store: &S,
    caller: &AuthUser,
    uid: Option<u64>,
    department: Option<String>,
) -> Result<u64, ApiError> {
    caller.require_admin()?;
    let uid = uid.ok_or_else(|| {
        ApiError::invalid_argument("Missing required parameters: uid, department")
    })?;
    require_fields(
        &[&department],
        "Missing required parameters: uid, department",
    )?;
    let department = Department::parse(department.as_deref().unwrap())?;

    let updated = store
        .put_approval(uid, department)
        .await
        .map_err(ApiError::from_store)?;
    if !updated {
        return Err(ApiError::not_found("User not found"));
    }

    Ok(uid)
}

/// Unapproved faculty of the caller's own department.
pub async fn list_pending_faculty<S: UserStore>(
    store: &S,
    caller: &AuthUser,
) -> Result<Vec<UserProfile>, ApiError> {
    caller.require_admin()?;
    store
        .list_pending_faculty(caller.department)
        .await
        .map_err(ApiError::from_store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn admin() -> AuthUser {
        AuthUser::test(Role::Admin, Department::Cse, true)
    }

    fn faculty() -> AuthUser {
        AuthUser::test(Role::Faculty, Department::Cse, true)
    }

    #[actix_web::test]
    async fn non_admin_cannot_provision_and_nothing_is_written() {
        let store = MemoryStore::new();

        let err = create_faculty(
            &store,
            &faculty(),
            Some("new@edusync.com".into()),
            Some("pw".into()),
            Some("CSE".into()),
            Some("New Person".into()),
            Some("ERP100".into()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::PermissionDenied(_)));
        assert!(store.get_user_by_email("new@edusync.com").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn invalid_department_is_rejected_with_allowed_set() {
        let store = MemoryStore::new();

        let err = create_admin(
            &store,
            &admin(),
            Some("hod.mech@edusync.com".into()),
            Some("pw".into()),
            Some("MECH".into()),
            None,
        )
        .await
        .unwrap_err();

        match err {
            ApiError::InvalidArgument(msg) => {
                assert!(msg.contains("CSE, CSE_AIML, CSE_AIDS, CSE_DS, ECE, HS"))
            }
            other => panic!("expected invalid-argument, got {:?}", other),
        }
        assert!(
            store
                .get_user_by_email("hod.mech@edusync.com")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[actix_web::test]
    async fn missing_fields_are_rejected() {
        let store = MemoryStore::new();

        let err = create_faculty(
            &store,
            &admin(),
            Some("x@edusync.com".into()),
            None,
            Some("CSE".into()),
            Some("X".into()),
            Some("ERP1".into()),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::InvalidArgument(_)));
    }

    #[actix_web::test]
    async fn faculty_creation_is_idempotent_on_email() {
        let store = MemoryStore::new();

        let first = create_faculty(
            &store,
            &admin(),
            Some("f@edusync.com".into()),
            Some("pw1".into()),
            Some("CSE".into()),
            Some("Dr. One".into()),
            Some("ERP001".into()),
        )
        .await
        .unwrap();

        let second = create_faculty(
            &store,
            &admin(),
            Some("f@edusync.com".into()),
            Some("pw2".into()),
            Some("ECE".into()),
            Some("Dr. One Renamed".into()),
            Some("ERP001".into()),
        )
        .await
        .unwrap();

        assert_eq!(first, second);
        let user = store
            .get_user_by_email("f@edusync.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.name, "Dr. One Renamed");
        assert_eq!(user.department, Department::Ece);
        assert!(!user.approved);
    }

    #[actix_web::test]
    async fn approval_flips_the_flag_and_unknown_uid_is_not_found() {
        let store = MemoryStore::new();
        let uid = store.seed_user(
            "Dr. Pending",
            "pending@edusync.com",
            Role::Faculty,
            Department::Cse,
            false,
        );

        approve_faculty(&store, &admin(), Some(uid), Some("CSE".into()))
            .await
            .unwrap();
        let user = store.get_user(uid).await.unwrap().unwrap();
        assert!(user.approved);

        let err = approve_faculty(&store, &admin(), Some(9999), Some("CSE".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[actix_web::test]
    async fn pending_list_is_scoped_to_the_admins_department() {
        let store = MemoryStore::new();
        store.seed_user("A", "a@edusync.com", Role::Faculty, Department::Cse, false);
        store.seed_user("B", "b@edusync.com", Role::Faculty, Department::Ece, false);
        store.seed_user("C", "c@edusync.com", Role::Faculty, Department::Cse, true);

        let pending = list_pending_faculty(&store, &admin()).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].email, "a@edusync.com");
    }
}
