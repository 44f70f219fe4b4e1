//! Repository layer. Every workflow talks to storage through these traits;
//! the MySQL implementation is the one wired into the running service, the
//! in-memory one exists for tests. Methods follow a get / list / put
//! capability shape; `put_*` covers create, upsert and state flips.

pub mod mysql;

#[cfg(test)]
pub mod memory;

use crate::model::{
    announcement::{Announcement, NewAnnouncement},
    department::Department,
    exam::{ExamSchedule, ExamType, NewExamSchedule},
    leave_request::{LeaveRequest, LeaveStatus, NewLeaveRequest},
    notification::{NewNotification, Notification},
    role::Role,
    timetable::Timetable,
    user::UserProfile,
};

pub type StoreResult<T> = anyhow::Result<T>;

/// Admin-provisioned account, keyed by email: updates the existing identity
/// instead of erroring when the email is already registered.
#[derive(Debug, Clone)]
pub struct UpsertUser {
    pub name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    /// argon2 hash, never the raw password.
    pub password: String,
    pub role: Role,
    pub department: Department,
    pub erp_id: Option<String>,
    pub approved: bool,
}

/// Self-signup payload; the insert fails (returns `None`) when the email is
/// already taken.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub erp_id: String,
    pub department: Department,
}

#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshTokenRow {
    pub id: u64,
    pub user_id: u64,
    pub revoked: bool,
}

pub trait UserStore {
    async fn get_user(&self, uid: u64) -> StoreResult<Option<UserProfile>>;
    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<UserProfile>>;
    async fn list_faculty(&self) -> StoreResult<Vec<UserProfile>>;
    async fn list_pending_faculty(&self, department: Department)
    -> StoreResult<Vec<UserProfile>>;
    /// Insert-or-update by email; returns the uid either way.
    async fn put_user(&self, user: UpsertUser) -> StoreResult<u64>;
    /// Plain insert; `None` when the email is already registered.
    async fn put_new_user(&self, user: NewUser) -> StoreResult<Option<u64>>;
    /// Marks a faculty account approved and reasserts role/department.
    /// `false` when the uid does not exist.
    async fn put_approval(&self, uid: u64, department: Department) -> StoreResult<bool>;
    async fn put_profile(&self, uid: u64, update: ProfileUpdate) -> StoreResult<bool>;
    async fn put_last_login(&self, uid: u64) -> StoreResult<()>;
}

pub trait TokenStore {
    async fn put_refresh_token(&self, user_id: u64, jti: &str, expires_at: i64)
    -> StoreResult<()>;
    async fn get_refresh_token(&self, jti: &str) -> StoreResult<Option<RefreshTokenRow>>;
    async fn put_revoked(&self, jti: &str) -> StoreResult<()>;
}

pub trait LeaveStore {
    async fn put_leave(&self, new: NewLeaveRequest) -> StoreResult<LeaveRequest>;
    async fn get_leave(&self, id: u64) -> StoreResult<Option<LeaveRequest>>;
    async fn list_leaves_by_department(
        &self,
        department: Department,
    ) -> StoreResult<Vec<LeaveRequest>>;
    async fn list_leaves_by_requester(&self, email: &str) -> StoreResult<Vec<LeaveRequest>>;
    /// One-way transition: only a pending request is updated. `false` when
    /// the id is unknown or the request was already resolved.
    async fn put_leave_status(&self, id: u64, status: LeaveStatus) -> StoreResult<bool>;
}

pub trait NotificationStore {
    async fn put_notification(&self, new: NewNotification) -> StoreResult<u64>;
    async fn get_notification(&self, id: u64) -> StoreResult<Option<Notification>>;
    async fn list_notifications_for_admin(
        &self,
        department: Department,
    ) -> StoreResult<Vec<Notification>>;
    async fn list_notifications_for_faculty(&self, email: &str)
    -> StoreResult<Vec<Notification>>;
    /// `false` when the id does not exist.
    async fn put_notification_read(&self, id: u64) -> StoreResult<bool>;
    /// Returns how many rows were flipped.
    async fn put_all_read_for_faculty(&self, email: &str) -> StoreResult<u64>;
}

pub trait AnnouncementStore {
    async fn put_announcement(&self, new: NewAnnouncement) -> StoreResult<u64>;
    async fn list_announcements(&self) -> StoreResult<Vec<Announcement>>;
}

pub trait ExamStore {
    async fn put_exam_schedule(&self, new: NewExamSchedule) -> StoreResult<u64>;
    async fn list_exam_schedules(
        &self,
        exam_type: Option<ExamType>,
    ) -> StoreResult<Vec<ExamSchedule>>;
}

pub trait TimetableStore {
    async fn get_timetable(&self, faculty_email: &str) -> StoreResult<Option<Timetable>>;
    async fn put_timetable(&self, faculty_email: &str, data: String) -> StoreResult<Timetable>;
}
