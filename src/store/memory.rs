//! In-memory store used by the service-layer tests. Mirrors the MySQL
//! implementation's observable behavior (id assignment, newest-first
//! ordering, one-way leave transitions).

use std::sync::Mutex;

use chrono::Utc;

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
use crate::store::{
    AnnouncementStore, ExamStore, LeaveStore, NewUser, NotificationStore, ProfileUpdate,
    RefreshTokenRow, StoreResult, TimetableStore, TokenStore, UpsertUser, UserStore,
};

#[derive(Default)]
struct Inner {
    users: Vec<UserProfile>,
    leaves: Vec<LeaveRequest>,
    notifications: Vec<Notification>,
    announcements: Vec<Announcement>,
    exams: Vec<ExamSchedule>,
    timetables: Vec<Timetable>,
    tokens: Vec<(RefreshTokenRow, String)>,
    next_id: u64,
}

impl Inner {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test fixture helper: registers a user directly and returns its uid.
    pub fn seed_user(
        &self,
        name: &str,
        email: &str,
        role: Role,
        department: Department,
        approved: bool,
    ) -> u64 {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        inner.users.push(UserProfile {
            id,
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            password: "argon2-hash".to_string(),
            role,
            department,
            erp_id: Some(format!("ERP{id:03}")),
            approved,
            created_at: Utc::now(),
            last_login_at: None,
        });
        id
    }

    pub fn notification_count(&self) -> usize {
        self.inner.lock().unwrap().notifications.len()
    }
}

impl UserStore for MemoryStore {
    async fn get_user(&self, uid: u64) -> StoreResult<Option<UserProfile>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.id == uid).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<UserProfile>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_faculty(&self) -> StoreResult<Vec<UserProfile>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .filter(|u| u.role == Role::Faculty)
            .cloned()
            .collect())
    }

    async fn list_pending_faculty(
        &self,
        department: Department,
    ) -> StoreResult<Vec<UserProfile>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .iter()
            .filter(|u| u.role == Role::Faculty && u.department == department && !u.approved)
            .cloned()
            .collect())
    }

    async fn put_user(&self, user: UpsertUser) -> StoreResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(existing) = inner.users.iter_mut().find(|u| u.email == user.email) {
            if let Some(name) = user.name {
                existing.name = name;
            }
            if let Some(phone) = user.phone {
                existing.phone = Some(phone);
            }
            if let Some(erp_id) = user.erp_id {
                existing.erp_id = Some(erp_id);
            }
            existing.password = user.password;
            existing.role = user.role;
            existing.department = user.department;
            existing.approved = user.approved;
            return Ok(existing.id);
        }

        let id = inner.next_id();
        inner.users.push(UserProfile {
            id,
            name: user.name.unwrap_or_default(),
            email: user.email,
            phone: user.phone,
            password: user.password,
            role: user.role,
            department: user.department,
            erp_id: user.erp_id,
            approved: user.approved,
            created_at: Utc::now(),
            last_login_at: None,
        });
        Ok(id)
    }

    async fn put_new_user(&self, user: NewUser) -> StoreResult<Option<u64>> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.iter().any(|u| u.email == user.email) {
            return Ok(None);
        }
        let id = inner.next_id();
        inner.users.push(UserProfile {
            id,
            name: user.name,
            email: user.email,
            phone: Some(user.phone),
            password: user.password,
            role: Role::Faculty,
            department: user.department,
            erp_id: Some(user.erp_id),
            approved: false,
            created_at: Utc::now(),
            last_login_at: None,
        });
        Ok(Some(id))
    }

    async fn put_approval(&self, uid: u64, department: Department) -> StoreResult<bool> {
        let mut inner = self.inner.lock().unwrap();
        match inner.users.iter_mut().find(|u| u.id == uid) {
            Some(user) => {
                user.approved = true;
                user.role = Role::Faculty;
                user.department = department;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn put_profile(&self, uid: u64, update: ProfileUpdate) -> StoreResult<bool> {
        if update.name.is_none() && update.phone.is_none() {
            return Ok(false);
        }
        let mut inner = self.inner.lock().unwrap();
        match inner.users.iter_mut().find(|u| u.id == uid) {
            Some(user) => {
                if let Some(name) = update.name {
                    user.name = name;
                }
                if let Some(phone) = update.phone {
                    user.phone = Some(phone);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn put_last_login(&self, uid: u64) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(user) = inner.users.iter_mut().find(|u| u.id == uid) {
            user.last_login_at = Some(Utc::now());
        }
        Ok(())
    }
}

impl TokenStore for MemoryStore {
    async fn put_refresh_token(
        &self,
        user_id: u64,
        jti: &str,
        _expires_at: i64,
    ) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        inner.tokens.push((
            RefreshTokenRow {
                id,
                user_id,
                revoked: false,
            },
            jti.to_string(),
        ));
        Ok(())
    }

    async fn get_refresh_token(&self, jti: &str) -> StoreResult<Option<RefreshTokenRow>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tokens
            .iter()
            .find(|(_, j)| j == jti)
            .map(|(row, _)| row.clone()))
    }

    async fn put_revoked(&self, jti: &str) -> StoreResult<()> {
        let mut inner = self.inner.lock().unwrap();
        if let Some((row, _)) = inner.tokens.iter_mut().find(|(_, j)| j == jti) {
            row.revoked = true;
        }
        Ok(())
    }
}

impl LeaveStore for MemoryStore {
    async fn put_leave(&self, new: NewLeaveRequest) -> StoreResult<LeaveRequest> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        let request = LeaveRequest {
            id,
            faculty_email: new.faculty_email,
            faculty_name: new.faculty_name,
            faculty_erp_id: new.faculty_erp_id,
            department: new.department,
            reason: new.reason,
            from_date: new.from_date,
            to_date: new.to_date,
            status: LeaveStatus::Pending,
            created_at: Utc::now(),
        };
        inner.leaves.push(request.clone());
        Ok(request)
    }

    async fn get_leave(&self, id: u64) -> StoreResult<Option<LeaveRequest>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.leaves.iter().find(|l| l.id == id).cloned())
    }

    async fn list_leaves_by_department(
        &self,
        department: Department,
    ) -> StoreResult<Vec<LeaveRequest>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<_> = inner
            .leaves
            .iter()
            .filter(|l| l.department == department)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_leaves_by_requester(&self, email: &str) -> StoreResult<Vec<LeaveRequest>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<_> = inner
            .leaves
            .iter()
            .filter(|l| l.faculty_email == email)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn put_leave_status(&self, id: u64, status: LeaveStatus) -> StoreResult<bool> {
        let mut inner = self.inner.lock().unwrap();
        match inner
            .leaves
            .iter_mut()
            .find(|l| l.id == id && l.status == LeaveStatus::Pending)
        {
            Some(leave) => {
                leave.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl NotificationStore for MemoryStore {
    async fn put_notification(&self, new: NewNotification) -> StoreResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        inner.notifications.push(Notification {
            id,
            to_role: new.to_role,
            to_department: new.to_department,
            to_email: new.to_email,
            message: new.message,
            read: false,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn get_notification(&self, id: u64) -> StoreResult<Option<Notification>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.notifications.iter().find(|n| n.id == id).cloned())
    }

    async fn list_notifications_for_admin(
        &self,
        department: Department,
    ) -> StoreResult<Vec<Notification>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<_> = inner
            .notifications
            .iter()
            .filter(|n| n.to_role == Role::Admin && n.to_department == department)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_notifications_for_faculty(
        &self,
        email: &str,
    ) -> StoreResult<Vec<Notification>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<_> = inner
            .notifications
            .iter()
            .filter(|n| n.to_role == Role::Faculty && n.to_email.as_deref() == Some(email))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn put_notification_read(&self, id: u64) -> StoreResult<bool> {
        let mut inner = self.inner.lock().unwrap();
        match inner.notifications.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn put_all_read_for_faculty(&self, email: &str) -> StoreResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        let mut flipped = 0;
        for n in inner
            .notifications
            .iter_mut()
            .filter(|n| n.to_role == Role::Faculty && n.to_email.as_deref() == Some(email) && !n.read)
        {
            n.read = true;
            flipped += 1;
        }
        Ok(flipped)
    }
}

impl AnnouncementStore for MemoryStore {
    async fn put_announcement(&self, new: NewAnnouncement) -> StoreResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        inner.announcements.push(Announcement {
            id,
            title: new.title,
            message: new.message,
            priority: new.priority,
            created_by: new.created_by,
            created_by_name: new.created_by_name,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_announcements(&self) -> StoreResult<Vec<Announcement>> {
        let inner = self.inner.lock().unwrap();
        let mut rows = inner.announcements.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

impl ExamStore for MemoryStore {
    async fn put_exam_schedule(&self, new: NewExamSchedule) -> StoreResult<u64> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_id();
        inner.exams.push(ExamSchedule {
            id,
            exam_type: new.exam_type,
            title: new.title,
            pdf_url: new.pdf_url,
            uploaded_by: new.uploaded_by,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_exam_schedules(
        &self,
        exam_type: Option<ExamType>,
    ) -> StoreResult<Vec<ExamSchedule>> {
        let inner = self.inner.lock().unwrap();
        let mut rows: Vec<_> = inner
            .exams
            .iter()
            .filter(|e| exam_type.is_none_or(|t| e.exam_type == t))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

impl TimetableStore for MemoryStore {
    async fn get_timetable(&self, faculty_email: &str) -> StoreResult<Option<Timetable>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .timetables
            .iter()
            .find(|t| t.faculty_email == faculty_email)
            .cloned())
    }

    async fn put_timetable(&self, faculty_email: &str, data: String) -> StoreResult<Timetable> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(t) = inner
            .timetables
            .iter_mut()
            .find(|t| t.faculty_email == faculty_email)
        {
            t.data = data;
            t.updated_at = Utc::now();
            return Ok(t.clone());
        }
        let id = inner.next_id();
        let timetable = Timetable {
            id,
            faculty_email: faculty_email.to_string(),
            data,
            updated_at: Utc::now(),
        };
        inner.timetables.push(timetable.clone());
        Ok(timetable)
    }
}
