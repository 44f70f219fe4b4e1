use anyhow::anyhow;
use sqlx::MySqlPool;

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

const USER_COLUMNS: &str = "id, name, email, phone, password, role, department, erp_id, \
     approved, created_at, last_login_at";

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

impl UserStore for MySqlStore {
    async fn get_user(&self, uid: u64) -> StoreResult<Option<UserProfile>> {
        let user = sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(uid)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> StoreResult<Option<UserProfile>> {
        let user = sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn list_faculty(&self) -> StoreResult<Vec<UserProfile>> {
        let rows = sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE role = ? ORDER BY created_at DESC"
        ))
        .bind(Role::Faculty)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_pending_faculty(
        &self,
        department: Department,
    ) -> StoreResult<Vec<UserProfile>> {
        let rows = sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE role = ? AND department = ? AND approved = FALSE \
             ORDER BY created_at DESC"
        ))
        .bind(Role::Faculty)
        .bind(department)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn put_user(&self, user: UpsertUser) -> StoreResult<u64> {
        // Same update-or-create flow the identity provider used; the two
        // statements are not transactional, a concurrent create can still
        // race on the unique email index.
        let existing = sqlx::query_scalar::<_, u64>("SELECT id FROM users WHERE email = ?")
            .bind(&user.email)
            .fetch_optional(&self.pool)
            .await?;

        match existing {
            Some(uid) => {
                sqlx::query(
                    r#"
                    UPDATE users
                    SET name = COALESCE(?, name),
                        phone = COALESCE(?, phone),
                        password = ?,
                        role = ?,
                        department = ?,
                        erp_id = COALESCE(?, erp_id),
                        approved = ?
                    WHERE id = ?
                    "#,
                )
                .bind(&user.name)
                .bind(&user.phone)
                .bind(&user.password)
                .bind(user.role)
                .bind(user.department)
                .bind(&user.erp_id)
                .bind(user.approved)
                .bind(uid)
                .execute(&self.pool)
                .await?;
                Ok(uid)
            }
            None => {
                let result = sqlx::query(
                    r#"
                    INSERT INTO users
                        (name, email, phone, password, role, department, erp_id, approved)
                    VALUES (COALESCE(?, ''), ?, ?, ?, ?, ?, ?, ?)
                    "#,
                )
                .bind(&user.name)
                .bind(&user.email)
                .bind(&user.phone)
                .bind(&user.password)
                .bind(user.role)
                .bind(user.department)
                .bind(&user.erp_id)
                .bind(user.approved)
                .execute(&self.pool)
                .await?;
                Ok(result.last_insert_id())
            }
        }
    }

    async fn put_new_user(&self, user: NewUser) -> StoreResult<Option<u64>> {
        let result = sqlx::query(
            r#"
            INSERT INTO users
                (name, email, phone, password, role, department, erp_id, approved)
            VALUES (?, ?, ?, ?, ?, ?, ?, FALSE)
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.password)
        .bind(Role::Faculty)
        .bind(user.department)
        .bind(&user.erp_id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(r) => Ok(Some(r.last_insert_id())),
            Err(e) => {
                if let sqlx::Error::Database(db_err) = &e {
                    // duplicate email
                    if db_err.code().as_deref() == Some("23000") {
                        return Ok(None);
                    }
                }
                Err(e.into())
            }
        }
    }

    async fn put_approval(&self, uid: u64, department: Department) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE users SET approved = TRUE, role = ?, department = ? WHERE id = ?",
        )
        .bind(Role::Faculty)
        .bind(department)
        .bind(uid)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn put_profile(&self, uid: u64, update: ProfileUpdate) -> StoreResult<bool> {
        let mut sets = Vec::new();
        let mut values = Vec::new();

        if let Some(name) = update.name {
            sets.push("name = ?");
            values.push(name);
        }
        if let Some(phone) = update.phone {
            sets.push("phone = ?");
            values.push(phone);
        }
        if sets.is_empty() {
            return Ok(false);
        }

        let sql = format!("UPDATE users SET {} WHERE id = ?", sets.join(", "));
        let mut query = sqlx::query(&sql);
        for value in values {
            query = query.bind(value);
        }
        let result = query.bind(uid).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn put_last_login(&self, uid: u64) -> StoreResult<()> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = ?")
            .bind(uid)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

impl TokenStore for MySqlStore {
    async fn put_refresh_token(
        &self,
        user_id: u64,
        jti: &str,
        expires_at: i64,
    ) -> StoreResult<()> {
        sqlx::query(
            "INSERT INTO refresh_tokens (user_id, jti, expires_at) VALUES (?, ?, FROM_UNIXTIME(?))",
        )
        .bind(user_id)
        .bind(jti)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_refresh_token(&self, jti: &str) -> StoreResult<Option<RefreshTokenRow>> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            "SELECT id, user_id, revoked FROM refresh_tokens WHERE jti = ?",
        )
        .bind(jti)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn put_revoked(&self, jti: &str) -> StoreResult<()> {
        sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE jti = ?")
            .bind(jti)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

impl LeaveStore for MySqlStore {
    async fn put_leave(&self, new: NewLeaveRequest) -> StoreResult<LeaveRequest> {
        let result = sqlx::query(
            r#"
            INSERT INTO leave_requests
                (faculty_email, faculty_name, faculty_erp_id, department,
                 reason, from_date, to_date, status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.faculty_email)
        .bind(&new.faculty_name)
        .bind(&new.faculty_erp_id)
        .bind(new.department)
        .bind(&new.reason)
        .bind(new.from_date)
        .bind(new.to_date)
        .bind(LeaveStatus::Pending)
        .execute(&self.pool)
        .await?;

        self.get_leave(result.last_insert_id())
            .await?
            .ok_or_else(|| anyhow!("inserted leave request not readable back"))
    }

    async fn get_leave(&self, id: u64) -> StoreResult<Option<LeaveRequest>> {
        let row = sqlx::query_as::<_, LeaveRequest>(
            r#"
            SELECT id, faculty_email, faculty_name, faculty_erp_id, department,
                   reason, from_date, to_date, status, created_at
            FROM leave_requests
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_leaves_by_department(
        &self,
        department: Department,
    ) -> StoreResult<Vec<LeaveRequest>> {
        let rows = sqlx::query_as::<_, LeaveRequest>(
            r#"
            SELECT id, faculty_email, faculty_name, faculty_erp_id, department,
                   reason, from_date, to_date, status, created_at
            FROM leave_requests
            WHERE department = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(department)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_leaves_by_requester(&self, email: &str) -> StoreResult<Vec<LeaveRequest>> {
        let rows = sqlx::query_as::<_, LeaveRequest>(
            r#"
            SELECT id, faculty_email, faculty_name, faculty_erp_id, department,
                   reason, from_date, to_date, status, created_at
            FROM leave_requests
            WHERE faculty_email = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn put_leave_status(&self, id: u64, status: LeaveStatus) -> StoreResult<bool> {
        let result = sqlx::query(
            "UPDATE leave_requests SET status = ? WHERE id = ? AND status = 'pending'",
        )
        .bind(status)
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl NotificationStore for MySqlStore {
    async fn put_notification(&self, new: NewNotification) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO notifications (to_role, to_department, to_email, message, is_read)
            VALUES (?, ?, ?, ?, FALSE)
            "#,
        )
        .bind(new.to_role)
        .bind(new.to_department)
        .bind(&new.to_email)
        .bind(&new.message)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_id())
    }

    async fn get_notification(&self, id: u64) -> StoreResult<Option<Notification>> {
        let row = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, to_role, to_department, to_email, message, is_read, created_at
            FROM notifications
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_notifications_for_admin(
        &self,
        department: Department,
    ) -> StoreResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, to_role, to_department, to_email, message, is_read, created_at
            FROM notifications
            WHERE to_role = ? AND to_department = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(Role::Admin)
        .bind(department)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_notifications_for_faculty(
        &self,
        email: &str,
    ) -> StoreResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, to_role, to_department, to_email, message, is_read, created_at
            FROM notifications
            WHERE to_role = ? AND to_email = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(Role::Faculty)
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn put_notification_read(&self, id: u64) -> StoreResult<bool> {
        let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn put_all_read_for_faculty(&self, email: &str) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE to_role = ? AND to_email = ? AND is_read = FALSE
            "#,
        )
        .bind(Role::Faculty)
        .bind(email)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }
}

impl AnnouncementStore for MySqlStore {
    async fn put_announcement(&self, new: NewAnnouncement) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO announcements (title, message, priority, created_by, created_by_name)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new.title)
        .bind(&new.message)
        .bind(new.priority)
        .bind(&new.created_by)
        .bind(&new.created_by_name)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_id())
    }

    async fn list_announcements(&self) -> StoreResult<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, Announcement>(
            r#"
            SELECT id, title, message, priority, created_by, created_by_name, created_at
            FROM announcements
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

impl ExamStore for MySqlStore {
    async fn put_exam_schedule(&self, new: NewExamSchedule) -> StoreResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO exam_schedules (exam_type, title, pdf_url, uploaded_by)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(new.exam_type)
        .bind(&new.title)
        .bind(&new.pdf_url)
        .bind(&new.uploaded_by)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_id())
    }

    async fn list_exam_schedules(
        &self,
        exam_type: Option<ExamType>,
    ) -> StoreResult<Vec<ExamSchedule>> {
        let rows = match exam_type {
            Some(kind) => {
                sqlx::query_as::<_, ExamSchedule>(
                    r#"
                    SELECT id, exam_type, title, pdf_url, uploaded_by, created_at
                    FROM exam_schedules
                    WHERE exam_type = ?
                    ORDER BY created_at DESC
                    "#,
                )
                .bind(kind)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ExamSchedule>(
                    r#"
                    SELECT id, exam_type, title, pdf_url, uploaded_by, created_at
                    FROM exam_schedules
                    ORDER BY created_at DESC
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }
}

impl TimetableStore for MySqlStore {
    async fn get_timetable(&self, faculty_email: &str) -> StoreResult<Option<Timetable>> {
        let row = sqlx::query_as::<_, Timetable>(
            "SELECT id, faculty_email, data, updated_at FROM timetables WHERE faculty_email = ?",
        )
        .bind(faculty_email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn put_timetable(&self, faculty_email: &str, data: String) -> StoreResult<Timetable> {
        sqlx::query(
            r#"
            INSERT INTO timetables (faculty_email, data)
            VALUES (?, ?)
            ON DUPLICATE KEY UPDATE data = VALUES(data)
            "#,
        )
        .bind(faculty_email)
        .bind(&data)
        .execute(&self.pool)
        .await?;

        self.get_timetable(faculty_email)
            .await?
            .ok_or_else(|| anyhow!("upserted timetable not readable back"))
    }
}
