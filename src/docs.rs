use crate::api::admin::{ApproveFacultyReq, CreateAdminReq, CreateFacultyReq};
use crate::api::announcement::CreateAnnouncement;
use crate::api::exam::CreateExamSchedule;
use crate::api::leave_request::CreateLeave;
use crate::api::notification::BroadcastReq;
use crate::api::profile::UpdateProfile;
use crate::api::timetable::PutTimetable;
use crate::model::announcement::{Announcement, Priority};
use crate::model::department::Department;
use crate::model::exam::{ExamSchedule, ExamType};
use crate::model::leave_request::{LeaveDecision, LeaveRequest, LeaveStatus};
use crate::model::notification::Notification;
use crate::model::role::Role;
use crate::model::timetable::Timetable;
use crate::model::user::ProfileResponse;
use crate::models::{LoginReqDto, SignupReqDto};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EduSync API",
        version = "1.0.0",
        description = r#"
## EduSync — College Administration Portal

Role-based backend for department heads (admins) and faculty.

### Key Features
- **Accounts & Roles**
  - Faculty self-signup with HOD approval, admin-provisioned accounts
- **Leave Management**
  - Faculty file requests, HODs approve/reject within their department
- **Notifications**
  - Per-person and department-wide delivery, read tracking, broadcasts
- **Announcements & Exams**
  - Campus announcements and exam-schedule browsing
- **Timetables**
  - Per-faculty weekly schedules

### Security
Endpoints under the protected prefix require **JWT Bearer authentication**.
Admin operations additionally require the admin role, scoped to the caller's
department.

Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::auth::handlers::signup,
        crate::auth::handlers::login,
        crate::auth::handlers::refresh_token,
        crate::auth::handlers::logout,

        crate::api::session::session,

        crate::api::admin::create_admin,
        crate::api::admin::create_faculty,
        crate::api::admin::approve_faculty,
        crate::api::admin::pending_faculty,

        crate::api::leave_request::create_leave,
        crate::api::leave_request::leave_list,
        crate::api::leave_request::my_leaves,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,

        crate::api::notification::list_notifications,
        crate::api::notification::mark_read,
        crate::api::notification::mark_all_read,
        crate::api::notification::broadcast,

        crate::api::announcement::create_announcement,
        crate::api::announcement::list_announcements,

        crate::api::exam::create_exam_schedule,
        crate::api::exam::list_exam_schedules,

        crate::api::timetable::get_timetable,
        crate::api::timetable::put_timetable,

        crate::api::profile::get_profile,
        crate::api::profile::update_profile,
    ),
    components(
        schemas(
            LoginReqDto,
            SignupReqDto,
            CreateAdminReq,
            CreateFacultyReq,
            ApproveFacultyReq,
            CreateLeave,
            BroadcastReq,
            CreateAnnouncement,
            CreateExamSchedule,
            PutTimetable,
            UpdateProfile,
            ProfileResponse,
            LeaveRequest,
            LeaveStatus,
            LeaveDecision,
            Notification,
            Announcement,
            Priority,
            ExamSchedule,
            ExamType,
            Timetable,
            Department,
            Role
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Login, signup and token lifecycle"),
        (name = "Session", description = "Identity and route policy"),
        (name = "Admin", description = "Account provisioning and approval"),
        (name = "Leave", description = "Leave request workflow"),
        (name = "Notifications", description = "Notification delivery and read state"),
        (name = "Announcements", description = "Campus announcements"),
        (name = "Exams", description = "Exam schedule browsing"),
        (name = "Timetable", description = "Per-faculty timetables"),
        (name = "Profile", description = "Own profile"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
