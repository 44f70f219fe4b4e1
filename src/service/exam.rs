use crate::auth::auth::AuthUser;
use crate::error::ApiError;
use crate::model::exam::{ExamSchedule, ExamType, NewExamSchedule};
use crate::store::ExamStore;

pub async fn create<S: ExamStore>(
    store: &S,
    caller: &AuthUser,
    exam_type: Option<String>,
    title: Option<String>,
    pdf_url: Option<String>,
) -> Result<u64, ApiError> {
    caller.require_admin()?;

    let (exam_type, title, pdf_url) = match (exam_type, title, pdf_url) {
        (Some(e), Some(t), Some(u))
            if !t.trim().is_empty() && !u.trim().is_empty() =>
        {
            (e, t.trim().to_string(), u.trim().to_string())
        }
        _ => {
            return Err(ApiError::invalid_argument(
                "Missing required parameters: examType, title, pdfUrl",
            ));
        }
    };
    let exam_type = ExamType::parse(&exam_type)?;

    store
        .put_exam_schedule(NewExamSchedule {
            exam_type,
            title,
            pdf_url,
            uploaded_by: caller.email.clone(),
        })
        .await
        .map_err(ApiError::from_store)
}

/// Browse schedules, optionally filtered to one exam type.
pub async fn list<S: ExamStore>(
    store: &S,
    exam_type: Option<String>,
) -> Result<Vec<ExamSchedule>, ApiError> {
    let filter = match exam_type.as_deref() {
        Some(raw) => Some(ExamType::parse(raw)?),
        None => None,
    };
    store
        .list_exam_schedules(filter)
        .await
        .map_err(ApiError::from_store)
}
