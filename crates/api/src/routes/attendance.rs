//! Attendance recording and listing routes (admin).
//!
//! Writes go through the Attendance Recorder; the notifications a write calls
//! for are dispatched only after it has committed.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use domain::models::attendance::{
    AttendanceWithStudent, BulkAttendanceRequest, BulkAttendanceResponse, ListAttendanceQuery,
    RecordAttendanceRequest, RecordAttendanceResponse,
};
use domain::services::NotificationIntent;
use persistence::repositories::AttendanceListFilter;
use serde::Serialize;
use shared::pagination::{PageRequest, PaginationInfo};
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::{record_attendance_written, record_dispatch_outcome};
use crate::middleware::Caller;

#[derive(Debug, Serialize)]
pub struct ListAttendanceResponse {
    pub success: bool,
    pub records: Vec<AttendanceWithStudent>,
    pub pagination: PaginationInfo,
}

async fn dispatch_after_commit(state: &AppState, intents: &[NotificationIntent]) {
    if intents.is_empty() {
        return;
    }
    let outcome = state.dispatcher.dispatch(intents).await;
    record_dispatch_outcome(&outcome);
}

/// Record or overwrite one student's mark for a date.
///
/// POST /api/v1/attendance
pub async fn record_attendance(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<RecordAttendanceRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RecordAttendanceResponse>), ApiError> {
    let Json(request) = payload?;

    let recorded = state.recorder.record(request, Some(caller.id)).await?;
    record_attendance_written(1);

    dispatch_after_commit(&state, &recorded.notifications).await;

    Ok((
        StatusCode::CREATED,
        Json(RecordAttendanceResponse {
            success: true,
            attendance: recorded.value,
        }),
    ))
}

/// Record a whole roster for one date in a single transaction.
///
/// POST /api/v1/attendance/bulk
pub async fn record_bulk(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<BulkAttendanceRequest>, JsonRejection>,
) -> Result<Json<BulkAttendanceResponse>, ApiError> {
    let Json(request) = payload?;

    let recorded = state.recorder.record_bulk(request, Some(caller.id)).await?;
    let count = recorded.value;
    record_attendance_written(count);

    dispatch_after_commit(&state, &recorded.notifications).await;

    info!(
        admin_id = %caller.id,
        count,
        notifications = recorded.notifications.len(),
        "Bulk attendance saved"
    );

    Ok(Json(BulkAttendanceResponse {
        success: true,
        message: format!("{} attendance records saved", count),
        count,
    }))
}

/// List attendance, newest date first, each row with its student.
///
/// GET /api/v1/attendance?date=&studentId=&classId=&status=&page=&limit=
pub async fn list_attendance(
    State(state): State<AppState>,
    query: Result<Query<ListAttendanceQuery>, QueryRejection>,
) -> Result<Json<ListAttendanceResponse>, ApiError> {
    let Query(query) = query?;
    let limits = &state.config.limits;
    let page = PageRequest::new(
        query.page,
        query.limit,
        limits.default_page_size,
        limits.max_page_size,
    );

    let filter = AttendanceListFilter {
        date: query.date,
        student_id: query.student_id,
        class_id: query.class_id,
        status: query.status,
    };

    let (rows, total) = state.attendance.list(&filter, page).await?;

    Ok(Json(ListAttendanceResponse {
        success: true,
        records: rows.into_iter().map(AttendanceWithStudent::from).collect(),
        pagination: page.info(total),
    }))
}
