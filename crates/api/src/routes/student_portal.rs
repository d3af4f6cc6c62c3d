//! The calling student's own attendance and notification inbox.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Extension, Json,
};
use domain::models::attendance::{StudentAttendanceItem, StudentAttendanceQuery};
use domain::models::notification::{Notification, NotificationListResponse};
use domain::models::AttendanceSummary;
use persistence::repositories::INBOX_LIMIT;
use serde::Serialize;
use shared::pagination::{PageRequest, PaginationInfo};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::Caller;

#[derive(Debug, Serialize)]
pub struct MyAttendanceResponse {
    pub success: bool,
    pub records: Vec<StudentAttendanceItem>,
    pub stats: AttendanceSummary,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
    pub success: bool,
    pub notification: Notification,
}

/// The caller's attendance history, newest first.
///
/// With `classId` only that class is listed. Otherwise a student with any
/// enrollment sees records of enrolled classes only. Stats always cover the
/// enrolled-class scope.
///
/// GET /api/v1/me/attendance
pub async fn my_attendance(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    query: Result<Query<StudentAttendanceQuery>, QueryRejection>,
) -> Result<Json<MyAttendanceResponse>, ApiError> {
    let Query(query) = query?;
    let limits = &state.config.limits;
    let page = PageRequest::new(
        query.page,
        query.limit,
        limits.default_page_size,
        limits.max_page_size,
    );

    let enrolled = state.enrollments.class_ids_for_student(caller.id).await?;
    let enrolled_scope = (!enrolled.is_empty()).then_some(enrolled.as_slice());

    let requested = query.class_id.map(|id| [id]);
    let list_scope = requested.as_ref().map(|ids| ids.as_slice()).or(enrolled_scope);

    let (rows, total) = state
        .attendance
        .student_history(caller.id, list_scope, page)
        .await?;
    let totals = state
        .attendance
        .student_totals(caller.id, enrolled_scope)
        .await?;

    Ok(Json(MyAttendanceResponse {
        success: true,
        records: rows.into_iter().map(StudentAttendanceItem::from).collect(),
        stats: totals.into(),
        pagination: page.info(total),
    }))
}

/// The caller's newest notifications with the unread count among them.
///
/// GET /api/v1/me/notifications
pub async fn my_notifications(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<NotificationListResponse>, ApiError> {
    let notifications: Vec<Notification> = state
        .notifications
        .list_for_student(caller.id, INBOX_LIMIT)
        .await?
        .into_iter()
        .map(Notification::from)
        .collect();

    let unread_count = notifications.iter().filter(|n| !n.read).count();

    Ok(Json(NotificationListResponse {
        success: true,
        notifications,
        unread_count,
    }))
}

/// Mark one of the caller's notifications as read. Another student's
/// notification is reported as not found.
///
/// PATCH /api/v1/me/notifications/:id/read
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<Uuid>,
) -> Result<Json<MarkReadResponse>, ApiError> {
    let notification = state
        .notifications
        .mark_read(id, caller.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Notification not found".to_string()))?;

    Ok(Json(MarkReadResponse {
        success: true,
        notification: notification.into(),
    }))
}
