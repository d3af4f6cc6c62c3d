//! Class roster and enrollment routes.
//!
//! Admins manage rosters directly; students join a class with its code.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use domain::models::class::Class;
use domain::models::enrollment::{
    EnrollStudentRequest, EnrolledStudent, Enrollment, JoinClassRequest, JoinClassResponse,
    RemoveStudentQuery,
};
use serde::Serialize;
use shared::class_code::normalize_class_code;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::Caller;
use crate::routes::MessageResponse;

#[derive(Debug, Serialize)]
pub struct ClassStudentsResponse {
    pub success: bool,
    pub students: Vec<EnrolledStudent>,
}

#[derive(Debug, Serialize)]
pub struct EnrollmentResponse {
    pub success: bool,
    pub enrollment: Enrollment,
}

#[derive(Debug, Serialize)]
pub struct MyClassesResponse {
    pub success: bool,
    pub classes: Vec<Class>,
}

async fn ensure_class_exists(state: &AppState, class_id: Uuid) -> Result<Class, ApiError> {
    state
        .classes
        .find_by_id(class_id)
        .await?
        .map(Class::from)
        .ok_or_else(|| ApiError::NotFound("Class not found".to_string()))
}

/// Students enrolled in a class, most recent enrollment first.
///
/// GET /api/v1/classes/:id/students
pub async fn list_class_students(
    State(state): State<AppState>,
    Path(class_id): Path<Uuid>,
) -> Result<Json<ClassStudentsResponse>, ApiError> {
    ensure_class_exists(&state, class_id).await?;

    let students = state
        .enrollments
        .list_students(class_id)
        .await?
        .into_iter()
        .map(EnrolledStudent::from)
        .collect();

    Ok(Json(ClassStudentsResponse {
        success: true,
        students,
    }))
}

/// Enroll a student in a class.
///
/// POST /api/v1/classes/:id/students
pub async fn enroll_student(
    State(state): State<AppState>,
    Path(class_id): Path<Uuid>,
    payload: Result<Json<EnrollStudentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), ApiError> {
    let Json(request) = payload?;
    ensure_class_exists(&state, class_id).await?;

    if state
        .enrollments
        .is_enrolled(class_id, request.student_id)
        .await?
    {
        return Err(ApiError::Conflict("Student already enrolled".to_string()));
    }

    let enrollment: Enrollment = state
        .enrollments
        .enroll(class_id, request.student_id)
        .await?
        .into();

    info!(
        class_id = %class_id,
        student_id = %request.student_id,
        "Student enrolled"
    );

    Ok((
        StatusCode::CREATED,
        Json(EnrollmentResponse {
            success: true,
            enrollment,
        }),
    ))
}

/// Remove a student from a class.
///
/// DELETE /api/v1/classes/:id/students?studentId=<uuid>
pub async fn remove_student(
    State(state): State<AppState>,
    Path(class_id): Path<Uuid>,
    query: Result<Query<RemoveStudentQuery>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Query(query) = query?;

    let removed = state.enrollments.remove(class_id, query.student_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Enrollment not found".to_string()));
    }

    info!(class_id = %class_id, student_id = %query.student_id, "Student removed from class");
    Ok(Json(MessageResponse::new("Student removed from class")))
}

/// Join a class by its code.
///
/// POST /api/v1/me/classes/join
pub async fn join_class(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<JoinClassRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<JoinClassResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;
    let code = normalize_class_code(&request.code);

    let class: Class = state
        .classes
        .find_by_code(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invalid class code".to_string()))?
        .into();

    if !class.is_active {
        return Err(ApiError::Validation(
            "This class is no longer active".to_string(),
        ));
    }

    if state.enrollments.is_enrolled(class.id, caller.id).await? {
        return Err(ApiError::Conflict(
            "You are already enrolled in this class".to_string(),
        ));
    }

    let enrollment: Enrollment = state.enrollments.enroll(class.id, caller.id).await?.into();

    info!(class_id = %class.id, student_id = %caller.id, "Student joined class");

    Ok((
        StatusCode::CREATED,
        Json(JoinClassResponse {
            success: true,
            message: format!("Successfully joined {}", class.name),
            enrollment,
            class,
        }),
    ))
}

/// Classes the calling student is enrolled in.
///
/// GET /api/v1/me/classes
pub async fn my_classes(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<MyClassesResponse>, ApiError> {
    let classes = state
        .enrollments
        .classes_for_student(caller.id)
        .await?
        .into_iter()
        .map(Class::from)
        .collect();

    Ok(Json(MyClassesResponse {
        success: true,
        classes,
    }))
}
