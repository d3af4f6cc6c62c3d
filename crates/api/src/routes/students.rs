//! Student directory routes (admin).

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use domain::models::student::{
    CreateStudentRequest, ListStudentsQuery, Student, UpdateStudentRequest,
};
use serde::Serialize;
use shared::pagination::{PageRequest, PaginationInfo};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::Caller;
use crate::routes::MessageResponse;

#[derive(Debug, Serialize)]
pub struct ListStudentsResponse {
    pub success: bool,
    pub students: Vec<Student>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize)]
pub struct StudentResponse {
    pub success: bool,
    pub student: Student,
}

/// List students, filtered, searched and paginated, ordered by name.
///
/// GET /api/v1/students
pub async fn list_students(
    State(state): State<AppState>,
    query: Result<Query<ListStudentsQuery>, QueryRejection>,
) -> Result<Json<ListStudentsResponse>, ApiError> {
    let Query(query) = query?;
    let limits = &state.config.limits;
    let page = PageRequest::new(
        query.page,
        query.limit,
        limits.default_page_size,
        limits.max_page_size,
    );

    let (rows, total) = state
        .students
        .list(&query.filter(), query.search_term(), page)
        .await?;

    Ok(Json(ListStudentsResponse {
        success: true,
        students: rows.into_iter().map(Student::from).collect(),
        pagination: page.info(total),
    }))
}

/// Create a student. Duplicate student code or email yields 409.
///
/// POST /api/v1/students
pub async fn create_student(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<CreateStudentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StudentResponse>), ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let student: Student = state.students.create(&request).await?.into();

    info!(
        student_id = %student.id,
        student_code = %student.student_code,
        admin_id = %caller.id,
        "Student created"
    );

    Ok((
        StatusCode::CREATED,
        Json(StudentResponse {
            success: true,
            student,
        }),
    ))
}

/// GET /api/v1/students/:id
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudentResponse>, ApiError> {
    let student = state
        .students
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    Ok(Json(StudentResponse {
        success: true,
        student: student.into(),
    }))
}

/// Partially update a student.
///
/// PUT /api/v1/students/:id
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateStudentRequest>, JsonRejection>,
) -> Result<Json<StudentResponse>, ApiError> {
    let Json(request) = payload?;
    if request.is_empty() {
        return Err(ApiError::Validation("No fields to update".to_string()));
    }
    request.validate()?;

    let student = state
        .students
        .update(id, &request)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    info!(student_id = %id, "Student updated");

    Ok(Json(StudentResponse {
        success: true,
        student: student.into(),
    }))
}

/// Delete a student together with their enrollments, attendance and
/// notifications.
///
/// DELETE /api/v1/students/:id
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    if state.students.delete(id).await? == 0 {
        return Err(ApiError::NotFound("Student not found".to_string()));
    }

    info!(student_id = %id, "Student deleted");
    Ok(Json(MessageResponse::new("Student deleted")))
}
