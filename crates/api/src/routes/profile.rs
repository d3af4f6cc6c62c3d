//! Profile of the authenticated caller.

use axum::{extract::State, Extension, Json};
use domain::models::{Admin, Student};
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::Caller;

#[derive(Debug, Serialize)]
pub struct AdminProfileResponse {
    pub success: bool,
    pub admin: Admin,
}

#[derive(Debug, Serialize)]
pub struct StudentProfileResponse {
    pub success: bool,
    pub student: Student,
}

/// GET /api/v1/admin/me
///
/// A valid admin token without a matching `admins` row is 404.
pub async fn admin_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<AdminProfileResponse>, ApiError> {
    let admin = state
        .admins
        .find_by_id(caller.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Admin not found".to_string()))?;

    Ok(Json(AdminProfileResponse {
        success: true,
        admin: admin.into(),
    }))
}

/// GET /api/v1/me
pub async fn student_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<StudentProfileResponse>, ApiError> {
    let student = state
        .students
        .find_by_id(caller.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

    Ok(Json(StudentProfileResponse {
        success: true,
        student: student.into(),
    }))
}
