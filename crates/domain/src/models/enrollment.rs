//! Class enrollment domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::class::Class;
use super::student::Student;

/// Link between a class and a student. A (class, student) pair appears at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: Uuid,
    pub class_id: Uuid,
    pub student_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
}

/// Student row as seen from a class roster.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledStudent {
    #[serde(flatten)]
    pub student: Student,
    pub enrollment_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
}

/// Admin request to enroll a student into a class.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollStudentRequest {
    pub student_id: Uuid,
}

/// Query parameters for removing a student from a class.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveStudentQuery {
    pub student_id: Uuid,
}

/// Student request to join a class by its code.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct JoinClassRequest {
    #[validate(custom(function = "shared::validation::validate_join_code"))]
    pub code: String,
}

/// Response after a student joins a class.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinClassResponse {
    pub success: bool,
    pub message: String,
    pub enrollment: Enrollment,
    pub class: Class,
}
