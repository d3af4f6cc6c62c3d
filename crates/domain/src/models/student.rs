//! Student domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents a student in the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    /// Human-readable student code (unique), e.g. `STU001`.
    #[serde(rename = "studentId")]
    pub student_code: String,
    pub name: String,
    pub email: String,
    pub course: String,
    pub year: i32,
    pub section: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact student view embedded in reports and attendance listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRef {
    pub id: Uuid,
    #[serde(rename = "studentId")]
    pub student_code: String,
    pub name: String,
    pub course: String,
    pub year: i32,
    pub section: String,
}

impl From<&Student> for StudentRef {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id,
            student_code: student.student_code.clone(),
            name: student.name.clone(),
            course: student.course.clone(),
            year: student.year,
            section: student.section.clone(),
        }
    }
}

/// Conjunctive roster filter: every supplied field must match exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentFilter {
    pub course: Option<String>,
    pub year: Option<i32>,
    pub section: Option<String>,
}

impl StudentFilter {
    /// Returns true when the student satisfies all supplied criteria.
    pub fn matches(&self, student: &Student) -> bool {
        self.course.as_deref().map_or(true, |c| student.course == c)
            && self.year.map_or(true, |y| student.year == y)
            && self.section.as_deref().map_or(true, |s| student.section == s)
    }
}

/// Query parameters for the student listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStudentsQuery {
    pub course: Option<String>,
    #[serde(default, deserialize_with = "shared::query::empty_as_none")]
    pub year: Option<i32>,
    pub section: Option<String>,
    /// Case-insensitive substring over name, student code and email.
    pub search: Option<String>,
    #[serde(default, deserialize_with = "shared::query::empty_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "shared::query::empty_as_none")]
    pub limit: Option<i64>,
}

impl ListStudentsQuery {
    pub fn filter(&self) -> StudentFilter {
        StudentFilter {
            course: self.course.clone().filter(|c| !c.is_empty()),
            year: self.year,
            section: self.section.clone().filter(|s| !s.is_empty()),
        }
    }

    /// Search term, if non-blank.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Request payload for creating a student.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[serde(rename = "studentId")]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub student_code: String,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub course: String,

    #[validate(custom(function = "shared::validation::validate_year_level"))]
    pub year: i32,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub section: String,
}

/// Partial update for a student. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentRequest {
    #[serde(rename = "studentId")]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub student_code: Option<String>,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub course: Option<String>,

    #[validate(custom(function = "shared::validation::validate_year_level"))]
    pub year: Option<i32>,

    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub section: Option<String>,
}

impl UpdateStudentRequest {
    pub fn is_empty(&self) -> bool {
        self.student_code.is_none()
            && self.name.is_none()
            && self.email.is_none()
            && self.course.is_none()
            && self.year.is_none()
            && self.section.is_none()
    }
}
