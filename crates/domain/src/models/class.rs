//! Class domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents a class that students can be enrolled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: Uuid,
    pub name: String,
    /// Unique six-character join code.
    pub code: String,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub schedule: Option<String>,
    pub is_active: bool,
    /// Owning admin.
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Class together with its enrollment count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassWithCount {
    #[serde(flatten)]
    pub class: Class,
    pub student_count: i64,
}

/// Query parameters for the class listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListClassesQuery {
    /// When true, only active classes are returned.
    #[serde(default, deserialize_with = "shared::query::empty_as_none")]
    pub active: Option<bool>,
}

/// Request payload for creating a class.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    #[validate(
        custom(function = "shared::validation::validate_not_blank"),
        length(max = 200, message = "Class name must be at most 200 characters")
    )]
    pub name: String,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub schedule: Option<String>,
}

/// Partial update for a class. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    #[validate(
        custom(function = "shared::validation::validate_not_blank"),
        length(max = 200, message = "Class name must be at most 200 characters")
    )]
    pub name: Option<String>,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub schedule: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateClassRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.subject.is_none()
            && self.schedule.is_none()
            && self.is_active.is_none()
    }
}

/// Treats empty optional text as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
