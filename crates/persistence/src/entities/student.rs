//! Student entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Student, StudentRef};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the students table.
#[derive(Debug, Clone, FromRow)]
pub struct StudentEntity {
    pub id: Uuid,
    /// Human-readable student code.
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub course: String,
    pub year: i32,
    pub section: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StudentEntity> for Student {
    fn from(entity: StudentEntity) -> Self {
        Self {
            id: entity.id,
            student_code: entity.student_id,
            name: entity.name,
            email: entity.email,
            course: entity.course,
            year: entity.year,
            section: entity.section,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&StudentEntity> for StudentRef {
    fn from(entity: &StudentEntity) -> Self {
        Self {
            id: entity.id,
            student_code: entity.student_id.clone(),
            name: entity.name.clone(),
            course: entity.course.clone(),
            year: entity.year,
            section: entity.section.clone(),
        }
    }
}
