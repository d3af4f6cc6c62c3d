//! Class entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Class, ClassWithCount};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the classes table.
#[derive(Debug, Clone, FromRow)]
pub struct ClassEntity {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub subject: Option<String>,
    pub schedule: Option<String>,
    pub is_active: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClassEntity> for Class {
    fn from(entity: ClassEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            code: entity.code,
            description: entity.description,
            subject: entity.subject,
            schedule: entity.schedule,
            is_active: entity.is_active,
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Class row with its enrollment count.
#[derive(Debug, Clone, FromRow)]
pub struct ClassWithCountEntity {
    #[sqlx(flatten)]
    pub class: ClassEntity,
    pub student_count: i64,
}

impl From<ClassWithCountEntity> for ClassWithCount {
    fn from(entity: ClassWithCountEntity) -> Self {
        Self {
            class: entity.class.into(),
            student_count: entity.student_count,
        }
    }
}
