//! Class enrollment entities (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{EnrolledStudent, Enrollment};
use sqlx::FromRow;
use uuid::Uuid;

use super::student::StudentEntity;

/// Database row mapping for the class_enrollments table.
#[derive(Debug, Clone, FromRow)]
pub struct EnrollmentEntity {
    pub id: Uuid,
    pub class_id: Uuid,
    pub student_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
}

impl From<EnrollmentEntity> for Enrollment {
    fn from(entity: EnrollmentEntity) -> Self {
        Self {
            id: entity.id,
            class_id: entity.class_id,
            student_id: entity.student_id,
            enrolled_at: entity.enrolled_at,
        }
    }
}

/// Student row joined with its enrollment in one class.
#[derive(Debug, Clone, FromRow)]
pub struct EnrolledStudentEntity {
    #[sqlx(flatten)]
    pub student: StudentEntity,
    pub enrollment_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
}

impl From<EnrolledStudentEntity> for EnrolledStudent {
    fn from(entity: EnrolledStudentEntity) -> Self {
        Self {
            student: entity.student.into(),
            enrollment_id: entity.enrollment_id,
            enrolled_at: entity.enrolled_at,
        }
    }
}
