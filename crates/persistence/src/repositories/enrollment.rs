//! Class enrollment repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ClassEntity, EnrolledStudentEntity, EnrollmentEntity};
use crate::metrics::QueryTimer;

/// Repository for class enrollment database operations.
#[derive(Clone)]
pub struct EnrollmentRepository {
    pool: PgPool,
}

impl EnrollmentRepository {
    /// Creates a new EnrollmentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Students enrolled in a class, most recent enrollment first.
    pub async fn list_students(
        &self,
        class_id: Uuid,
    ) -> Result<Vec<EnrolledStudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_class_students");
        let result = sqlx::query_as::<_, EnrolledStudentEntity>(
            r#"
            SELECT s.*, e.id AS enrollment_id, e.enrolled_at
            FROM class_enrollments e
            JOIN students s ON s.id = e.student_id
            WHERE e.class_id = $1
            ORDER BY e.enrolled_at DESC
            "#,
        )
        .bind(class_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn is_enrolled(&self, class_id: Uuid, student_id: Uuid) -> Result<bool, sqlx::Error> {
        let result: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM class_enrollments
                WHERE class_id = $1 AND student_id = $2
            )
            "#,
        )
        .bind(class_id)
        .bind(student_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(result.0)
    }

    /// Inserts an enrollment. A repeated pair surfaces as a unique violation.
    pub async fn enroll(
        &self,
        class_id: Uuid,
        student_id: Uuid,
    ) -> Result<EnrollmentEntity, sqlx::Error> {
        let timer = QueryTimer::new("enroll_student");
        let result = sqlx::query_as::<_, EnrollmentEntity>(
            r#"
            INSERT INTO class_enrollments (class_id, student_id)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(class_id)
        .bind(student_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn remove(&self, class_id: Uuid, student_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("remove_class_student");
        let result = sqlx::query(
            r#"
            DELETE FROM class_enrollments
            WHERE class_id = $1 AND student_id = $2
            "#,
        )
        .bind(class_id)
        .bind(student_id)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected())
    }

    /// Classes the student is enrolled in, most recent enrollment first.
    pub async fn classes_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<ClassEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_student_classes");
        let result = sqlx::query_as::<_, ClassEntity>(
            r#"
            SELECT c.*
            FROM class_enrollments e
            JOIN classes c ON c.id = e.class_id
            WHERE e.student_id = $1
            ORDER BY e.enrolled_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn class_ids_for_student(&self, student_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        let rows: Vec<(Uuid,)> =
            sqlx::query_as("SELECT class_id FROM class_enrollments WHERE student_id = $1")
                .bind(student_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
