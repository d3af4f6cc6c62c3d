//! Class repository for database operations.

use domain::models::class::{CreateClassRequest, UpdateClassRequest};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ClassEntity, ClassWithCountEntity};
use crate::metrics::QueryTimer;

/// Repository for class database operations.
#[derive(Clone)]
pub struct ClassRepository {
    pool: PgPool,
}

impl ClassRepository {
    /// Creates a new ClassRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists classes newest first with their enrollment counts.
    pub async fn list(&self, active_only: bool) -> Result<Vec<ClassWithCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_classes");
        let result = sqlx::query_as::<_, ClassWithCountEntity>(
            r#"
            SELECT c.*, COUNT(e.id) AS student_count
            FROM classes c
            LEFT JOIN class_enrollments e ON e.class_id = c.id
            WHERE ($1 = FALSE OR c.is_active = TRUE)
            GROUP BY c.id
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(active_only)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ClassEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_class_by_id");
        let result = sqlx::query_as::<_, ClassEntity>("SELECT * FROM classes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn find_with_count(
        &self,
        id: Uuid,
    ) -> Result<Option<ClassWithCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_class_with_count");
        let result = sqlx::query_as::<_, ClassWithCountEntity>(
            r#"
            SELECT c.*, COUNT(e.id) AS student_count
            FROM classes c
            LEFT JOIN class_enrollments e ON e.class_id = c.id
            WHERE c.id = $1
            GROUP BY c.id
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Finds a class by its join code (already normalised to upper case).
    pub async fn find_by_code(&self, code: &str) -> Result<Option<ClassEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_class_by_code");
        let result = sqlx::query_as::<_, ClassEntity>("SELECT * FROM classes WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    pub async fn code_exists(&self, code: &str) -> Result<bool, sqlx::Error> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM classes WHERE code = $1)")
                .bind(code)
                .fetch_one(&self.pool)
                .await?;
        Ok(result.0)
    }

    pub async fn create(
        &self,
        input: &CreateClassRequest,
        code: &str,
        created_by: Option<Uuid>,
    ) -> Result<ClassEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_class");
        let result = sqlx::query_as::<_, ClassEntity>(
            r#"
            INSERT INTO classes (name, code, description, subject, schedule, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(input.name.trim())
        .bind(code)
        .bind(input.description.as_deref())
        .bind(input.subject.as_deref())
        .bind(input.schedule.as_deref())
        .bind(created_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Applies a partial update; `None` when the class does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        patch: &UpdateClassRequest,
    ) -> Result<Option<ClassEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_class");
        let result = sqlx::query_as::<_, ClassEntity>(
            r#"
            UPDATE classes
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                subject = COALESCE($4, subject),
                schedule = COALESCE($5, schedule),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.name.as_deref().map(str::trim))
        .bind(patch.description.as_deref())
        .bind(patch.subject.as_deref())
        .bind(patch.schedule.as_deref())
        .bind(patch.is_active)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Deletes a class; enrollments and class-scoped attendance cascade.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_class");
        let result = sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}
