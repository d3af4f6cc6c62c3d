//! Student repository for database operations.

use async_trait::async_trait;
use domain::models::student::{CreateStudentRequest, UpdateStudentRequest};
use domain::models::{Student, StudentFilter};
use domain::services::StudentStore;
use shared::pagination::PageRequest;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::StudentEntity;
use crate::metrics::QueryTimer;

/// Repository for student database operations.
#[derive(Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    /// Creates a new StudentRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists students matching the filter and search term, ordered by name.
    ///
    /// Returns the page of students and the total number of matches.
    pub async fn list(
        &self,
        filter: &StudentFilter,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<(Vec<StudentEntity>, i64), sqlx::Error> {
        let timer = QueryTimer::new("list_students");
        let pattern = search.map(|s| format!("%{}%", escape_like(s)));

        let students = sqlx::query_as::<_, StudentEntity>(
            r#"
            SELECT * FROM students
            WHERE ($1::text IS NULL OR course = $1)
              AND ($2::int IS NULL OR year = $2)
              AND ($3::text IS NULL OR section = $3)
              AND ($4::text IS NULL
                   OR name ILIKE $4
                   OR student_id ILIKE $4
                   OR email ILIKE $4)
            ORDER BY name ASC, id ASC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(filter.course.as_deref())
        .bind(filter.year)
        .bind(filter.section.as_deref())
        .bind(pattern.as_deref())
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM students
            WHERE ($1::text IS NULL OR course = $1)
              AND ($2::int IS NULL OR year = $2)
              AND ($3::text IS NULL OR section = $3)
              AND ($4::text IS NULL
                   OR name ILIKE $4
                   OR student_id ILIKE $4
                   OR email ILIKE $4)
            "#,
        )
        .bind(filter.course.as_deref())
        .bind(filter.year)
        .bind(filter.section.as_deref())
        .bind(pattern.as_deref())
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok((students, total.0))
    }

    /// Finds every student matching the filter, ordered by name.
    pub async fn find_by_filter(
        &self,
        filter: &StudentFilter,
    ) -> Result<Vec<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_students_by_filter");
        let result = sqlx::query_as::<_, StudentEntity>(
            r#"
            SELECT * FROM students
            WHERE ($1::text IS NULL OR course = $1)
              AND ($2::int IS NULL OR year = $2)
              AND ($3::text IS NULL OR section = $3)
            ORDER BY name ASC, id ASC
            "#,
        )
        .bind(filter.course.as_deref())
        .bind(filter.year)
        .bind(filter.section.as_deref())
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_student_by_id");
        let result = sqlx::query_as::<_, StudentEntity>("SELECT * FROM students WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await;
        timer.record();
        result
    }

    /// Inserts a student. Duplicate codes or emails surface as unique violations.
    pub async fn create(&self, input: &CreateStudentRequest) -> Result<StudentEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_student");
        let result = sqlx::query_as::<_, StudentEntity>(
            r#"
            INSERT INTO students (student_id, name, email, course, year, section)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(input.student_code.trim())
        .bind(input.name.trim())
        .bind(input.email.trim().to_lowercase())
        .bind(input.course.trim())
        .bind(input.year)
        .bind(input.section.trim())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Applies a partial update; `None` when the student does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        patch: &UpdateStudentRequest,
    ) -> Result<Option<StudentEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_student");
        let result = sqlx::query_as::<_, StudentEntity>(
            r#"
            UPDATE students
            SET
                student_id = COALESCE($2, student_id),
                name = COALESCE($3, name),
                email = COALESCE($4, email),
                course = COALESCE($5, course),
                year = COALESCE($6, year),
                section = COALESCE($7, section),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.student_code.as_deref().map(str::trim))
        .bind(patch.name.as_deref().map(str::trim))
        .bind(patch.email.as_deref().map(|e| e.trim().to_lowercase()))
        .bind(patch.course.as_deref().map(str::trim))
        .bind(patch.year)
        .bind(patch.section.as_deref().map(str::trim))
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Deletes a student; enrollments, attendance and notifications cascade.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_student");
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected())
    }
}

#[async_trait]
impl StudentStore for StudentRepository {
    async fn find_students(&self, filter: &StudentFilter) -> Result<Vec<Student>, sqlx::Error> {
        let rows = self.find_by_filter(filter).await?;
        Ok(rows.into_iter().map(Student::from).collect())
    }
}

/// Escapes `%`, `_` and `\` so a search term matches literally inside ILIKE.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
