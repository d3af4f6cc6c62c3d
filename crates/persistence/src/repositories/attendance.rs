//! Attendance repository for database operations.

use async_trait::async_trait;
use chrono::NaiveDate;
use domain::models::{AttendanceRecord, AttendanceStatus, AttendanceUpsert};
use domain::services::{AttendanceStore, DateRange};
use shared::pagination::PageRequest;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::entities::{
    AttendanceEntity, AttendanceStatusDb, AttendanceWithStudentEntity, StatusTotalsEntity,
    StudentAttendanceEntity,
};
use crate::metrics::{record_attendance_batch, QueryTimer};

/// Upsert keyed on (student, date, class). The constraint treats NULL class ids
/// as equal, so unscoped rows are unique per (student, date).
const UPSERT_ATTENDANCE_SQL: &str = r#"
    INSERT INTO attendance (student_id, date, class_id, status, remarks, marked_by)
    VALUES ($1, $2, $3, $4, $5, $6)
    ON CONFLICT ON CONSTRAINT uq_attendance_student_date_class
    DO UPDATE SET
        status = EXCLUDED.status,
        remarks = EXCLUDED.remarks,
        marked_by = EXCLUDED.marked_by,
        updated_at = NOW()
    RETURNING *
"#;

/// Filters for the admin attendance listing.
#[derive(Debug, Clone, Default)]
pub struct AttendanceListFilter {
    pub date: Option<NaiveDate>,
    pub student_id: Option<Uuid>,
    pub class_id: Option<Uuid>,
    pub status: Option<AttendanceStatus>,
}

/// Repository for attendance database operations.
#[derive(Clone)]
pub struct AttendanceRepository {
    pool: PgPool,
}

impl AttendanceRepository {
    /// Creates a new AttendanceRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn upsert_query(
        upsert: &AttendanceUpsert,
    ) -> sqlx::query::QueryAs<'_, Postgres, AttendanceEntity, sqlx::postgres::PgArguments> {
        sqlx::query_as::<_, AttendanceEntity>(UPSERT_ATTENDANCE_SQL)
            .bind(upsert.student_id)
            .bind(upsert.date)
            .bind(upsert.class_id)
            .bind(AttendanceStatusDb::from(upsert.status))
            .bind(upsert.remarks.as_deref())
            .bind(upsert.marked_by)
    }

    /// Creates or fully replaces one attendance row.
    pub async fn upsert(&self, upsert: &AttendanceUpsert) -> Result<AttendanceEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_attendance");
        let result = Self::upsert_query(upsert).fetch_one(&self.pool).await;
        timer.finish(result)
    }

    /// Upserts every row inside one transaction; any failure rolls back the lot.
    pub async fn upsert_batch(
        &self,
        upserts: &[AttendanceUpsert],
    ) -> Result<Vec<AttendanceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("upsert_attendance_batch");
        let result = self.write_batch(upserts).await;
        record_attendance_batch(upserts.len(), result.is_ok());
        timer.finish(result)
    }

    async fn write_batch(
        &self,
        upserts: &[AttendanceUpsert],
    ) -> Result<Vec<AttendanceEntity>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let mut written = Vec::with_capacity(upserts.len());

        for upsert in upserts {
            let row = Self::upsert_query(upsert).fetch_one(&mut *tx).await?;
            written.push(row);
        }

        tx.commit().await?;
        tracing::debug!(rows = written.len(), "Attendance batch committed");
        Ok(written)
    }

    /// Rows for the given students dated within the range, of any class.
    pub async fn find_in_range(
        &self,
        student_ids: &[Uuid],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<AttendanceEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_attendance_in_range");
        let result = sqlx::query_as::<_, AttendanceEntity>(
            r#"
            SELECT * FROM attendance
            WHERE student_id = ANY($1)
              AND date BETWEEN $2 AND $3
            ORDER BY date ASC, updated_at ASC
            "#,
        )
        .bind(student_ids)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Admin listing, newest date first, each row joined with its student.
    pub async fn list(
        &self,
        filter: &AttendanceListFilter,
        page: PageRequest,
    ) -> Result<(Vec<AttendanceWithStudentEntity>, i64), sqlx::Error> {
        let timer = QueryTimer::new("list_attendance");
        let status = filter.status.map(AttendanceStatusDb::from);

        let rows = sqlx::query_as::<_, AttendanceWithStudentEntity>(
            r#"
            SELECT
                a.id, a.date, a.status, a.remarks, a.class_id, a.created_at,
                s.id AS s_id, s.student_id AS s_student_id, s.name AS s_name,
                s.course AS s_course, s.year AS s_year, s.section AS s_section
            FROM attendance a
            JOIN students s ON s.id = a.student_id
            WHERE ($1::date IS NULL OR a.date = $1)
              AND ($2::uuid IS NULL OR a.student_id = $2)
              AND ($3::uuid IS NULL OR a.class_id = $3)
              AND ($4::attendance_status IS NULL OR a.status = $4)
            ORDER BY a.date DESC, a.created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(filter.date)
        .bind(filter.student_id)
        .bind(filter.class_id)
        .bind(status)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM attendance a
            WHERE ($1::date IS NULL OR a.date = $1)
              AND ($2::uuid IS NULL OR a.student_id = $2)
              AND ($3::uuid IS NULL OR a.class_id = $3)
              AND ($4::attendance_status IS NULL OR a.status = $4)
            "#,
        )
        .bind(filter.date)
        .bind(filter.student_id)
        .bind(filter.class_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok((rows, total.0))
    }

    /// A student's own history. `class_ids` of `None` means every row.
    pub async fn student_history(
        &self,
        student_id: Uuid,
        class_ids: Option<&[Uuid]>,
        page: PageRequest,
    ) -> Result<(Vec<StudentAttendanceEntity>, i64), sqlx::Error> {
        let timer = QueryTimer::new("student_attendance_history");

        let rows = sqlx::query_as::<_, StudentAttendanceEntity>(
            r#"
            SELECT
                a.id, a.date, a.status, a.remarks, a.class_id,
                c.name AS c_name, c.code AS c_code, c.subject AS c_subject
            FROM attendance a
            LEFT JOIN classes c ON c.id = a.class_id
            WHERE a.student_id = $1
              AND ($2::uuid[] IS NULL OR a.class_id = ANY($2))
            ORDER BY a.date DESC, a.created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(student_id)
        .bind(class_ids)
        .bind(page.limit)
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM attendance a
            WHERE a.student_id = $1
              AND ($2::uuid[] IS NULL OR a.class_id = ANY($2))
            "#,
        )
        .bind(student_id)
        .bind(class_ids)
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok((rows, total.0))
    }

    /// Per-status totals over the same scope as [`Self::student_history`].
    pub async fn student_totals(
        &self,
        student_id: Uuid,
        class_ids: Option<&[Uuid]>,
    ) -> Result<StatusTotalsEntity, sqlx::Error> {
        let timer = QueryTimer::new("student_attendance_totals");
        let result = sqlx::query_as::<_, StatusTotalsEntity>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'present') AS present,
                COUNT(*) FILTER (WHERE status = 'absent') AS absent,
                COUNT(*) FILTER (WHERE status = 'late') AS late,
                COUNT(*) AS total
            FROM attendance
            WHERE student_id = $1
              AND ($2::uuid[] IS NULL OR class_id = ANY($2))
            "#,
        )
        .bind(student_id)
        .bind(class_ids)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[async_trait]
impl AttendanceStore for AttendanceRepository {
    async fn upsert_attendance(
        &self,
        upsert: &AttendanceUpsert,
    ) -> Result<AttendanceRecord, sqlx::Error> {
        Ok(self.upsert(upsert).await?.into())
    }

    async fn upsert_attendance_batch(
        &self,
        upserts: &[AttendanceUpsert],
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let rows = self.upsert_batch(upserts).await?;
        Ok(rows.into_iter().map(AttendanceRecord::from).collect())
    }

    async fn find_attendance_in_range(
        &self,
        student_ids: &[Uuid],
        range: DateRange,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        let rows = self
            .find_in_range(student_ids, range.start_date, range.end_date)
            .await?;
        Ok(rows.into_iter().map(AttendanceRecord::from).collect())
    }
}
