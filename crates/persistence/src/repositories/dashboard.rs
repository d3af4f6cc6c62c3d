//! Dashboard repository for database operations.

use chrono::NaiveDate;
use domain::models::dashboard::DashboardStats;
use domain::services::calendar::last_n_days;
use domain::services::dashboard::{today_stats, weekly_trend, StatusCount};
use sqlx::PgPool;

use crate::entities::{CourseCountEntity, RecentActivityEntity, StatusCountEntity};
use crate::metrics::QueryTimer;

/// Days covered by the dashboard trend, including today.
pub const TREND_DAYS: u64 = 7;

/// Rows shown in the recent activity feed.
pub const RECENT_ACTIVITY_LIMIT: i64 = 10;

/// Repository for dashboard aggregate queries.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds the dashboard payload for `today`.
    pub async fn get_stats(&self, today: NaiveDate) -> Result<DashboardStats, sqlx::Error> {
        let trend_range = last_n_days(today, TREND_DAYS);

        let (total_students, counts, recent, courses) = tokio::try_join!(
            self.count_students(),
            self.status_counts(trend_range.start_date, trend_range.end_date),
            self.recent_activity(),
            self.course_distribution(),
        )?;

        let counts: Vec<StatusCount> = counts.into_iter().map(StatusCount::from).collect();
        let todays: Vec<StatusCount> = counts.iter().copied().filter(|c| c.date == today).collect();

        Ok(DashboardStats {
            total_students,
            today: today_stats(total_students, &todays),
            weekly_trend: weekly_trend(trend_range, &counts),
            recent_activity: recent.into_iter().map(Into::into).collect(),
            course_distribution: courses.into_iter().map(Into::into).collect(),
        })
    }

    async fn count_students(&self) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM students")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    async fn status_counts(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<StatusCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("dashboard_status_counts");
        let result = sqlx::query_as::<_, StatusCountEntity>(
            r#"
            SELECT date, status, COUNT(*) AS count
            FROM attendance
            WHERE date BETWEEN $1 AND $2
            GROUP BY date, status
            ORDER BY date ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    async fn recent_activity(&self) -> Result<Vec<RecentActivityEntity>, sqlx::Error> {
        let timer = QueryTimer::new("dashboard_recent_activity");
        let result = sqlx::query_as::<_, RecentActivityEntity>(
            r#"
            SELECT
                a.id, a.date, a.status, a.created_at,
                s.id AS s_id, s.student_id AS s_student_id, s.name AS s_name
            FROM attendance a
            JOIN students s ON s.id = a.student_id
            ORDER BY a.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(RECENT_ACTIVITY_LIMIT)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    async fn course_distribution(&self) -> Result<Vec<CourseCountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("dashboard_course_distribution");
        let result = sqlx::query_as::<_, CourseCountEntity>(
            r#"
            SELECT course, COUNT(*) AS count
            FROM students
            GROUP BY course
            ORDER BY count DESC, course ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
