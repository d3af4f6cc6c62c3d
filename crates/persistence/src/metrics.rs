//! Database metrics for the attendance store.
//!
//! Query latency lands in `database_query_duration_seconds{query}`. Bulk
//! attendance writes also report their size and whether they committed.

use metrics::{counter, gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Records one query's latency under `database_query_duration_seconds`.
pub fn record_query_duration(query_name: &'static str, duration_secs: f64) {
    histogram!("database_query_duration_seconds", "query" => query_name).record(duration_secs);
}

/// Records a bulk attendance write: rows submitted and whether the
/// transaction committed or rolled back.
pub fn record_attendance_batch(rows: usize, committed: bool) {
    let result = if committed { "committed" } else { "rolled_back" };
    histogram!("attendance_batch_rows", "result" => result).record(rows as f64);
    counter!("attendance_batches_total", "result" => result).increment(1);
}

/// Publishes connection pool gauges; called from the readiness probe.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();

    gauge!("database_connections_active").set(size.saturating_sub(idle) as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_total").set(size as f64);
}

/// Times a repository query.
///
/// ```ignore
/// let timer = QueryTimer::new("find_student_by_id");
/// let result = sqlx::query_as::<_, StudentEntity>(...).fetch_optional(&pool).await;
/// timer.finish(result)
/// ```
pub struct QueryTimer {
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    /// Records the elapsed duration.
    pub fn record(self) {
        record_query_duration(self.query_name, self.start.elapsed().as_secs_f64());
    }

    /// Records the elapsed duration whatever the outcome, then hands the
    /// result back.
    pub fn finish<T>(self, result: Result<T, sqlx::Error>) -> Result<T, sqlx::Error> {
        self.record();
        result
    }
}
