//! Data-access seams used by the domain services.
//!
//! The persistence crate implements these over PostgreSQL; unit tests use the
//! in-memory store in `services::memory`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::attendance::{AttendanceRecord, AttendanceUpsert};
use crate::models::notification::{NewNotification, Notification};
use crate::models::student::{Student, StudentFilter};
use crate::services::calendar::DateRange;

/// Attendance rows keyed by (student, date, class).
#[async_trait]
pub trait AttendanceStore: Send + Sync {
    /// Creates the row for the upsert's key, or fully replaces status,
    /// remarks and marker on the existing one.
    async fn upsert_attendance(
        &self,
        upsert: &AttendanceUpsert,
    ) -> Result<AttendanceRecord, sqlx::Error>;

    /// Upserts every row as one unit: either all rows are written or none.
    async fn upsert_attendance_batch(
        &self,
        upserts: &[AttendanceUpsert],
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error>;

    /// All rows for the given students dated within `range`, of any class.
    async fn find_attendance_in_range(
        &self,
        student_ids: &[Uuid],
        range: DateRange,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error>;
}

/// Read access to the student roster.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// Students matching every supplied filter field, ordered by name.
    async fn find_students(&self, filter: &StudentFilter) -> Result<Vec<Student>, sqlx::Error>;
}

/// Student inbox writes.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn create_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<Notification, sqlx::Error>;
}
