//! Dashboard aggregate rows.

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::dashboard::{ActivityStudent, CourseCount, RecentActivity};
use domain::services::dashboard::StatusCount;
use sqlx::FromRow;
use uuid::Uuid;

use super::attendance::AttendanceStatusDb;

/// Attendance count grouped by date and status.
#[derive(Debug, Clone, FromRow)]
pub struct StatusCountEntity {
    pub date: NaiveDate,
    pub status: AttendanceStatusDb,
    pub count: i64,
}

impl From<StatusCountEntity> for StatusCount {
    fn from(entity: StatusCountEntity) -> Self {
        Self {
            date: entity.date,
            status: entity.status.into(),
            count: entity.count,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct RecentActivityEntity {
    pub id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatusDb,
    pub created_at: DateTime<Utc>,
    pub s_id: Uuid,
    pub s_student_id: String,
    pub s_name: String,
}

impl From<RecentActivityEntity> for RecentActivity {
    fn from(entity: RecentActivityEntity) -> Self {
        Self {
            id: entity.id,
            date: entity.date,
            status: entity.status.into(),
            created_at: entity.created_at,
            student: ActivityStudent {
                id: entity.s_id,
                student_code: entity.s_student_id,
                name: entity.s_name,
            },
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CourseCountEntity {
    pub course: String,
    pub count: i64,
}

impl From<CourseCountEntity> for CourseCount {
    fn from(entity: CourseCountEntity) -> Self {
        Self {
            course: entity.course,
            count: entity.count,
        }
    }
}
