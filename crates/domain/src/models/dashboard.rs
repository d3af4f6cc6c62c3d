//! Admin dashboard models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::attendance::AttendanceStatus;

/// Today's attendance tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayStats {
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    /// Students without a mark today; never negative.
    pub not_marked: i64,
}

/// Attendance tallies for one day of the trend window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
}

/// Compact student view for the activity feed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityStudent {
    pub id: Uuid,
    #[serde(rename = "studentId")]
    pub student_code: String,
    pub name: String,
}

/// A recent attendance write.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub created_at: DateTime<Utc>,
    pub student: ActivityStudent,
}

/// Number of students enrolled in one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseCount {
    pub course: String,
    pub count: i64,
}

/// Dashboard payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_students: i64,
    pub today: TodayStats,
    pub weekly_trend: Vec<TrendPoint>,
    pub recent_activity: Vec<RecentActivity>,
    pub course_distribution: Vec<CourseCount>,
}
