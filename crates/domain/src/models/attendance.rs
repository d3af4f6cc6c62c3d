//! Attendance domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::student::StudentRef;

/// Attendance outcome for one student on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AttendanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            other => Err(format!("unknown attendance status '{}'", other)),
        }
    }
}

/// A stored attendance row.
///
/// Unique per (student, date, class); a record without a class is unique per
/// (student, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
    pub class_id: Option<Uuid>,
    pub marked_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Key that identifies the single attendance slot an upsert targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttendanceKey {
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub class_id: Option<Uuid>,
}

/// Full replacement values written by an upsert.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceUpsert {
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub class_id: Option<Uuid>,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
    pub marked_by: Option<Uuid>,
}

impl AttendanceUpsert {
    pub fn key(&self) -> AttendanceKey {
        AttendanceKey {
            student_id: self.student_id,
            date: self.date,
            class_id: self.class_id,
        }
    }
}

/// Request payload for recording a single attendance mark.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordAttendanceRequest {
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[validate(length(max = 500, message = "Remarks must be at most 500 characters"))]
    pub remarks: Option<String>,
    pub class_id: Option<Uuid>,
}

/// Request payload for marking a whole roster at once.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkAttendanceRequest {
    pub date: NaiveDate,
    pub class_id: Option<Uuid>,
    #[validate(
        length(min = 1, message = "Records must not be empty"),
        nested
    )]
    pub records: Vec<BulkAttendanceEntry>,
}

/// One student's mark within a bulk submission.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkAttendanceEntry {
    pub student_id: Uuid,
    pub status: AttendanceStatus,
    #[validate(length(max = 500, message = "Remarks must be at most 500 characters"))]
    pub remarks: Option<String>,
}

/// Response after recording a single attendance mark.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordAttendanceResponse {
    pub success: bool,
    pub attendance: AttendanceRecord,
}

/// Response after a bulk submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkAttendanceResponse {
    pub success: bool,
    pub message: String,
    pub count: usize,
}

/// Query parameters for the admin attendance listing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAttendanceQuery {
    #[serde(default, deserialize_with = "shared::query::empty_as_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "shared::query::empty_as_none")]
    pub student_id: Option<Uuid>,
    #[serde(default, deserialize_with = "shared::query::empty_as_none")]
    pub class_id: Option<Uuid>,
    #[serde(default, deserialize_with = "shared::query::empty_as_none")]
    pub status: Option<AttendanceStatus>,
    #[serde(default, deserialize_with = "shared::query::empty_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "shared::query::empty_as_none")]
    pub limit: Option<i64>,
}

/// Attendance row joined with its student.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceWithStudent {
    pub id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
    pub class_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub student: StudentRef,
}

/// Compact class view embedded in a student's own attendance history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRef {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub subject: Option<String>,
}

/// One row of a student's own attendance history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAttendanceItem {
    pub id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
    pub class_id: Option<Uuid>,
    pub class: Option<ClassRef>,
}

/// Query parameters for a student's own attendance history.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAttendanceQuery {
    #[serde(default, deserialize_with = "shared::query::empty_as_none")]
    pub class_id: Option<Uuid>,
    #[serde(default, deserialize_with = "shared::query::empty_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "shared::query::empty_as_none")]
    pub limit: Option<i64>,
}

/// Treats empty or whitespace-only remarks as absent.
pub fn normalize_remarks(remarks: Option<String>) -> Option<String> {
    remarks
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
}
