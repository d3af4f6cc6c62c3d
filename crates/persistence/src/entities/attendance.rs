//! Attendance entities (database row mapping).

use chrono::{DateTime, NaiveDate, Utc};
use domain::models::attendance::{
    AttendanceWithStudent, ClassRef, StudentAttendanceItem,
};
use domain::models::{AttendanceRecord, AttendanceStatus, AttendanceSummary, StudentRef};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for attendance_status that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "attendance_status", rename_all = "lowercase")]
pub enum AttendanceStatusDb {
    Present,
    Absent,
    Late,
}

impl From<AttendanceStatusDb> for AttendanceStatus {
    fn from(db: AttendanceStatusDb) -> Self {
        match db {
            AttendanceStatusDb::Present => AttendanceStatus::Present,
            AttendanceStatusDb::Absent => AttendanceStatus::Absent,
            AttendanceStatusDb::Late => AttendanceStatus::Late,
        }
    }
}

impl From<AttendanceStatus> for AttendanceStatusDb {
    fn from(status: AttendanceStatus) -> Self {
        match status {
            AttendanceStatus::Present => AttendanceStatusDb::Present,
            AttendanceStatus::Absent => AttendanceStatusDb::Absent,
            AttendanceStatus::Late => AttendanceStatusDb::Late,
        }
    }
}

/// Database row mapping for the attendance table.
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceEntity {
    pub id: Uuid,
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatusDb,
    pub remarks: Option<String>,
    pub class_id: Option<Uuid>,
    pub marked_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AttendanceEntity> for AttendanceRecord {
    fn from(entity: AttendanceEntity) -> Self {
        Self {
            id: entity.id,
            student_id: entity.student_id,
            date: entity.date,
            status: entity.status.into(),
            remarks: entity.remarks,
            class_id: entity.class_id,
            marked_by: entity.marked_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Attendance row joined with its student (`s_`-prefixed columns).
#[derive(Debug, Clone, FromRow)]
pub struct AttendanceWithStudentEntity {
    pub id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatusDb,
    pub remarks: Option<String>,
    pub class_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub s_id: Uuid,
    pub s_student_id: String,
    pub s_name: String,
    pub s_course: String,
    pub s_year: i32,
    pub s_section: String,
}

impl From<AttendanceWithStudentEntity> for AttendanceWithStudent {
    fn from(entity: AttendanceWithStudentEntity) -> Self {
        Self {
            id: entity.id,
            date: entity.date,
            status: entity.status.into(),
            remarks: entity.remarks,
            class_id: entity.class_id,
            created_at: entity.created_at,
            student: StudentRef {
                id: entity.s_id,
                student_code: entity.s_student_id,
                name: entity.s_name,
                course: entity.s_course,
                year: entity.s_year,
                section: entity.s_section,
            },
        }
    }
}

/// Attendance row with its class, if any (`c_`-prefixed columns).
#[derive(Debug, Clone, FromRow)]
pub struct StudentAttendanceEntity {
    pub id: Uuid,
    pub date: NaiveDate,
    pub status: AttendanceStatusDb,
    pub remarks: Option<String>,
    pub class_id: Option<Uuid>,
    pub c_name: Option<String>,
    pub c_code: Option<String>,
    pub c_subject: Option<String>,
}

impl From<StudentAttendanceEntity> for StudentAttendanceItem {
    fn from(entity: StudentAttendanceEntity) -> Self {
        let class = match (entity.class_id, entity.c_name, entity.c_code) {
            (Some(id), Some(name), Some(code)) => Some(ClassRef {
                id,
                name,
                code,
                subject: entity.c_subject,
            }),
            _ => None,
        };
        Self {
            id: entity.id,
            date: entity.date,
            status: entity.status.into(),
            remarks: entity.remarks,
            class_id: entity.class_id,
            class,
        }
    }
}

/// Per-status totals for a student's own history.
#[derive(Debug, Clone, Copy, Default, FromRow)]
pub struct StatusTotalsEntity {
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub total: i64,
}

impl From<StatusTotalsEntity> for AttendanceSummary {
    fn from(totals: StatusTotalsEntity) -> Self {
        let count = |n: i64| usize::try_from(n).unwrap_or(0);
        Self {
            present: count(totals.present),
            absent: count(totals.absent),
            late: count(totals.late),
            total: count(totals.total),
        }
    }
}
