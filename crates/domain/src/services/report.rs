//! Report Aggregator.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::models::attendance::{AttendanceRecord, AttendanceStatus};
use crate::models::report::{
    AttendanceReport, AttendanceSummary, DayEntry, ReportQuery, ReportStats, ReportType,
    StudentReport,
};
use crate::models::student::{Student, StudentRef};
use crate::services::calendar::{range_for, DateRange};
use crate::services::store::{AttendanceStore, StudentStore};

/// Builds attendance reports from the roster and attendance stores.
#[derive(Clone)]
pub struct ReportAggregator {
    students: Arc<dyn StudentStore>,
    attendance: Arc<dyn AttendanceStore>,
}

impl ReportAggregator {
    pub fn new(students: Arc<dyn StudentStore>, attendance: Arc<dyn AttendanceStore>) -> Self {
        Self {
            students,
            attendance,
        }
    }

    /// Generates a report; `today` is used when the query carries no date.
    pub async fn generate(
        &self,
        query: &ReportQuery,
        today: NaiveDate,
    ) -> Result<AttendanceReport, sqlx::Error> {
        let anchor = query.date.unwrap_or(today);
        let range = range_for(query.report_type, anchor);

        let students = self.students.find_students(&query.filter()).await?;
        let ids: Vec<Uuid> = students.iter().map(|s| s.id).collect();

        let records = if ids.is_empty() {
            Vec::new()
        } else {
            self.attendance.find_attendance_in_range(&ids, range).await?
        };

        tracing::debug!(
            report_type = ?query.report_type,
            start = %range.start_date,
            end = %range.end_date,
            students = students.len(),
            records = records.len(),
            "Aggregating attendance report"
        );

        Ok(build_report(query.report_type, range, &students, &records))
    }
}

/// Aggregates already-fetched rows into a report.
///
/// Every student appears, in the given order, even with no rows. When several
/// class-scoped rows share a date, the most recently updated one fills that
/// day's entry and the student's summary. Overall stats count every row in
/// range that belongs to a listed student.
pub fn build_report(
    report_type: ReportType,
    range: DateRange,
    students: &[Student],
    records: &[AttendanceRecord],
) -> AttendanceReport {
    let mut by_student: HashMap<Uuid, BTreeMap<NaiveDate, (DateTime<Utc>, DayEntry)>> =
        students.iter().map(|s| (s.id, BTreeMap::new())).collect();
    let mut stats = ReportStats {
        total_students: students.len(),
        ..ReportStats::default()
    };

    for record in records.iter().filter(|r| range.contains(r.date)) {
        let Some(days) = by_student.get_mut(&record.student_id) else {
            continue;
        };

        stats.total_records += 1;
        match record.status {
            AttendanceStatus::Present => stats.present += 1,
            AttendanceStatus::Absent => stats.absent += 1,
            AttendanceStatus::Late => stats.late += 1,
        }

        let entry = DayEntry {
            status: record.status,
            remarks: record.remarks.clone(),
        };
        match days.get(&record.date) {
            Some((updated_at, _)) if *updated_at > record.updated_at => {}
            _ => {
                days.insert(record.date, (record.updated_at, entry));
            }
        }
    }

    let report = students
        .iter()
        .map(|student| {
            let attendance: BTreeMap<NaiveDate, DayEntry> = by_student
                .remove(&student.id)
                .unwrap_or_default()
                .into_iter()
                .map(|(date, (_, entry))| (date, entry))
                .collect();
            let mut summary = AttendanceSummary::default();
            for entry in attendance.values() {
                summary.tally(entry.status);
            }
            StudentReport {
                student: StudentRef::from(student),
                attendance,
                attendance_rate: summary.rate(),
                summary,
            }
        })
        .collect();

    AttendanceReport {
        report,
        stats,
        date_range: range,
        report_type,
    }
}
