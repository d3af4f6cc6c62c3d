//! Attendance report models.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::attendance::AttendanceStatus;
use super::student::{StudentFilter, StudentRef};
use crate::services::calendar::DateRange;

/// Report granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportType {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl ReportType {
    /// Parses a report type, treating anything unrecognised as daily.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "weekly" => ReportType::Weekly,
            "monthly" => ReportType::Monthly,
            _ => ReportType::Daily,
        }
    }
}

impl<'de> serde::Deserialize<'de> for ReportType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ReportType::parse_lenient(&s))
    }
}

/// Query parameters for the report endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(rename = "type", default)]
    pub report_type: ReportType,
    /// Anchor date; defaults to today.
    #[serde(default, deserialize_with = "shared::query::empty_as_none")]
    pub date: Option<NaiveDate>,
    pub course: Option<String>,
    #[serde(default, deserialize_with = "shared::query::empty_as_none")]
    pub year: Option<i32>,
    pub section: Option<String>,
}

impl ReportQuery {
    pub fn filter(&self) -> StudentFilter {
        StudentFilter {
            course: self.course.clone().filter(|c| !c.is_empty()),
            year: self.year,
            section: self.section.clone().filter(|s| !s.is_empty()),
        }
    }
}

/// Present/absent/late tallies over a set of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub total: usize,
}

impl AttendanceSummary {
    pub fn tally(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Late => self.late += 1,
        }
        self.total += 1;
    }

    /// Attendance rate for these tallies, see [`attendance_rate`].
    pub fn rate(&self) -> f64 {
        attendance_rate(self.present, self.late, self.total)
    }
}

/// `(present + late) / total × 100`, rounded to one decimal place; `0.0` when
/// there are no records.
pub fn attendance_rate(present: usize, late: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = (present + late) as f64 / total as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}

/// Status and remarks recorded for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayEntry {
    pub status: AttendanceStatus,
    pub remarks: Option<String>,
}

/// Per-student section of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentReport {
    pub student: StudentRef,
    /// At most one entry per date in range.
    pub attendance: BTreeMap<NaiveDate, DayEntry>,
    pub summary: AttendanceSummary,
    pub attendance_rate: f64,
}

/// Overall report statistics across all filtered students.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    pub total_students: usize,
    pub total_records: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
}

impl ReportStats {
    pub fn attendance_rate(&self) -> f64 {
        attendance_rate(self.present, self.late, self.total_records)
    }
}

/// Complete report: per-student summaries, overall stats and the resolved range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceReport {
    pub report: Vec<StudentReport>,
    pub stats: ReportStats,
    pub date_range: DateRange,
    #[serde(rename = "type")]
    pub report_type: ReportType,
}
