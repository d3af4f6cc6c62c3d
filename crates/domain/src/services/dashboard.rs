//! Dashboard aggregation over pre-counted attendance rows.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::attendance::AttendanceStatus;
use crate::models::dashboard::{TodayStats, TrendPoint};
use crate::services::calendar::DateRange;

/// Number of attendance rows with one status on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCount {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub count: i64,
}

/// Today's tallies; `not_marked` is clamped at zero when class-scoped rows
/// outnumber students.
pub fn today_stats(total_students: i64, counts: &[StatusCount]) -> TodayStats {
    let mut stats = TodayStats::default();
    for c in counts {
        match c.status {
            AttendanceStatus::Present => stats.present += c.count,
            AttendanceStatus::Absent => stats.absent += c.count,
            AttendanceStatus::Late => stats.late += c.count,
        }
    }
    let marked = stats.present + stats.absent + stats.late;
    stats.not_marked = (total_students - marked).max(0);
    stats
}

/// One point per day of `range`, oldest first, zero-filled.
pub fn weekly_trend(range: DateRange, counts: &[StatusCount]) -> Vec<TrendPoint> {
    let mut by_date: HashMap<NaiveDate, TrendPoint> = HashMap::new();
    for c in counts.iter().filter(|c| range.contains(c.date)) {
        let point = by_date.entry(c.date).or_insert(TrendPoint {
            date: c.date,
            present: 0,
            absent: 0,
            late: 0,
        });
        match c.status {
            AttendanceStatus::Present => point.present += c.count,
            AttendanceStatus::Absent => point.absent += c.count,
            AttendanceStatus::Late => point.late += c.count,
        }
    }

    range
        .days()
        .map(|date| {
            by_date.remove(&date).unwrap_or(TrendPoint {
                date,
                present: 0,
                absent: 0,
                late: 0,
            })
        })
        .collect()
}
