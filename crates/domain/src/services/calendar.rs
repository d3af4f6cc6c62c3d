//! Calendar range helpers for reports and dashboard trends.
//!
//! All functions are pure and work on [`NaiveDate`] values, so boundary rules
//! are independent of time zones and clocks.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::report::ReportType;

/// Inclusive calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Returns true if `date` lies within the range, both ends included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Iterates every date in the range in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |d| *d <= end)
    }
}

/// Single-day range.
pub fn day_range(anchor: NaiveDate) -> DateRange {
    DateRange::new(anchor, anchor)
}

/// Monday through Sunday of the week containing `anchor`.
///
/// A Sunday anchor is the last day of the week that began the preceding Monday.
pub fn week_range(anchor: NaiveDate) -> DateRange {
    let offset = u64::from(anchor.weekday().num_days_from_monday());
    let monday = anchor - Days::new(offset);
    DateRange::new(monday, monday + Days::new(6))
}

/// First through last calendar day of the anchor's month.
pub fn month_range(anchor: NaiveDate) -> DateRange {
    let first = anchor.with_day(1).unwrap_or(anchor);
    let last = first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(anchor);
    DateRange::new(first, last)
}

/// Resolves the report range for a report type and anchor date.
pub fn range_for(report_type: ReportType, anchor: NaiveDate) -> DateRange {
    match report_type {
        ReportType::Daily => day_range(anchor),
        ReportType::Weekly => week_range(anchor),
        ReportType::Monthly => month_range(anchor),
    }
}

/// The `n` days ending on `end`, oldest first.
pub fn last_n_days(end: NaiveDate, n: u64) -> DateRange {
    let start = end - Days::new(n.saturating_sub(1));
    DateRange::new(start, end)
}
