//! Domain services for attendance recording and reporting.
//!
//! Services contain business logic that operates on domain models and reach
//! storage only through the traits in [`store`].

pub mod attendance;
pub mod calendar;
pub mod dashboard;
pub mod notification;
pub mod report;
pub mod store;

#[cfg(test)]
pub mod memory;

pub use attendance::{AttendanceError, AttendanceRecorder, Recorded};
pub use calendar::DateRange;
pub use notification::{DispatchOutcome, NotificationDispatcher, NotificationIntent};
pub use report::ReportAggregator;
pub use store::{AttendanceStore, NotificationStore, StudentStore};
