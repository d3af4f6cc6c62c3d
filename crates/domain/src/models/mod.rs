//! Domain models for the attendance service.

pub mod admin;
pub mod attendance;
pub mod class;
pub mod dashboard;
pub mod enrollment;
pub mod notification;
pub mod report;
pub mod student;

pub use admin::Admin;
pub use attendance::{AttendanceRecord, AttendanceStatus, AttendanceUpsert};
pub use class::{Class, ClassWithCount};
pub use dashboard::DashboardStats;
pub use enrollment::{EnrolledStudent, Enrollment};
pub use notification::{NewNotification, Notification, NotificationType};
pub use report::{AttendanceReport, AttendanceSummary, ReportType};
pub use student::{Student, StudentFilter, StudentRef};
