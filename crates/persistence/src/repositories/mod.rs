//! Repository implementations for database operations.

pub mod admin;
pub mod attendance;
pub mod class;
pub mod dashboard;
pub mod enrollment;
pub mod notification;
pub mod student;

pub use admin::AdminRepository;
pub use attendance::{AttendanceListFilter, AttendanceRepository};
pub use class::ClassRepository;
pub use dashboard::DashboardRepository;
pub use enrollment::EnrollmentRepository;
pub use notification::{NotificationRepository, INBOX_LIMIT};
pub use student::StudentRepository;
