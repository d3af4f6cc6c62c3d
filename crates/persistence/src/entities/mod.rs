//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod admin;
pub mod attendance;
pub mod class;
pub mod dashboard;
pub mod enrollment;
pub mod notification;
pub mod student;

pub use admin::AdminEntity;
pub use attendance::{
    AttendanceEntity, AttendanceStatusDb, AttendanceWithStudentEntity, StatusTotalsEntity,
    StudentAttendanceEntity,
};
pub use class::{ClassEntity, ClassWithCountEntity};
pub use dashboard::{CourseCountEntity, RecentActivityEntity, StatusCountEntity};
pub use enrollment::{EnrolledStudentEntity, EnrollmentEntity};
pub use notification::{NotificationEntity, NotificationTypeDb};
pub use student::StudentEntity;
