//! Domain layer for the attendance service.
//!
//! This crate contains:
//! - Domain models (Student, Class, Enrollment, Attendance, Notification, reports)
//! - Store traits implemented by the persistence layer
//! - The Attendance Recorder, notification dispatcher and Report Aggregator

pub mod models;
pub mod services;
