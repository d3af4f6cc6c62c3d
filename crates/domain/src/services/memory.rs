//! In-memory store used by the domain unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use fake::faker::internet::en::SafeEmail;
use fake::Fake;
use uuid::Uuid;

use crate::models::attendance::{AttendanceRecord, AttendanceUpsert};
use crate::models::notification::{NewNotification, Notification};
use crate::models::student::{Student, StudentFilter};
use crate::services::calendar::DateRange;
use crate::services::store::{AttendanceStore, NotificationStore, StudentStore};

/// Store backed by vectors, with switchable failure injection.
#[derive(Default)]
pub struct InMemoryStore {
    students: Mutex<Vec<Student>>,
    attendance: Mutex<Vec<AttendanceRecord>>,
    notifications: Mutex<Vec<Notification>>,
    fail_attendance_writes: AtomicBool,
    fail_attendance_reads: AtomicBool,
    fail_notifications: AtomicBool,
    attendance_write_calls: AtomicUsize,
}

/// Student with the given grouping and a generated code and email.
pub fn student_fixture(name: &str, course: &str, year: i32, section: &str) -> Student {
    let id = Uuid::new_v4();
    Student {
        id,
        student_code: format!("STU-{}", &id.simple().to_string()[..8]),
        name: name.to_string(),
        email: SafeEmail().fake(),
        course: course.to_string(),
        year,
        section: section.to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn injected(what: &str) -> sqlx::Error {
    sqlx::Error::Protocol(format!("injected {} failure", what))
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_student(&self, student: Student) -> Student {
        self.students.lock().unwrap().push(student.clone());
        student
    }

    pub fn attendance(&self) -> Vec<AttendanceRecord> {
        self.attendance.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn fail_attendance_writes(&self, fail: bool) {
        self.fail_attendance_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_attendance_reads(&self, fail: bool) {
        self.fail_attendance_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_notifications(&self, fail: bool) {
        self.fail_notifications.store(fail, Ordering::SeqCst);
    }

    /// Number of write calls that reached the store.
    pub fn attendance_write_calls(&self) -> usize {
        self.attendance_write_calls.load(Ordering::SeqCst)
    }

    fn apply(rows: &mut Vec<AttendanceRecord>, upsert: &AttendanceUpsert) -> AttendanceRecord {
        let now = Utc::now();
        let key = upsert.key();
        if let Some(row) = rows.iter_mut().find(|r| {
            r.student_id == key.student_id && r.date == key.date && r.class_id == key.class_id
        }) {
            row.status = upsert.status;
            row.remarks = upsert.remarks.clone();
            row.marked_by = upsert.marked_by;
            row.updated_at = now;
            return row.clone();
        }
        let row = AttendanceRecord {
            id: Uuid::new_v4(),
            student_id: upsert.student_id,
            date: upsert.date,
            status: upsert.status,
            remarks: upsert.remarks.clone(),
            class_id: upsert.class_id,
            marked_by: upsert.marked_by,
            created_at: now,
            updated_at: now,
        };
        rows.push(row.clone());
        row
    }
}

#[async_trait]
impl AttendanceStore for InMemoryStore {
    async fn upsert_attendance(
        &self,
        upsert: &AttendanceUpsert,
    ) -> Result<AttendanceRecord, sqlx::Error> {
        self.attendance_write_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_attendance_writes.load(Ordering::SeqCst) {
            return Err(injected("attendance write"));
        }
        let mut rows = self.attendance.lock().unwrap();
        Ok(Self::apply(&mut rows, upsert))
    }

    async fn upsert_attendance_batch(
        &self,
        upserts: &[AttendanceUpsert],
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        self.attendance_write_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_attendance_writes.load(Ordering::SeqCst) {
            return Err(injected("attendance batch"));
        }
        let mut rows = self.attendance.lock().unwrap();
        let mut staged = rows.clone();
        let written = upserts
            .iter()
            .map(|u| Self::apply(&mut staged, u))
            .collect();
        *rows = staged;
        Ok(written)
    }

    async fn find_attendance_in_range(
        &self,
        student_ids: &[Uuid],
        range: DateRange,
    ) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
        if self.fail_attendance_reads.load(Ordering::SeqCst) {
            return Err(injected("attendance read"));
        }
        Ok(self
            .attendance
            .lock()
            .unwrap()
            .iter()
            .filter(|r| student_ids.contains(&r.student_id) && range.contains(r.date))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl StudentStore for InMemoryStore {
    async fn find_students(&self, filter: &StudentFilter) -> Result<Vec<Student>, sqlx::Error> {
        let mut students: Vec<Student> = self
            .students
            .lock()
            .unwrap()
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect();
        students.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(students)
    }
}

#[async_trait]
impl NotificationStore for InMemoryStore {
    async fn create_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<Notification, sqlx::Error> {
        if self.fail_notifications.load(Ordering::SeqCst) {
            return Err(injected("notification"));
        }
        let created = Notification {
            id: Uuid::new_v4(),
            student_id: notification.student_id,
            notification_type: notification.notification_type,
            title: notification.title.clone(),
            message: notification.message.clone(),
            read: false,
            created_at: Utc::now(),
        };
        self.notifications.lock().unwrap().push(created.clone());
        Ok(created)
    }
}
