//! Attendance Recorder: validates submissions, upserts them and reports the
//! notifications the write calls for.

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::models::attendance::{
    normalize_remarks, AttendanceRecord, AttendanceUpsert, BulkAttendanceRequest,
    RecordAttendanceRequest,
};
use crate::services::notification::NotificationIntent;
use crate::services::store::AttendanceStore;

/// Upper bound on rows in one bulk submission.
pub const DEFAULT_MAX_BULK_RECORDS: usize = 500;

/// Errors from recording attendance.
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// Rejected before any store access.
    #[error("{0}")]
    Validation(String),

    #[error("attendance store failure: {0}")]
    Store(#[from] sqlx::Error),
}

impl From<validator::ValidationErrors> for AttendanceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
            })
            .collect();
        if messages.is_empty() {
            AttendanceError::Validation("Invalid attendance submission".to_string())
        } else {
            AttendanceError::Validation(messages.join(", "))
        }
    }
}

/// Result of a committed write plus the notifications it calls for.
#[derive(Debug, Clone)]
pub struct Recorded<T> {
    pub value: T,
    pub notifications: Vec<NotificationIntent>,
}

/// Writes single and bulk attendance submissions.
#[derive(Clone)]
pub struct AttendanceRecorder {
    store: Arc<dyn AttendanceStore>,
    max_bulk_records: usize,
}

impl AttendanceRecorder {
    pub fn new(store: Arc<dyn AttendanceStore>) -> Self {
        Self {
            store,
            max_bulk_records: DEFAULT_MAX_BULK_RECORDS,
        }
    }

    pub fn with_max_bulk_records(mut self, max: usize) -> Self {
        self.max_bulk_records = max;
        self
    }

    /// Upserts one mark keyed by (student, date, class).
    pub async fn record(
        &self,
        request: RecordAttendanceRequest,
        marked_by: Option<Uuid>,
    ) -> Result<Recorded<AttendanceRecord>, AttendanceError> {
        request.validate()?;

        let upsert = AttendanceUpsert {
            student_id: request.student_id,
            date: request.date,
            class_id: request.class_id,
            status: request.status,
            remarks: normalize_remarks(request.remarks),
            marked_by,
        };

        let record = self.store.upsert_attendance(&upsert).await?;

        tracing::info!(
            attendance_id = %record.id,
            student_id = %record.student_id,
            date = %record.date,
            status = %record.status,
            "Attendance recorded"
        );

        let notifications =
            NotificationIntent::for_status(record.student_id, record.date, record.status)
                .into_iter()
                .collect();

        Ok(Recorded {
            value: record,
            notifications,
        })
    }

    /// Upserts a whole roster as one unit and returns the number of rows written.
    ///
    /// Notification intents follow the submitted order.
    pub async fn record_bulk(
        &self,
        request: BulkAttendanceRequest,
        marked_by: Option<Uuid>,
    ) -> Result<Recorded<usize>, AttendanceError> {
        request.validate()?;

        if request.records.len() > self.max_bulk_records {
            return Err(AttendanceError::Validation(format!(
                "At most {} records may be submitted at once",
                self.max_bulk_records
            )));
        }

        let mut seen = HashSet::with_capacity(request.records.len());
        if let Some(dup) = request.records.iter().find(|r| !seen.insert(r.student_id)) {
            return Err(AttendanceError::Validation(format!(
                "Student {} appears more than once",
                dup.student_id
            )));
        }

        let upserts: Vec<AttendanceUpsert> = request
            .records
            .iter()
            .map(|entry| AttendanceUpsert {
                student_id: entry.student_id,
                date: request.date,
                class_id: request.class_id,
                status: entry.status,
                remarks: normalize_remarks(entry.remarks.clone()),
                marked_by,
            })
            .collect();

        let written = self.store.upsert_attendance_batch(&upserts).await?;

        tracing::info!(
            date = %request.date,
            class_id = ?request.class_id,
            count = written.len(),
            "Bulk attendance recorded"
        );

        let notifications = request
            .records
            .iter()
            .filter_map(|entry| {
                NotificationIntent::for_status(entry.student_id, request.date, entry.status)
            })
            .collect();

        Ok(Recorded {
            value: written.len(),
            notifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::{AttendanceStatus, BulkAttendanceEntry};
    use crate::models::notification::NotificationType;
    use crate::services::memory::InMemoryStore;
    use crate::services::notification::NotificationDispatcher;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn single(student_id: Uuid, status: AttendanceStatus, remarks: Option<&str>) -> RecordAttendanceRequest {
        RecordAttendanceRequest {
            student_id,
            date: date("2024-03-14"),
            status,
            remarks: remarks.map(String::from),
            class_id: None,
        }
    }

    fn entry(student_id: Uuid, status: AttendanceStatus) -> BulkAttendanceEntry {
        BulkAttendanceEntry {
            student_id,
            status,
            remarks: None,
        }
    }

    #[tokio::test]
    async fn test_record_twice_keeps_second_write() {
        let store = Arc::new(InMemoryStore::new());
        let recorder = AttendanceRecorder::new(store.clone());
        let student = Uuid::new_v4();

        recorder
            .record(single(student, AttendanceStatus::Present, Some("first")), None)
            .await
            .unwrap();
        let second = recorder
            .record(single(student, AttendanceStatus::Present, Some("second")), None)
            .await
            .unwrap();

        let rows = store.attendance();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].remarks.as_deref(), Some("second"));
        assert_eq!(second.value.id, rows[0].id);
    }

    #[tokio::test]
    async fn test_record_overwrites_status_and_marker() {
        let store = Arc::new(InMemoryStore::new());
        let recorder = AttendanceRecorder::new(store.clone());
        let student = Uuid::new_v4();
        let admin = Uuid::new_v4();

        recorder
            .record(single(student, AttendanceStatus::Absent, Some("no show")), None)
            .await
            .unwrap();
        recorder
            .record(single(student, AttendanceStatus::Late, None), Some(admin))
            .await
            .unwrap();

        let rows = store.attendance();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, AttendanceStatus::Late);
        assert_eq!(rows[0].remarks, None);
        assert_eq!(rows[0].marked_by, Some(admin));
    }

    #[tokio::test]
    async fn test_class_scoped_marks_are_kept_apart() {
        let store = Arc::new(InMemoryStore::new());
        let recorder = AttendanceRecorder::new(store.clone());
        let student = Uuid::new_v4();

        let mut math = single(student, AttendanceStatus::Present, None);
        math.class_id = Some(Uuid::new_v4());
        let mut art = single(student, AttendanceStatus::Absent, None);
        art.class_id = Some(Uuid::new_v4());

        recorder.record(math, None).await.unwrap();
        recorder.record(art, None).await.unwrap();
        recorder
            .record(single(student, AttendanceStatus::Late, None), None)
            .await
            .unwrap();

        assert_eq!(store.attendance().len(), 3);
    }

    #[tokio::test]
    async fn test_single_record_intents() {
        let store = Arc::new(InMemoryStore::new());
        let recorder = AttendanceRecorder::new(store);

        let present = recorder
            .record(single(Uuid::new_v4(), AttendanceStatus::Present, None), None)
            .await
            .unwrap();
        let absent = recorder
            .record(single(Uuid::new_v4(), AttendanceStatus::Absent, None), None)
            .await
            .unwrap();

        assert!(present.notifications.is_empty());
        assert_eq!(absent.notifications.len(), 1);
        assert_eq!(
            absent.notifications[0].notification_type,
            NotificationType::Absence
        );
    }

    #[tokio::test]
    async fn test_bulk_notifies_absent_and_late_only() {
        let store = Arc::new(InMemoryStore::new());
        let recorder = AttendanceRecorder::new(store.clone());
        let dispatcher = NotificationDispatcher::new(store.clone());
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        let recorded = recorder
            .record_bulk(
                BulkAttendanceRequest {
                    date: date("2024-03-14"),
                    class_id: None,
                    records: vec![
                        entry(a, AttendanceStatus::Present),
                        entry(b, AttendanceStatus::Absent),
                        entry(c, AttendanceStatus::Late),
                    ],
                },
                None,
            )
            .await
            .unwrap();
        assert_eq!(recorded.value, 3);

        let outcome = dispatcher.dispatch(&recorded.notifications).await;
        assert_eq!(outcome.sent, 2);

        let notifications = store.notifications();
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[0].student_id, b);
        assert_eq!(notifications[0].notification_type, NotificationType::Absence);
        assert_eq!(notifications[1].student_id, c);
        assert_eq!(notifications[1].notification_type, NotificationType::Late);
    }

    #[tokio::test]
    async fn test_bulk_store_failure_commits_nothing() {
        let store = Arc::new(InMemoryStore::new());
        let recorder = AttendanceRecorder::new(store.clone());
        let existing = Uuid::new_v4();
        recorder
            .record(single(existing, AttendanceStatus::Present, None), None)
            .await
            .unwrap();
        let before = store.attendance();

        store.fail_attendance_writes(true);
        let result = recorder
            .record_bulk(
                BulkAttendanceRequest {
                    date: date("2024-03-14"),
                    class_id: None,
                    records: vec![
                        entry(existing, AttendanceStatus::Absent),
                        entry(Uuid::new_v4(), AttendanceStatus::Late),
                    ],
                },
                None,
            )
            .await;

        assert!(matches!(result, Err(AttendanceError::Store(_))));
        assert_eq!(store.attendance(), before);
        assert!(store.notifications().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_rejects_empty_records_before_store() {
        let store = Arc::new(InMemoryStore::new());
        store.fail_attendance_writes(true);
        let recorder = AttendanceRecorder::new(store.clone());

        let result = recorder
            .record_bulk(
                BulkAttendanceRequest {
                    date: date("2024-03-14"),
                    class_id: None,
                    records: vec![],
                },
                None,
            )
            .await;

        assert!(matches!(result, Err(AttendanceError::Validation(_))));
        assert_eq!(store.attendance_write_calls(), 0);
    }

    #[tokio::test]
    async fn test_bulk_rejects_duplicate_students() {
        let store = Arc::new(InMemoryStore::new());
        let recorder = AttendanceRecorder::new(store.clone());
        let student = Uuid::new_v4();

        let result = recorder
            .record_bulk(
                BulkAttendanceRequest {
                    date: date("2024-03-14"),
                    class_id: None,
                    records: vec![
                        entry(student, AttendanceStatus::Present),
                        entry(student, AttendanceStatus::Absent),
                    ],
                },
                None,
            )
            .await;

        assert!(matches!(result, Err(AttendanceError::Validation(_))));
        assert!(store.attendance().is_empty());
    }

    #[tokio::test]
    async fn test_bulk_rejects_oversized_batch() {
        let store = Arc::new(InMemoryStore::new());
        let recorder = AttendanceRecorder::new(store.clone()).with_max_bulk_records(2);

        let result = recorder
            .record_bulk(
                BulkAttendanceRequest {
                    date: date("2024-03-14"),
                    class_id: None,
                    records: (0..3)
                        .map(|_| entry(Uuid::new_v4(), AttendanceStatus::Present))
                        .collect(),
                },
                None,
            )
            .await;

        assert!(matches!(result, Err(AttendanceError::Validation(_))));
        assert_eq!(store.attendance_write_calls(), 0);
    }

    #[tokio::test]
    async fn test_bulk_resubmission_overwrites() {
        let store = Arc::new(InMemoryStore::new());
        let recorder = AttendanceRecorder::new(store.clone());
        let class_id = Some(Uuid::new_v4());
        let student = Uuid::new_v4();

        for status in [AttendanceStatus::Absent, AttendanceStatus::Present] {
            recorder
                .record_bulk(
                    BulkAttendanceRequest {
                        date: date("2024-03-14"),
                        class_id,
                        records: vec![entry(student, status)],
                    },
                    None,
                )
                .await
                .unwrap();
        }

        let rows = store.attendance();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, AttendanceStatus::Present);
        assert_eq!(rows[0].class_id, class_id);
    }

    #[tokio::test]
    async fn test_single_store_failure_yields_no_intents() {
        let store = Arc::new(InMemoryStore::new());
        store.fail_attendance_writes(true);
        let recorder = AttendanceRecorder::new(store.clone());

        let result = recorder
            .record(single(Uuid::new_v4(), AttendanceStatus::Absent, None), None)
            .await;

        assert!(matches!(result, Err(AttendanceError::Store(_))));
        assert!(store.attendance().is_empty());
    }

    #[tokio::test]
    async fn test_remarks_too_long_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let recorder = AttendanceRecorder::new(store.clone());
        let long = "x".repeat(501);

        let result = recorder
            .record(single(Uuid::new_v4(), AttendanceStatus::Present, Some(&long)), None)
            .await;

        assert!(matches!(result, Err(AttendanceError::Validation(_))));
        assert_eq!(store.attendance_write_calls(), 0);
    }
}
