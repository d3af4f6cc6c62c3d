//! Attendance notifications.
//!
//! Writes return a list of [`NotificationIntent`]s; the [`NotificationDispatcher`]
//! turns them into inbox rows after the write has committed. Dispatch failures
//! are logged and counted, never returned.

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::attendance::AttendanceStatus;
use crate::models::notification::{NewNotification, NotificationType};
use crate::services::store::NotificationStore;

/// A pending notification produced by an attendance write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationIntent {
    pub student_id: Uuid,
    pub date: NaiveDate,
    pub notification_type: NotificationType,
}

impl NotificationIntent {
    /// Intent for a recorded status; `present` produces none.
    pub fn for_status(student_id: Uuid, date: NaiveDate, status: AttendanceStatus) -> Option<Self> {
        let notification_type = match status {
            AttendanceStatus::Absent => NotificationType::Absence,
            AttendanceStatus::Late => NotificationType::Late,
            AttendanceStatus::Present => return None,
        };
        Some(Self {
            student_id,
            date,
            notification_type,
        })
    }

    /// Builds the inbox row for this intent.
    pub fn to_notification(&self) -> NewNotification {
        let (title, message) = match self.notification_type {
            NotificationType::Absence => (
                "Absence Recorded".to_string(),
                absence_message(self.date),
            ),
            NotificationType::Late => ("Late Arrival Recorded".to_string(), late_message(self.date)),
            NotificationType::General => ("Attendance Update".to_string(), String::new()),
        };
        NewNotification {
            student_id: self.student_id,
            notification_type: self.notification_type,
            title,
            message,
        }
    }
}

/// Long-form date used in notification text, e.g. `Thursday, March 14, 2024`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn absence_message(date: NaiveDate) -> String {
    format!(
        "You were marked absent on {}. If you believe this is an error, please contact your instructor.",
        format_long_date(date)
    )
}

pub fn late_message(date: NaiveDate) -> String {
    format!(
        "You were marked late on {}. Please try to arrive on time for future classes.",
        format_long_date(date)
    )
}

/// Counts from one dispatch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub sent: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Delivers notification intents one at a time, in order.
#[derive(Clone)]
pub struct NotificationDispatcher {
    store: Arc<dyn NotificationStore>,
    enabled: bool,
}

impl NotificationDispatcher {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self {
            store,
            enabled: true,
        }
    }

    /// Dispatcher that records every intent as skipped.
    pub fn disabled(store: Arc<dyn NotificationStore>) -> Self {
        Self {
            store,
            enabled: false,
        }
    }

    pub fn with_enabled(store: Arc<dyn NotificationStore>, enabled: bool) -> Self {
        Self { store, enabled }
    }

    /// Attempts each intent once. A failure is logged and does not stop the
    /// remaining intents.
    pub async fn dispatch(&self, intents: &[NotificationIntent]) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();

        if !self.enabled {
            outcome.skipped = intents.len();
            if !intents.is_empty() {
                tracing::debug!(count = intents.len(), "Notifications disabled, skipping");
            }
            return outcome;
        }

        for intent in intents {
            let notification = intent.to_notification();
            match self.store.create_notification(&notification).await {
                Ok(created) => {
                    outcome.sent += 1;
                    tracing::debug!(
                        notification_id = %created.id,
                        student_id = %intent.student_id,
                        notification_type = %intent.notification_type,
                        "Notification created"
                    );
                }
                Err(e) => {
                    outcome.failed += 1;
                    tracing::warn!(
                        student_id = %intent.student_id,
                        date = %intent.date,
                        notification_type = %intent.notification_type,
                        error = %e,
                        "Failed to create attendance notification"
                    );
                }
            }
        }

        outcome
    }
}
