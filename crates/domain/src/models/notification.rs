//! Student notification domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notification type enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Absence,
    Late,
    General,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationType::Absence => write!(f, "absence"),
            NotificationType::Late => write!(f, "late"),
            NotificationType::General => write!(f, "general"),
        }
    }
}

/// A notification delivered to a student's inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub student_id: Uuid,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Values for a new notification row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub student_id: Uuid,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
}

/// Response listing a student's notifications.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListResponse {
    pub success: bool,
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}
