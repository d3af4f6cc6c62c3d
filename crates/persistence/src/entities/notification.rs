//! Notification entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{Notification, NotificationType};
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for notification_type that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "notification_type", rename_all = "lowercase")]
pub enum NotificationTypeDb {
    Absence,
    Late,
    General,
}

impl From<NotificationTypeDb> for NotificationType {
    fn from(db: NotificationTypeDb) -> Self {
        match db {
            NotificationTypeDb::Absence => NotificationType::Absence,
            NotificationTypeDb::Late => NotificationType::Late,
            NotificationTypeDb::General => NotificationType::General,
        }
    }
}

impl From<NotificationType> for NotificationTypeDb {
    fn from(kind: NotificationType) -> Self {
        match kind {
            NotificationType::Absence => NotificationTypeDb::Absence,
            NotificationType::Late => NotificationTypeDb::Late,
            NotificationType::General => NotificationTypeDb::General,
        }
    }
}

/// Database row mapping for the notifications table.
#[derive(Debug, Clone, FromRow)]
pub struct NotificationEntity {
    pub id: Uuid,
    pub student_id: Uuid,
    #[sqlx(rename = "type")]
    pub notification_type: NotificationTypeDb,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<NotificationEntity> for Notification {
    fn from(entity: NotificationEntity) -> Self {
        Self {
            id: entity.id,
            student_id: entity.student_id,
            notification_type: entity.notification_type.into(),
            title: entity.title,
            message: entity.message,
            read: entity.read,
            created_at: entity.created_at,
        }
    }
}
