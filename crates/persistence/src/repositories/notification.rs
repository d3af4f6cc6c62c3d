//! Notification repository for database operations.

use async_trait::async_trait;
use domain::models::{NewNotification, Notification};
use domain::services::NotificationStore;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{NotificationEntity, NotificationTypeDb};
use crate::metrics::QueryTimer;

/// Number of notifications shown in a student's inbox.
pub const INBOX_LIMIT: i64 = 50;

/// Repository for notification database operations.
#[derive(Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Creates a new NotificationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        notification: &NewNotification,
    ) -> Result<NotificationEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_notification");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            INSERT INTO notifications (student_id, type, title, message)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(notification.student_id)
        .bind(NotificationTypeDb::from(notification.notification_type))
        .bind(&notification.title)
        .bind(&notification.message)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Newest notifications for a student, up to `limit`.
    pub async fn list_for_student(
        &self,
        student_id: Uuid,
        limit: i64,
    ) -> Result<Vec<NotificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_student_notifications");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            SELECT * FROM notifications
            WHERE student_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(student_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Marks a notification read only if it belongs to the student.
    pub async fn mark_read(
        &self,
        id: Uuid,
        student_id: Uuid,
    ) -> Result<Option<NotificationEntity>, sqlx::Error> {
        let timer = QueryTimer::new("mark_notification_read");
        let result = sqlx::query_as::<_, NotificationEntity>(
            r#"
            UPDATE notifications
            SET read = TRUE
            WHERE id = $1 AND student_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn create_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<Notification, sqlx::Error> {
        Ok(self.create(notification).await?.into())
    }
}
