use std::sync::Arc;

use tracing::info;

use crate::error::NotificationError;
use crate::models::Notification;
use crate::services::queue::RedisNotificationQueue;

pub struct NotificationProducerService {
    queue: Arc<RedisNotificationQueue>,
}

impl NotificationProducerService {
    pub fn new(queue: Arc<RedisNotificationQueue>) -> Self {
        Self { queue }
    }

    /// Ask a patient to confirm a tentative hold. Holds are optimistic, so a
    /// wasted prompt after a lost confirmation race is acceptable.
    pub async fn publish_confirmation_request(
        &self,
        recipient_email: &str,
        doctor_name: &str,
        day: &str,
        hour: &str,
    ) -> Result<Notification, NotificationError> {
        let notification =
            Notification::confirmation_request(recipient_email, doctor_name, day, hour);
        self.queue.enqueue(&notification).await?;

        info!(
            "Confirmation request queued for {} (notification {})",
            recipient_email, notification.id
        );
        Ok(notification)
    }

    pub async fn publish_review_prompt(
        &self,
        recipient_email: &str,
        doctor_name: &str,
    ) -> Result<Notification, NotificationError> {
        let notification = Notification::review_prompt(recipient_email, doctor_name);
        self.queue.enqueue(&notification).await?;

        info!(
            "Review prompt queued for {} (notification {})",
            recipient_email, notification.id
        );
        Ok(notification)
    }
}
