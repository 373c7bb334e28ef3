use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::NotificationError;
use crate::models::Notification;
use crate::services::queue::RedisNotificationQueue;

/// Drains the notification queue and hands each message to the delivery
/// transport. Delivery here is log-based; the real transport (email, push)
/// sits outside this repository.
pub struct DeliveryWorker {
    queue: Arc<RedisNotificationQueue>,
    worker_id: String,
}

impl DeliveryWorker {
    pub fn new(queue: Arc<RedisNotificationQueue>) -> Self {
        Self {
            queue,
            worker_id: format!("delivery-worker-{}", Uuid::new_v4()),
        }
    }

    pub async fn run(self) {
        info!("Delivery worker {} started", self.worker_id);

        loop {
            match self.process_one().await {
                Ok(true) => {}
                Ok(false) => {
                    // Queue empty; brpoplpush already waited, back off a little.
                    tokio::time::sleep(Duration::from_millis(200)).await;
                }
                Err(e) => {
                    warn!("Delivery worker {} error: {}", self.worker_id, e);
                    tokio::time::sleep(Duration::from_secs(5)).await;
                }
            }
        }
    }

    /// Deliver at most one queued notification. Returns whether a message
    /// was processed.
    pub async fn process_one(&self) -> Result<bool, NotificationError> {
        let Some(notification) = self.queue.dequeue().await? else {
            return Ok(false);
        };

        match self.deliver(&notification).await {
            Ok(()) => {
                self.queue.mark_sent(notification.id).await?;
                debug!("Notification {} delivered", notification.id);
            }
            Err(e) => {
                warn!("Notification {} delivery failed: {}", notification.id, e);
                self.queue.mark_failed(notification.id, e.to_string()).await?;
            }
        }

        Ok(true)
    }

    async fn deliver(&self, notification: &Notification) -> Result<(), NotificationError> {
        info!(
            "Delivering to {}: {}",
            notification.recipient_email, notification.message
        );
        Ok(())
    }
}
