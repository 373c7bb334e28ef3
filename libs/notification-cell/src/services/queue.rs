use chrono::Utc;
use deadpool_redis::{Config, Connection, Pool, Runtime};
use redis::AsyncCommands;
use tracing::{debug, info};
use uuid::Uuid;

use shared_config::AppConfig;

use crate::error::NotificationError;
use crate::models::{Notification, NotificationStatus, QueueStats};

const PENDING_QUEUE: &str = "notification_queue:pending";
const PROCESSING_QUEUE: &str = "notification_queue:processing";

pub struct RedisNotificationQueue {
    pool: Pool,
}

impl RedisNotificationQueue {
    pub async fn new(config: &AppConfig) -> Result<Self, NotificationError> {
        let redis_url = config
            .redis_url
            .clone()
            .unwrap_or_else(|| "redis://localhost:6379".to_string());

        let cfg = Config::from_url(redis_url);
        let pool = cfg.create_pool(Some(Runtime::Tokio1)).map_err(|e| {
            NotificationError::QueueError(format!("Failed to create Redis pool: {}", e))
        })?;

        // Fail fast if Redis is unreachable.
        let mut conn = pool.get().await.map_err(|e| {
            NotificationError::QueueError(format!("Failed to connect to Redis: {}", e))
        })?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;

        info!("Notification queue initialized");
        Ok(Self { pool })
    }

    async fn get_connection(&self) -> Result<Connection, NotificationError> {
        self.pool.get().await.map_err(|e| {
            NotificationError::QueueError(format!("Failed to get Redis connection: {}", e))
        })
    }

    fn notification_key(id: Uuid) -> String {
        format!("notification:{}", id)
    }

    pub async fn enqueue(&self, notification: &Notification) -> Result<(), NotificationError> {
        let mut conn = self.get_connection().await?;

        let data = serde_json::to_string(notification)?;
        let status = serde_json::to_string(&notification.status)?;
        let created_at = notification.created_at.to_rfc3339();
        let key = Self::notification_key(notification.id);

        let _: () = conn
            .hset_multiple(
                &key,
                &[
                    ("data", data.as_str()),
                    ("status", status.as_str()),
                    ("created_at", created_at.as_str()),
                ],
            )
            .await?;
        // Notifications expire after 7 days.
        let _: () = conn.expire(&key, 604800).await?;
        let _: () = conn.lpush(PENDING_QUEUE, notification.id.to_string()).await?;

        debug!("Notification {} enqueued", notification.id);
        Ok(())
    }

    /// Atomic move from pending to processing, blocking briefly when the
    /// queue is empty.
    pub async fn dequeue(&self) -> Result<Option<Notification>, NotificationError> {
        let mut conn = self.get_connection().await?;

        let id: Option<String> = conn
            .brpoplpush(PENDING_QUEUE, PROCESSING_QUEUE, 1.0)
            .await?;

        if let Some(id_str) = id {
            let key = format!("notification:{}", id_str);
            let data: Option<String> = conn.hget(&key, "data").await?;

            if let Some(data) = data {
                let notification: Notification = serde_json::from_str(&data)?;
                debug!("Notification {} dequeued", notification.id);
                return Ok(Some(notification));
            }
        }

        Ok(None)
    }

    pub async fn mark_sent(&self, id: Uuid) -> Result<(), NotificationError> {
        self.finish(id, NotificationStatus::Sent, None).await
    }

    pub async fn mark_failed(&self, id: Uuid, error: String) -> Result<(), NotificationError> {
        self.finish(id, NotificationStatus::Failed, Some(error)).await
    }

    async fn finish(
        &self,
        id: Uuid,
        status: NotificationStatus,
        error: Option<String>,
    ) -> Result<(), NotificationError> {
        let mut conn = self.get_connection().await?;
        let key = Self::notification_key(id);

        let data: Option<String> = conn.hget(&key, "data").await?;
        let Some(data) = data else {
            return Err(NotificationError::NotFound(id.to_string()));
        };

        let mut notification: Notification = serde_json::from_str(&data)?;
        notification.status = status;
        notification.updated_at = Utc::now();
        if notification.status == NotificationStatus::Sent {
            notification.sent_at = Some(notification.updated_at);
        }
        notification.error_message = error;

        let updated = serde_json::to_string(&notification)?;
        let status = serde_json::to_string(&notification.status)?;
        let _: () = conn
            .hset_multiple(
                &key,
                &[("data", updated.as_str()), ("status", status.as_str())],
            )
            .await?;
        let _: () = conn.lrem(PROCESSING_QUEUE, 0, id.to_string()).await?;

        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Notification>, NotificationError> {
        let mut conn = self.get_connection().await?;
        let data: Option<String> = conn.hget(Self::notification_key(id), "data").await?;

        match data {
            Some(data) => Ok(Some(serde_json::from_str(&data)?)),
            None => Ok(None),
        }
    }

    pub async fn stats(&self) -> Result<QueueStats, NotificationError> {
        let mut conn = self.get_connection().await?;
        let pending: u64 = conn.llen(PENDING_QUEUE).await?;
        let processing: u64 = conn.llen(PROCESSING_QUEUE).await?;

        Ok(QueueStats { pending, processing })
    }
}
