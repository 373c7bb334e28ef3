use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Queue operation failed: {0}")]
    QueueError(String),

    #[error("Notification not found: {0}")]
    NotFound(String),

    #[error("Redis connection error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
