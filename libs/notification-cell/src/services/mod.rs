pub mod producer;
pub mod queue;
pub mod worker;

pub use producer::NotificationProducerService;
pub use queue::RedisNotificationQueue;
pub use worker::DeliveryWorker;
