// libs/notification-cell/src/handlers.rs
use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::services::queue::RedisNotificationQueue;

#[derive(Clone)]
pub struct NotificationState {
    pub config: Arc<AppConfig>,
    pub queue: Option<Arc<RedisNotificationQueue>>,
}

#[axum::debug_handler]
pub async fn get_queue_stats(
    State(state): State<Arc<NotificationState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    if user.role.as_deref() != Some("admin") {
        return Err(AppError::Forbidden(
            "Only administrators can view queue statistics".to_string(),
        ));
    }

    let Some(queue) = &state.queue else {
        return Ok(Json(json!({
            "success": true,
            "enabled": false,
            "message": "Notifications are disabled"
        })));
    };

    let stats = queue
        .stats()
        .await
        .map_err(|_| AppError::ExternalService("Notification queue unavailable".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "enabled": true,
        "stats": stats
    })))
}
