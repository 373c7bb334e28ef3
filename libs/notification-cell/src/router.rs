// libs/notification-cell/src/router.rs
use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use shared_utils::extractor::auth_middleware;

use crate::handlers::{self, NotificationState};

pub fn notification_routes(state: Arc<NotificationState>) -> Router {
    Router::new()
        .route("/stats", get(handlers::get_queue_stats))
        .layer(middleware::from_fn_with_state(
            state.config.clone(),
            auth_middleware,
        ))
        .with_state(state)
}
