use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::handlers::AppointmentState;
use appointment_cell::router::appointment_routes;
use appointment_cell::services::store::AppointmentStore;
use doctor_cell::handlers::DoctorState;
use doctor_cell::router::doctor_routes;
use doctor_cell::services::registry::DoctorRegistry;
use notification_cell::handlers::NotificationState;
use notification_cell::router::notification_routes;
use notification_cell::services::producer::NotificationProducerService;
use notification_cell::services::queue::RedisNotificationQueue;
use review_cell::handlers::ReviewState;
use review_cell::router::review_routes;
use review_cell::services::review::ReviewStore;
use shared_config::AppConfig;

pub fn create_router(
    config: Arc<AppConfig>,
    registry: Arc<DoctorRegistry>,
    store: Arc<AppointmentStore>,
    reviews: Arc<ReviewStore>,
    notifications: Option<Arc<NotificationProducerService>>,
    queue: Option<Arc<RedisNotificationQueue>>,
) -> Router {
    let doctor_state = Arc::new(DoctorState {
        config: config.clone(),
        registry: registry.clone(),
    });

    let appointment_state = Arc::new(AppointmentState {
        config: config.clone(),
        registry,
        store: store.clone(),
        notifications,
    });

    let review_state = Arc::new(ReviewState {
        config: config.clone(),
        appointments: store,
        reviews,
    });

    let notification_state = Arc::new(NotificationState { config, queue });

    Router::new()
        .route("/", get(|| async { "CareBook API is running!" }))
        .nest("/doctors", doctor_routes(doctor_state))
        .nest("/appointments", appointment_routes(appointment_state))
        .nest("/reviews", review_routes(review_state))
        .nest("/notifications", notification_routes(notification_state))
}
