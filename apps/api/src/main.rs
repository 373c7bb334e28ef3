use std::net::SocketAddr;
use std::sync::Arc;

use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use appointment_cell::services::reminders::ReminderService;
use appointment_cell::services::store::AppointmentStore;
use doctor_cell::services::registry::DoctorRegistry;
use notification_cell::services::producer::NotificationProducerService;
use notification_cell::services::queue::RedisNotificationQueue;
use notification_cell::services::worker::DeliveryWorker;
use review_cell::services::review::ReviewStore;
use shared_config::AppConfig;

#[tokio::main]
async fn main() {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CareBook API server");

    // Load configuration
    let config = Arc::new(AppConfig::from_env());

    // Shared stores: the single source of truth behind every cell.
    let registry = Arc::new(DoctorRegistry::new());
    let store = Arc::new(AppointmentStore::new());
    let reviews = Arc::new(ReviewStore::new());

    // Notifications are optional; the engine runs unchanged without them.
    let queue = match &config.redis_url {
        Some(_) => match RedisNotificationQueue::new(&config).await {
            Ok(queue) => Some(Arc::new(queue)),
            Err(e) => {
                warn!("Notification queue unavailable, notifications disabled: {}", e);
                None
            }
        },
        None => {
            info!("REDIS_URL not set, notifications disabled");
            None
        }
    };
    let notifications = queue
        .as_ref()
        .map(|queue| Arc::new(NotificationProducerService::new(queue.clone())));

    if let Some(queue) = &queue {
        let worker = DeliveryWorker::new(queue.clone());
        tokio::spawn(worker.run());
    }
    if let Some(producer) = &notifications {
        let reminders = ReminderService::new(store.clone(), producer.clone());
        tokio::spawn(reminders.run(config.reminder_interval_hours));
    }

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(
        config.clone(),
        registry,
        store,
        reviews,
        notifications,
        queue,
    )
    .layer(
        TraceLayer::new_for_http()
            .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
            .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
    )
    .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
