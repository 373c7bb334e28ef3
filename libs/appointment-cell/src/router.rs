// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use shared_utils::extractor::auth_middleware;

use crate::handlers::{self, AppointmentState};

pub fn appointment_routes(state: Arc<AppointmentState>) -> Router {
    // All appointment operations require a caller identity.
    let protected_routes = Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/mine", get(handlers::get_my_appointments))
        .route("/confirmed", get(handlers::get_confirmed_appointments))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route("/{appointment_id}", delete(handlers::delete_appointment))
        .route("/{appointment_id}/confirm", post(handlers::confirm_appointment))
        .route("/{appointment_id}/complete", post(handlers::complete_visit))
        .layer(middleware::from_fn_with_state(
            state.config.clone(),
            auth_middleware,
        ));

    Router::new().merge(protected_routes).with_state(state)
}
