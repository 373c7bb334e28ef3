// libs/doctor-cell/src/router.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use shared_utils::extractor::auth_middleware;

use crate::handlers::{self, DoctorState};

pub fn doctor_routes(state: Arc<DoctorState>) -> Router {
    // Search is the one public surface; everything else requires a caller
    // identity.
    let public_routes = Router::new().route("/search", get(handlers::search_doctors));

    let protected_routes = Router::new()
        .route("/register", post(handlers::register_doctor))
        .route("/", get(handlers::list_doctors))
        .route("/{doctor_email}", get(handlers::get_doctor))
        .route("/{doctor_email}/schedule", put(handlers::update_schedule))
        .route("/{doctor_email}/approve", post(handlers::approve_doctor))
        .layer(middleware::from_fn_with_state(
            state.config.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
