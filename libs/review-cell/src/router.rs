// libs/review-cell/src/router.rs
use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use shared_utils::extractor::auth_middleware;

use crate::handlers::{self, ReviewState};

pub fn review_routes(state: Arc<ReviewState>) -> Router {
    let protected_routes = Router::new()
        .route("/", post(handlers::submit_review))
        .route(
            "/appointments/{appointment_id}",
            get(handlers::get_review_for_appointment),
        )
        .route("/doctors/{doctor_name}", get(handlers::get_reviews_for_doctor))
        .layer(middleware::from_fn_with_state(
            state.config.clone(),
            auth_middleware,
        ));

    Router::new().merge(protected_routes).with_state(state)
}
