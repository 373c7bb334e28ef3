// libs/review-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use appointment_cell::models::Actor;
use appointment_cell::services::store::AppointmentStore;
use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{ReviewError, SubmitReviewRequest};
use crate::services::review::{ReviewService, ReviewStore};

#[derive(Clone)]
pub struct ReviewState {
    pub config: Arc<AppConfig>,
    pub appointments: Arc<AppointmentStore>,
    pub reviews: Arc<ReviewStore>,
}

fn map_review_error(e: ReviewError) -> AppError {
    match e {
        ReviewError::AppointmentNotFound => {
            AppError::NotFound("Appointment not found".to_string())
        }
        ReviewError::NotFound => AppError::NotFound("Review not found".to_string()),
        ReviewError::DuplicateReview => {
            AppError::Conflict("This appointment has already been reviewed".to_string())
        }
        ReviewError::VisitNotCompleted => AppError::BadRequest(
            "Visit must be completed before it can be reviewed".to_string(),
        ),
        ReviewError::ValidationError(msg) => AppError::ValidationError(msg),
        ReviewError::Unauthorized => AppError::Forbidden(
            "Only the patient who attended the visit can review it".to_string(),
        ),
    }
}

fn service(state: &ReviewState) -> ReviewService {
    ReviewService::new(state.appointments.clone(), state.reviews.clone())
}

#[axum::debug_handler]
pub async fn submit_review(
    State(state): State<Arc<ReviewState>>,
    Extension(user): Extension<User>,
    Json(request): Json<SubmitReviewRequest>,
) -> Result<Json<Value>, AppError> {
    let actor = Actor::from_user(&user)
        .map_err(|_| AppError::Auth("Credential is missing an email address".to_string()))?;

    let review = service(&state)
        .submit_review(request, &actor)
        .await
        .map_err(map_review_error)?;

    Ok(Json(json!({
        "success": true,
        "review": review,
        "message": "Review submitted successfully"
    })))
}

#[axum::debug_handler]
pub async fn get_review_for_appointment(
    State(state): State<Arc<ReviewState>>,
    Path(appointment_id): Path<Uuid>,
    Extension(_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let review = service(&state)
        .review_for_appointment(appointment_id)
        .await
        .map_err(map_review_error)?;

    Ok(Json(json!({
        "success": true,
        "review": review
    })))
}

#[axum::debug_handler]
pub async fn get_reviews_for_doctor(
    State(state): State<Arc<ReviewState>>,
    Path(doctor_name): Path<String>,
    Extension(_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let reviews = service(&state).reviews_for_doctor(&doctor_name).await;

    Ok(Json(json!({
        "success": true,
        "reviews": reviews
    })))
}
