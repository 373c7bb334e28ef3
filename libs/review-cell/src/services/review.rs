// libs/review-cell/src/services/review.rs
use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use appointment_cell::models::{Actor, AppointmentError, LifecycleAction};
use appointment_cell::services::lifecycle::AppointmentLifecycleService;
use appointment_cell::services::store::AppointmentStore;

use crate::models::{Review, ReviewError, SubmitReviewRequest, MAX_RATING, MIN_RATING};

/// Reviews keyed by appointment id; the key is what enforces
/// at-most-one-review-per-appointment, checked and inserted under a single
/// write lock.
pub struct ReviewStore {
    inner: RwLock<HashMap<Uuid, Review>>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    async fn insert_new(&self, review: Review) -> Result<Review, ReviewError> {
        let mut reviews = self.inner.write().await;
        if reviews.contains_key(&review.appointment_id) {
            return Err(ReviewError::DuplicateReview);
        }
        reviews.insert(review.appointment_id, review.clone());
        Ok(review)
    }

    pub async fn for_appointment(&self, appointment_id: Uuid) -> Option<Review> {
        let reviews = self.inner.read().await;
        reviews.get(&appointment_id).cloned()
    }

    pub async fn for_doctor(&self, doctor_name: &str) -> Vec<Review> {
        let reviews = self.inner.read().await;
        let mut results: Vec<Review> = reviews
            .values()
            .filter(|review| review.doctor_name == doctor_name)
            .cloned()
            .collect();
        results.sort_by_key(|review| review.created_at);
        results
    }
}

impl Default for ReviewStore {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ReviewService {
    appointments: Arc<AppointmentStore>,
    reviews: Arc<ReviewStore>,
    lifecycle: AppointmentLifecycleService,
}

impl ReviewService {
    pub fn new(appointments: Arc<AppointmentStore>, reviews: Arc<ReviewStore>) -> Self {
        Self {
            appointments,
            reviews,
            lifecycle: AppointmentLifecycleService::new(),
        }
    }

    /// Submit a review for a completed visit. Rejects out-of-range ratings,
    /// empty text, unfinished visits, non-owners and duplicates; nothing is
    /// written on any failure path.
    pub async fn submit_review(
        &self,
        request: SubmitReviewRequest,
        actor: &Actor,
    ) -> Result<Review, ReviewError> {
        debug!(
            "Review submission for appointment {} by {}",
            request.appointment_id, actor.email
        );

        if request.rating < MIN_RATING || request.rating > MAX_RATING {
            return Err(ReviewError::ValidationError(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let review_text = request.review_text.trim();
        if review_text.is_empty() {
            return Err(ReviewError::ValidationError(
                "Review text must not be empty".to_string(),
            ));
        }

        let appointment = self
            .appointments
            .get(request.appointment_id)
            .await
            .map_err(|_| ReviewError::AppointmentNotFound)?;

        self.lifecycle
            .authorize(actor, &appointment, LifecycleAction::SubmitReview)
            .map_err(|_| ReviewError::Unauthorized)?;

        self.lifecycle
            .validate_action(&appointment, LifecycleAction::SubmitReview)
            .map_err(|e| match e {
                AppointmentError::InvalidTransition { .. } => ReviewError::VisitNotCompleted,
                _ => ReviewError::ValidationError(e.to_string()),
            })?;

        let review = Review {
            id: Uuid::new_v4(),
            appointment_id: appointment.id,
            patient_email: appointment.patient_email.clone(),
            doctor_name: appointment.doctor_name.clone(),
            review_text: review_text.to_string(),
            rating: request.rating,
            created_at: Utc::now(),
        };

        let stored = self.reviews.insert_new(review).await;
        match &stored {
            Ok(review) => info!(
                "Review {} stored for appointment {}",
                review.id, review.appointment_id
            ),
            Err(_) => warn!(
                "Duplicate review rejected for appointment {}",
                request.appointment_id
            ),
        }

        stored
    }

    pub async fn review_for_appointment(
        &self,
        appointment_id: Uuid,
    ) -> Result<Review, ReviewError> {
        self.reviews
            .for_appointment(appointment_id)
            .await
            .ok_or(ReviewError::NotFound)
    }

    pub async fn reviews_for_doctor(&self, doctor_name: &str) -> Vec<Review> {
        self.reviews.for_doctor(doctor_name).await
    }
}
