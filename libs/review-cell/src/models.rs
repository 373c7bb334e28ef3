// libs/review-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub patient_email: String,
    pub doctor_name: String,
    pub review_text: String,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
}

/// Submission payload. Patient identity comes from the verified credential,
/// never from the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReviewRequest {
    pub appointment_id: Uuid,
    pub review_text: String,
    pub rating: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum ReviewError {
    #[error("Appointment not found")]
    AppointmentNotFound,

    #[error("Review not found")]
    NotFound,

    #[error("This appointment has already been reviewed")]
    DuplicateReview,

    #[error("Visit must be completed before it can be reviewed")]
    VisitNotCompleted,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Only the patient who attended the visit can review it")]
    Unauthorized,
}
