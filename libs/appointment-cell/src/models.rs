// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use doctor_cell::models::{Doctor, Hour, Weekday};
use shared_models::auth::User;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub doctor_email: String,
    pub doctor_name: String,
    pub patient_email: String,
    pub patient_name: String,
    pub day: Weekday,
    pub hour: Hour,
    pub area_of_interest: String,
    pub status: AppointmentStatus,
    pub visit_status: VisitStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Create a tentative hold on a slot, denormalizing the doctor fields so
    /// later profile edits never rewrite historical appointments.
    pub fn hold(doctor: &Doctor, patient_email: &str, patient_name: &str, day: Weekday, hour: Hour) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            doctor_email: doctor.email.clone(),
            doctor_name: doctor.name.clone(),
            patient_email: patient_email.to_string(),
            patient_name: patient_name.to_string(),
            day,
            hour,
            area_of_interest: doctor.area_of_interest.clone(),
            status: AppointmentStatus::NotConfirmed,
            visit_status: VisitStatus::NotCompleted,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn occupies(&self, doctor_email: &str, day: Weekday, hour: Hour) -> bool {
        self.doctor_email == doctor_email && self.day == day && self.hour == hour
    }

    /// Combined state label used in transition error messages.
    pub fn state_label(&self) -> &'static str {
        match (&self.status, &self.visit_status) {
            (AppointmentStatus::NotConfirmed, _) => "not confirmed",
            (AppointmentStatus::Confirmed, VisitStatus::NotCompleted) => "confirmed",
            (AppointmentStatus::Confirmed, VisitStatus::Completed) => "completed",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    NotConfirmed,
    Confirmed,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::NotConfirmed => write!(f, "not_confirmed"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// Only meaningful once the appointment is confirmed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisitStatus {
    NotCompleted,
    Completed,
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisitStatus::NotCompleted => write!(f, "not_completed"),
            VisitStatus::Completed => write!(f, "completed"),
        }
    }
}

// ==============================================================================
// ACTOR / CAPABILITY MODELS
// ==============================================================================

/// Caller identity for lifecycle operations, derived from the verified
/// credential. Ownership is decided by matching the appointment's own
/// emails, never the endpoint that was called.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub email: String,
    pub name: String,
    pub role: ActorRole,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActorRole {
    Patient,
    Doctor,
    Admin,
}

impl Actor {
    pub fn from_user(user: &User) -> Result<Self, AppointmentError> {
        let email = user.email.clone().ok_or(AppointmentError::Unauthorized)?;
        let name = user.name.clone().unwrap_or_else(|| email.clone());
        let role = match user.role.as_deref() {
            Some("admin") => ActorRole::Admin,
            Some("doctor") => ActorRole::Doctor,
            // Unknown roles get the least-privileged treatment.
            _ => ActorRole::Patient,
        };

        Ok(Self { email, name, role })
    }

    pub fn is_admin(&self) -> bool {
        self.role == ActorRole::Admin
    }

    pub fn owns_as_patient(&self, appointment: &Appointment) -> bool {
        self.role == ActorRole::Patient && self.email == appointment.patient_email
    }

    pub fn owns_as_doctor(&self, appointment: &Appointment) -> bool {
        self.role == ActorRole::Doctor && self.email == appointment.doctor_email
    }
}

/// The actions of the appointment state machine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleAction {
    Confirm,
    Delete,
    CompleteVisit,
    SubmitReview,
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleAction::Confirm => write!(f, "confirm"),
            LifecycleAction::Delete => write!(f, "delete"),
            LifecycleAction::CompleteVisit => write!(f, "complete_visit"),
            LifecycleAction::SubmitReview => write!(f, "submit_review"),
        }
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// Booking payload. Patient identity comes from the verified credential,
/// never from the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub doctor_email: String,
    pub day: String,
    pub hour: String,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Doctor not found")]
    DoctorNotFound,

    #[error("Doctor is not currently accepting bookings")]
    DoctorNotAvailable,

    #[error("Requested slot is not in the doctor's declared availability")]
    InvalidSlot,

    #[error("Slot already has a confirmed booking")]
    Conflict,

    #[error("Cannot {action} an appointment that is {state}")]
    InvalidTransition {
        action: LifecycleAction,
        state: String,
    },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized access to appointment")]
    Unauthorized,
}
