// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use doctor_cell::models::{Hour, Weekday};
use doctor_cell::services::registry::DoctorRegistry;
use notification_cell::services::producer::NotificationProducerService;
use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{Actor, Appointment, AppointmentError, BookAppointmentRequest};
use crate::services::booking::BookingCoordinator;
use crate::services::store::AppointmentStore;

/// Shared state for the appointment cell. The store is the single source of
/// truth for appointment state; notifications are optional and never gate
/// an engine operation.
#[derive(Clone)]
pub struct AppointmentState {
    pub config: Arc<AppConfig>,
    pub registry: Arc<DoctorRegistry>,
    pub store: Arc<AppointmentStore>,
    pub notifications: Option<Arc<NotificationProducerService>>,
}

fn map_appointment_error(e: AppointmentError) -> AppError {
    match e {
        AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        AppointmentError::DoctorNotFound => AppError::NotFound("Doctor not found".to_string()),
        AppointmentError::DoctorNotAvailable => {
            AppError::NotFound("Doctor is not currently accepting bookings".to_string())
        }
        AppointmentError::InvalidSlot => AppError::BadRequest(
            "Requested slot is not in the doctor's declared availability".to_string(),
        ),
        AppointmentError::Conflict => {
            AppError::Conflict("Slot already has a confirmed booking".to_string())
        }
        AppointmentError::InvalidTransition { action, state } => {
            AppError::Conflict(format!("Cannot {} an appointment that is {}", action, state))
        }
        AppointmentError::ValidationError(msg) => AppError::BadRequest(msg),
        AppointmentError::Unauthorized => {
            AppError::Forbidden("Not authorized to act on this appointment".to_string())
        }
    }
}

fn actor_from(user: &User) -> Result<Actor, AppError> {
    Actor::from_user(user)
        .map_err(|_| AppError::Auth("Credential is missing an email address".to_string()))
}

fn coordinator(state: &AppointmentState) -> BookingCoordinator {
    BookingCoordinator::new(state.registry.clone(), state.store.clone())
}

/// Place a tentative hold on a slot. The hold does not exclude other holds;
/// exclusivity is granted at confirmation.
#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<AppointmentState>>,
    Extension(user): Extension<User>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let actor = actor_from(&user)?;

    let day: Weekday = request
        .day
        .parse()
        .map_err(AppError::ValidationError)?;
    let hour: Hour = request
        .hour
        .parse()
        .map_err(AppError::ValidationError)?;

    let appointment = coordinator(&state)
        .request_booking(&request.doctor_email, day, hour, &actor)
        .await
        .map_err(map_appointment_error)?;

    notify_confirmation_request(&state, &appointment).await;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment held; please confirm to secure the slot"
    })))
}

#[axum::debug_handler]
pub async fn get_my_appointments(
    State(state): State<Arc<AppointmentState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let actor = actor_from(&user)?;
    let appointments = coordinator(&state).appointments_for(&actor).await;

    Ok(Json(json!({
        "success": true,
        "appointments": appointments
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<AppointmentState>>,
    Path(appointment_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let actor = actor_from(&user)?;
    let booking = coordinator(&state);

    let appointment = booking
        .get_appointment(appointment_id, &actor)
        .await
        .map_err(map_appointment_error)?;
    let allowed_actions = booking.allowed_actions(&appointment);

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "allowed_actions": allowed_actions
    })))
}

#[axum::debug_handler]
pub async fn confirm_appointment(
    State(state): State<Arc<AppointmentState>>,
    Path(appointment_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let actor = actor_from(&user)?;

    let appointment = coordinator(&state)
        .confirm(appointment_id, &actor)
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment confirmed"
    })))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<AppointmentState>>,
    Path(appointment_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let actor = actor_from(&user)?;

    coordinator(&state)
        .delete(appointment_id, &actor)
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment deleted successfully"
    })))
}

#[axum::debug_handler]
pub async fn complete_visit(
    State(state): State<Arc<AppointmentState>>,
    Path(appointment_id): Path<Uuid>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let actor = actor_from(&user)?;

    let appointment = coordinator(&state)
        .mark_visit_completed(appointment_id, &actor)
        .await
        .map_err(map_appointment_error)?;

    notify_review_prompt(&state, &appointment).await;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Visit marked as completed"
    })))
}

#[axum::debug_handler]
pub async fn get_confirmed_appointments(
    State(state): State<Arc<AppointmentState>>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let actor = actor_from(&user)?;

    let appointments = coordinator(&state)
        .confirmed_appointments(&actor)
        .await
        .map_err(map_appointment_error)?;

    Ok(Json(json!({
        "success": true,
        "appointments": appointments
    })))
}

/// Notification publishing never gates the engine operation: a queue
/// failure is logged and the response stays successful.
async fn notify_confirmation_request(state: &AppointmentState, appointment: &Appointment) {
    let Some(producer) = &state.notifications else {
        return;
    };

    if let Err(e) = producer
        .publish_confirmation_request(
            &appointment.patient_email,
            &appointment.doctor_name,
            &appointment.day.to_string(),
            &appointment.hour.to_string(),
        )
        .await
    {
        warn!(
            "Failed to queue confirmation request for appointment {}: {}",
            appointment.id, e
        );
    }
}

async fn notify_review_prompt(state: &AppointmentState, appointment: &Appointment) {
    let Some(producer) = &state.notifications else {
        return;
    };

    if let Err(e) = producer
        .publish_review_prompt(&appointment.patient_email, &appointment.doctor_name)
        .await
    {
        warn!(
            "Failed to queue review prompt for appointment {}: {}",
            appointment.id, e
        );
    }
}
