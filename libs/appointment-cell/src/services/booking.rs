// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use doctor_cell::models::{DoctorError, Hour, Weekday};
use doctor_cell::services::registry::DoctorRegistry;

use crate::models::{
    Actor, ActorRole, Appointment, AppointmentError, AppointmentStatus, LifecycleAction,
};
use crate::services::conflict::ConflictChecker;
use crate::services::lifecycle::AppointmentLifecycleService;
use crate::services::store::AppointmentStore;

/// The externally callable booking surface: orchestrates slot validation,
/// conflict checking and lifecycle transitions against the shared store.
/// Every failure is typed and leaves no partial state behind; retrying a
/// `Conflict` with a different slot is the caller's decision.
pub struct BookingCoordinator {
    registry: Arc<DoctorRegistry>,
    store: Arc<AppointmentStore>,
    lifecycle: AppointmentLifecycleService,
    conflict: ConflictChecker,
}

impl BookingCoordinator {
    pub fn new(registry: Arc<DoctorRegistry>, store: Arc<AppointmentStore>) -> Self {
        Self {
            registry,
            store,
            lifecycle: AppointmentLifecycleService::new(),
            conflict: ConflictChecker::new(),
        }
    }

    /// Place a tentative hold on (doctor, day, hour). Holds are optimistic:
    /// other NotConfirmed holds on the slot do not block this one, only a
    /// Confirmed booking does.
    pub async fn request_booking(
        &self,
        doctor_email: &str,
        day: Weekday,
        hour: Hour,
        patient: &Actor,
    ) -> Result<Appointment, AppointmentError> {
        info!(
            "Booking request from {} for {} on {} at {}",
            patient.email, doctor_email, day, hour
        );

        if patient.role != ActorRole::Patient {
            return Err(AppointmentError::Unauthorized);
        }

        let doctor = self.registry.get(doctor_email).await.map_err(|e| match e {
            DoctorError::NotFound => AppointmentError::DoctorNotFound,
            other => AppointmentError::ValidationError(other.to_string()),
        })?;

        if !doctor.approved {
            return Err(AppointmentError::DoctorNotAvailable);
        }

        if !doctor.offers_slot(day, hour) {
            debug!(
                "Slot {} {} is outside the declared availability of {}",
                day, hour, doctor_email
            );
            return Err(AppointmentError::InvalidSlot);
        }

        let existing = self.store.for_doctor(doctor_email).await;
        if self.conflict.is_booked(doctor_email, day, hour, &existing) {
            warn!(
                "Slot {} {} for {} already has a confirmed booking",
                day, hour, doctor_email
            );
            return Err(AppointmentError::Conflict);
        }

        let appointment = Appointment::hold(&doctor, &patient.email, &patient.name, day, hour);
        self.store.insert(appointment.clone()).await;

        info!(
            "Hold {} created for patient {} with doctor {}",
            appointment.id, patient.email, doctor_email
        );
        Ok(appointment)
    }

    /// Grant a hold exclusive occupancy of its slot. The store performs the
    /// conflict re-check and the status flip as one indivisible operation.
    pub async fn confirm(&self, id: Uuid, actor: &Actor) -> Result<Appointment, AppointmentError> {
        let appointment = self.store.get(id).await?;
        self.lifecycle
            .authorize(actor, &appointment, LifecycleAction::Confirm)?;

        self.store.confirm(id).await
    }

    /// Remove a tentative hold. Deleting a Confirmed appointment is not
    /// permitted.
    pub async fn delete(&self, id: Uuid, actor: &Actor) -> Result<Appointment, AppointmentError> {
        let appointment = self.store.get(id).await?;
        self.lifecycle
            .authorize(actor, &appointment, LifecycleAction::Delete)?;

        self.store.remove(id).await
    }

    pub async fn mark_visit_completed(
        &self,
        id: Uuid,
        actor: &Actor,
    ) -> Result<Appointment, AppointmentError> {
        let appointment = self.store.get(id).await?;
        self.lifecycle
            .authorize(actor, &appointment, LifecycleAction::CompleteVisit)?;

        self.store.complete_visit(id).await
    }

    pub async fn get_appointment(
        &self,
        id: Uuid,
        actor: &Actor,
    ) -> Result<Appointment, AppointmentError> {
        let appointment = self.store.get(id).await?;
        if !self.lifecycle.can_view(actor, &appointment) {
            return Err(AppointmentError::Unauthorized);
        }
        Ok(appointment)
    }

    /// The caller's own appointments: holds and confirmed bookings for a
    /// patient, the working schedule for a doctor.
    pub async fn appointments_for(&self, actor: &Actor) -> Vec<Appointment> {
        match actor.role {
            ActorRole::Doctor => self.store.for_doctor(&actor.email).await,
            _ => self.store.for_patient(&actor.email).await,
        }
    }

    pub async fn confirmed_appointments(
        &self,
        actor: &Actor,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        match actor.role {
            ActorRole::Admin => Ok(self.store.confirmed().await),
            ActorRole::Doctor => {
                let mut appointments = self.store.for_doctor(&actor.email).await;
                appointments.retain(|appointment| appointment.status == AppointmentStatus::Confirmed);
                Ok(appointments)
            }
            ActorRole::Patient => Err(AppointmentError::Unauthorized),
        }
    }

    pub fn allowed_actions(&self, appointment: &Appointment) -> Vec<LifecycleAction> {
        self.lifecycle.allowed_actions(appointment)
    }
}
