// libs/appointment-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use crate::models::{
    Actor, Appointment, AppointmentError, AppointmentStatus, LifecycleAction, VisitStatus,
};

/// The appointment state machine: which actions are legal in which state,
/// and which actors may take them. Pure rules, no I/O; the store applies
/// them under its own lock so a failed validation never mutates state.
pub struct AppointmentLifecycleService;

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Validate that an action is legal in the appointment's current state.
    pub fn validate_action(
        &self,
        appointment: &Appointment,
        action: LifecycleAction,
    ) -> Result<(), AppointmentError> {
        debug!(
            "Validating {} on appointment {} ({})",
            action,
            appointment.id,
            appointment.state_label()
        );

        if self.allowed_actions(appointment).contains(&action) {
            return Ok(());
        }

        warn!(
            "Illegal transition attempted: {} while {}",
            action,
            appointment.state_label()
        );
        Err(AppointmentError::InvalidTransition {
            action,
            state: appointment.state_label().to_string(),
        })
    }

    /// All actions legal in the appointment's current state. Deletion is
    /// only legal before confirmation; a confirmed slot is never released
    /// silently.
    pub fn allowed_actions(&self, appointment: &Appointment) -> Vec<LifecycleAction> {
        match (&appointment.status, &appointment.visit_status) {
            (AppointmentStatus::NotConfirmed, _) => {
                vec![LifecycleAction::Confirm, LifecycleAction::Delete]
            }
            (AppointmentStatus::Confirmed, VisitStatus::NotCompleted) => {
                vec![LifecycleAction::CompleteVisit]
            }
            (AppointmentStatus::Confirmed, VisitStatus::Completed) => {
                vec![LifecycleAction::SubmitReview]
            }
        }
    }

    /// Capability check: confirm/delete/complete are open to the owning
    /// patient, the owning doctor, or an admin; reviews are patient-only.
    pub fn authorize(
        &self,
        actor: &Actor,
        appointment: &Appointment,
        action: LifecycleAction,
    ) -> Result<(), AppointmentError> {
        let allowed = match action {
            LifecycleAction::Confirm
            | LifecycleAction::Delete
            | LifecycleAction::CompleteVisit => {
                actor.owns_as_patient(appointment)
                    || actor.owns_as_doctor(appointment)
                    || actor.is_admin()
            }
            LifecycleAction::SubmitReview => actor.owns_as_patient(appointment),
        };

        if allowed {
            Ok(())
        } else {
            warn!(
                "Actor {} denied {} on appointment {}",
                actor.email, action, appointment.id
            );
            Err(AppointmentError::Unauthorized)
        }
    }

    /// Whether the appointment may view-listed for this actor.
    pub fn can_view(&self, actor: &Actor, appointment: &Appointment) -> bool {
        actor.owns_as_patient(appointment) || actor.owns_as_doctor(appointment) || actor.is_admin()
    }
}

impl Default for AppointmentLifecycleService {
    fn default() -> Self {
        Self::new()
    }
}
