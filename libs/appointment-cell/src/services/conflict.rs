// libs/appointment-cell/src/services/conflict.rs
use tracing::debug;
use uuid::Uuid;

use doctor_cell::models::{Hour, Weekday};

use crate::models::{Appointment, AppointmentStatus};

/// Decides whether a candidate slot is already taken. Only a Confirmed
/// appointment occupies a slot; NotConfirmed holds by other patients do not
/// block a new hold. Strict exclusivity is deferred to confirmation time,
/// where the store re-runs this check atomically.
pub struct ConflictChecker;

impl ConflictChecker {
    pub fn new() -> Self {
        Self
    }

    pub fn is_booked(
        &self,
        doctor_email: &str,
        day: Weekday,
        hour: Hour,
        existing: &[Appointment],
    ) -> bool {
        self.find_confirmed(doctor_email, day, hour, None, existing.iter())
            .is_some()
    }

    /// First Confirmed appointment occupying the slot, skipping `exclude`
    /// (the appointment being confirmed re-checks against everyone else).
    pub fn find_confirmed<'a, I>(
        &self,
        doctor_email: &str,
        day: Weekday,
        hour: Hour,
        exclude: Option<Uuid>,
        existing: I,
    ) -> Option<&'a Appointment>
    where
        I: IntoIterator<Item = &'a Appointment>,
    {
        let found = existing.into_iter().find(|appointment| {
            appointment.status == AppointmentStatus::Confirmed
                && exclude != Some(appointment.id)
                && appointment.occupies(doctor_email, day, hour)
        });

        if let Some(appointment) = found {
            debug!(
                "Slot {} {} for {} is held by confirmed appointment {}",
                day, hour, doctor_email, appointment.id
            );
        }

        found
    }
}

impl Default for ConflictChecker {
    fn default() -> Self {
        Self::new()
    }
}
