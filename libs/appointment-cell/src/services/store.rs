// libs/appointment-cell/src/services/store.rs
use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{Appointment, AppointmentError, AppointmentStatus, LifecycleAction, VisitStatus};
use crate::services::conflict::ConflictChecker;
use crate::services::lifecycle::AppointmentLifecycleService;

/// The single shared appointment store. Every mutation runs under one write
/// lock, which is what makes confirm's check-then-set indivisible: no other
/// appointment can flip to Confirmed between the conflict re-check and the
/// status write. Callers keep read-through copies only.
pub struct AppointmentStore {
    inner: RwLock<HashMap<Uuid, Appointment>>,
    lifecycle: AppointmentLifecycleService,
    conflict: ConflictChecker,
}

impl AppointmentStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            lifecycle: AppointmentLifecycleService::new(),
            conflict: ConflictChecker::new(),
        }
    }

    pub async fn insert(&self, appointment: Appointment) {
        let mut appointments = self.inner.write().await;
        debug!("Storing appointment {}", appointment.id);
        appointments.insert(appointment.id, appointment);
    }

    pub async fn get(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        let appointments = self.inner.read().await;
        appointments.get(&id).cloned().ok_or(AppointmentError::NotFound)
    }

    pub async fn for_patient(&self, patient_email: &str) -> Vec<Appointment> {
        let appointments = self.inner.read().await;
        let mut results: Vec<Appointment> = appointments
            .values()
            .filter(|appointment| appointment.patient_email == patient_email)
            .cloned()
            .collect();
        results.sort_by_key(|appointment| appointment.created_at);
        results
    }

    pub async fn for_doctor(&self, doctor_email: &str) -> Vec<Appointment> {
        let appointments = self.inner.read().await;
        let mut results: Vec<Appointment> = appointments
            .values()
            .filter(|appointment| appointment.doctor_email == doctor_email)
            .cloned()
            .collect();
        results.sort_by_key(|appointment| appointment.created_at);
        results
    }

    pub async fn confirmed(&self) -> Vec<Appointment> {
        let appointments = self.inner.read().await;
        let mut results: Vec<Appointment> = appointments
            .values()
            .filter(|appointment| appointment.status == AppointmentStatus::Confirmed)
            .cloned()
            .collect();
        results.sort_by_key(|appointment| appointment.created_at);
        results
    }

    /// Unconfirmed holds, oldest first; the reminder sweep walks these.
    pub async fn not_confirmed(&self) -> Vec<Appointment> {
        let appointments = self.inner.read().await;
        let mut results: Vec<Appointment> = appointments
            .values()
            .filter(|appointment| appointment.status == AppointmentStatus::NotConfirmed)
            .cloned()
            .collect();
        results.sort_by_key(|appointment| appointment.created_at);
        results
    }

    /// Atomic check-then-set: under the single write lock, re-verify that no
    /// *other* appointment holds the slot Confirmed, then flip the status.
    /// Of two racing confirms on one slot, exactly one wins; the other gets
    /// `Conflict`.
    pub async fn confirm(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        let mut appointments = self.inner.write().await;

        let current = appointments.get(&id).ok_or(AppointmentError::NotFound)?;
        self.lifecycle
            .validate_action(current, LifecycleAction::Confirm)?;

        let (doctor_email, day, hour) = (current.doctor_email.clone(), current.day, current.hour);
        if self
            .conflict
            .find_confirmed(&doctor_email, day, hour, Some(id), appointments.values())
            .is_some()
        {
            return Err(AppointmentError::Conflict);
        }

        let appointment = appointments.get_mut(&id).ok_or(AppointmentError::NotFound)?;
        appointment.status = AppointmentStatus::Confirmed;
        appointment.updated_at = Utc::now();

        info!("Appointment {} confirmed", id);
        Ok(appointment.clone())
    }

    /// Remove a tentative hold. Confirmed appointments are never deleted;
    /// the transition check runs under the same lock as the removal.
    pub async fn remove(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        let mut appointments = self.inner.write().await;

        let current = appointments.get(&id).ok_or(AppointmentError::NotFound)?;
        self.lifecycle
            .validate_action(current, LifecycleAction::Delete)?;

        let removed = appointments.remove(&id).ok_or(AppointmentError::NotFound)?;
        info!("Appointment {} deleted", id);
        Ok(removed)
    }

    /// Mark the real-world encounter as having happened. Per-record
    /// atomicity is enough here; no cross-record invariant is involved.
    pub async fn complete_visit(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        let mut appointments = self.inner.write().await;

        let current = appointments.get(&id).ok_or(AppointmentError::NotFound)?;
        self.lifecycle
            .validate_action(current, LifecycleAction::CompleteVisit)?;

        let appointment = appointments.get_mut(&id).ok_or(AppointmentError::NotFound)?;
        appointment.visit_status = VisitStatus::Completed;
        appointment.updated_at = Utc::now();

        info!("Visit completed for appointment {}", id);
        Ok(appointment.clone())
    }
}

impl Default for AppointmentStore {
    fn default() -> Self {
        Self::new()
    }
}
