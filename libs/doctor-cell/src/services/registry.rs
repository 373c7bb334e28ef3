// libs/doctor-cell/src/services/registry.rs
use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::models::{
    Doctor, DoctorError, Hour, RegisterDoctorRequest, UpdateScheduleRequest, Weekday,
};

/// In-process registry of doctor profiles, keyed by email. The single source
/// of truth for availability declarations; search results are a read-through
/// view served by the external backend.
pub struct DoctorRegistry {
    doctors: RwLock<HashMap<String, Doctor>>,
}

impl DoctorRegistry {
    pub fn new() -> Self {
        Self {
            doctors: RwLock::new(HashMap::new()),
        }
    }

    /// Register a doctor profile. Schedule strings are parsed and validated
    /// here so malformed entries never survive to slot lookup.
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        request: RegisterDoctorRequest,
    ) -> Result<Doctor, DoctorError> {
        debug!("Registering doctor profile for: {}", email);

        if email.trim().is_empty() || !email.contains('@') {
            return Err(DoctorError::ValidationError(
                "A valid email address is required".to_string(),
            ));
        }
        if name.trim().is_empty() {
            return Err(DoctorError::ValidationError(
                "Doctor name must not be empty".to_string(),
            ));
        }
        if request.area_of_interest.trim().is_empty() {
            return Err(DoctorError::ValidationError(
                "Area of interest must not be empty".to_string(),
            ));
        }

        let available_days = parse_days(&request.available_days)?;
        let available_hours = parse_hours(&request.available_hours)?;

        let now = Utc::now();
        let doctor = Doctor {
            email: email.to_string(),
            name: name.to_string(),
            area_of_interest: request.area_of_interest.trim().to_string(),
            address: request.address.trim().to_string(),
            city: request.city.trim().to_string(),
            available_days,
            available_hours,
            approved: false,
            created_at: now,
            updated_at: now,
        };

        let mut doctors = self.doctors.write().await;
        if doctors.contains_key(email) {
            return Err(DoctorError::AlreadyRegistered);
        }
        doctors.insert(email.to_string(), doctor.clone());

        info!("Doctor profile registered for {}", email);
        Ok(doctor)
    }

    pub async fn get(&self, email: &str) -> Result<Doctor, DoctorError> {
        let doctors = self.doctors.read().await;
        doctors.get(email).cloned().ok_or(DoctorError::NotFound)
    }

    /// Admin approval gate: unapproved doctors are invisible to booking.
    pub async fn approve(&self, email: &str) -> Result<Doctor, DoctorError> {
        let mut doctors = self.doctors.write().await;
        let doctor = doctors.get_mut(email).ok_or(DoctorError::NotFound)?;

        doctor.approved = true;
        doctor.updated_at = Utc::now();

        info!("Doctor {} approved", email);
        Ok(doctor.clone())
    }

    pub async fn update_schedule(
        &self,
        email: &str,
        request: UpdateScheduleRequest,
    ) -> Result<Doctor, DoctorError> {
        debug!("Updating schedule for doctor: {}", email);

        let available_days = match &request.available_days {
            Some(days) => Some(parse_days(days)?),
            None => None,
        };
        let available_hours = match &request.available_hours {
            Some(hours) => Some(parse_hours(hours)?),
            None => None,
        };

        let mut doctors = self.doctors.write().await;
        let doctor = doctors.get_mut(email).ok_or(DoctorError::NotFound)?;

        if let Some(days) = available_days {
            doctor.available_days = days;
        }
        if let Some(hours) = available_hours {
            doctor.available_hours = hours;
        }
        if let Some(address) = request.address {
            doctor.address = address.trim().to_string();
        }
        if let Some(city) = request.city {
            doctor.city = city.trim().to_string();
        }
        doctor.updated_at = Utc::now();

        Ok(doctor.clone())
    }

    pub async fn list_approved(&self) -> Vec<Doctor> {
        let doctors = self.doctors.read().await;
        let mut approved: Vec<Doctor> = doctors
            .values()
            .filter(|doctor| doctor.approved)
            .cloned()
            .collect();
        approved.sort_by(|a, b| a.email.cmp(&b.email));
        approved
    }
}

impl Default for DoctorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse and deduplicate weekday labels, preserving declaration order.
fn parse_days(labels: &[String]) -> Result<Vec<Weekday>, DoctorError> {
    let mut days = Vec::with_capacity(labels.len());
    for label in labels {
        let day: Weekday = label
            .parse()
            .map_err(DoctorError::InvalidSchedule)?;
        if !days.contains(&day) {
            days.push(day);
        }
    }
    Ok(days)
}

/// Parse and deduplicate hour labels, preserving declaration order.
fn parse_hours(labels: &[String]) -> Result<Vec<Hour>, DoctorError> {
    let mut hours = Vec::with_capacity(labels.len());
    for label in labels {
        let hour: Hour = label
            .parse()
            .map_err(DoctorError::InvalidSchedule)?;
        if !hours.contains(&hour) {
            hours.push(hour);
        }
    }
    Ok(hours)
}
