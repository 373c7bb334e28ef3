// libs/doctor-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==============================================================================
// SCHEDULE TYPES
// ==============================================================================

/// Weekday a doctor can declare availability on. Parsed from full or
/// three-letter names; malformed values are rejected at registration time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "monday" | "mon" => Ok(Weekday::Monday),
            "tuesday" | "tue" => Ok(Weekday::Tuesday),
            "wednesday" | "wed" => Ok(Weekday::Wednesday),
            "thursday" | "thu" => Ok(Weekday::Thursday),
            "friday" | "fri" => Ok(Weekday::Friday),
            "saturday" | "sat" => Ok(Weekday::Saturday),
            "sunday" | "sun" => Ok(Weekday::Sunday),
            other => Err(format!("'{}' is not a valid weekday", other)),
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        };
        write!(f, "{}", name)
    }
}

/// Whole-hour slot label, 0-23. Accepts "10", "10:00" and "9" on input and
/// always renders as "10:00".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Hour(u8);

impl Hour {
    pub fn new(hour: u8) -> Result<Self, String> {
        if hour > 23 {
            return Err(format!("hour {} is out of range (0-23)", hour));
        }
        Ok(Hour(hour))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl FromStr for Hour {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let hour_part = match trimmed.split_once(':') {
            Some((hour, minutes)) => {
                if minutes != "00" {
                    return Err(format!("'{}' is not a whole-hour slot", trimmed));
                }
                hour
            }
            None => trimmed,
        };

        let hour: u8 = hour_part
            .parse()
            .map_err(|_| format!("'{}' is not a valid hour", trimmed))?;
        Hour::new(hour)
    }
}

impl fmt::Display for Hour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl TryFrom<String> for Hour {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Hour> for String {
    fn from(hour: Hour) -> Self {
        hour.to_string()
    }
}

/// Candidate booking unit, derived from a doctor's declared availability and
/// never stored on its own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Slot {
    pub day: Weekday,
    pub hour: Hour,
}

// ==============================================================================
// DOCTOR MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub email: String,
    pub name: String,
    pub area_of_interest: String,
    pub address: String,
    pub city: String,
    pub available_days: Vec<Weekday>,
    pub available_hours: Vec<Hour>,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Doctor {
    /// Nominal slot space: the cross product of declared days and hours, in
    /// declaration order. Empty days or hours means the doctor is currently
    /// unbookable, not an error.
    pub fn available_slots(&self) -> Vec<Slot> {
        self.available_days
            .iter()
            .flat_map(|day| {
                self.available_hours
                    .iter()
                    .map(move |hour| Slot { day: *day, hour: *hour })
            })
            .collect()
    }

    pub fn offers_slot(&self, day: Weekday, hour: Hour) -> bool {
        self.available_days.contains(&day) && self.available_hours.contains(&hour)
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// Registration payload. Identity (email, display name) comes from the
/// verified credential, never from the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterDoctorRequest {
    pub area_of_interest: String,
    pub address: String,
    pub city: String,
    pub available_days: Vec<String>,
    pub available_hours: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateScheduleRequest {
    pub available_days: Option<Vec<String>>,
    pub available_hours: Option<Vec<String>>,
    pub address: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSearchQuery {
    pub text: String,
    pub city: String,
    pub doctor_name: String,
    pub page: u32,
    pub page_size: u32,
}

impl DoctorSearchQuery {
    /// A query with every filter blank is rejected before it reaches the
    /// backend; this is the guard against unscoped full-table scans.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
            && self.city.trim().is_empty()
            && self.doctor_name.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSearchPage {
    pub doctors: Vec<Doctor>,
    pub total_pages: u32,
}

impl DoctorSearchPage {
    pub fn empty() -> Self {
        Self {
            doctors: Vec::new(),
            total_pages: 0,
        }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("A doctor profile already exists for this account")]
    AlreadyRegistered,

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Search backend error: {0}")]
    SearchBackend(String),
}
