use chrono::Utc;

use appointment_cell::models::{Appointment, AppointmentStatus};
use appointment_cell::services::conflict::ConflictChecker;
use doctor_cell::models::{Doctor, Hour, Weekday};

fn test_doctor(email: &str) -> Doctor {
    let now = Utc::now();
    Doctor {
        email: email.to_string(),
        name: "Dr. Test".to_string(),
        area_of_interest: "Cardiology".to_string(),
        address: "1 Clinic Street".to_string(),
        city: "Springfield".to_string(),
        available_days: vec![Weekday::Monday, Weekday::Tuesday],
        available_hours: vec![hour("10"), hour("11")],
        approved: true,
        created_at: now,
        updated_at: now,
    }
}

fn hour(label: &str) -> Hour {
    label.parse().unwrap()
}

fn hold_for(doctor_email: &str, patient: &str, day: Weekday, hour_label: &str) -> Appointment {
    Appointment::hold(
        &test_doctor(doctor_email),
        patient,
        patient,
        day,
        hour(hour_label),
    )
}

#[test]
fn empty_history_has_no_conflicts() {
    let checker = ConflictChecker::new();
    assert!(!checker.is_booked("doc@example.com", Weekday::Monday, hour("10"), &[]));
}

#[test]
fn not_confirmed_holds_do_not_block_the_slot() {
    let checker = ConflictChecker::new();
    let existing = vec![
        hold_for("doc@example.com", "p1@example.com", Weekday::Monday, "10"),
        hold_for("doc@example.com", "p2@example.com", Weekday::Monday, "10"),
    ];

    assert!(!checker.is_booked("doc@example.com", Weekday::Monday, hour("10"), &existing));
}

#[test]
fn a_confirmed_appointment_blocks_exactly_its_slot() {
    let checker = ConflictChecker::new();
    let mut confirmed = hold_for("doc@example.com", "p1@example.com", Weekday::Monday, "10");
    confirmed.status = AppointmentStatus::Confirmed;
    let existing = vec![confirmed];

    assert!(checker.is_booked("doc@example.com", Weekday::Monday, hour("10"), &existing));
    // Different hour, day or doctor is free.
    assert!(!checker.is_booked("doc@example.com", Weekday::Monday, hour("11"), &existing));
    assert!(!checker.is_booked("doc@example.com", Weekday::Tuesday, hour("10"), &existing));
    assert!(!checker.is_booked("other@example.com", Weekday::Monday, hour("10"), &existing));
}

#[test]
fn find_confirmed_can_exclude_the_appointment_being_confirmed() {
    let checker = ConflictChecker::new();
    let mut confirmed = hold_for("doc@example.com", "p1@example.com", Weekday::Monday, "10");
    confirmed.status = AppointmentStatus::Confirmed;
    let id = confirmed.id;
    let existing = vec![confirmed];

    // Excluding itself, the slot reads as free; excluding nothing, it is taken.
    assert!(checker
        .find_confirmed("doc@example.com", Weekday::Monday, hour("10"), Some(id), existing.iter())
        .is_none());
    assert!(checker
        .find_confirmed("doc@example.com", Weekday::Monday, hour("10"), None, existing.iter())
        .is_some());
}
