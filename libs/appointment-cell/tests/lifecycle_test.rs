use assert_matches::assert_matches;
use chrono::Utc;

use appointment_cell::models::{
    Actor, ActorRole, Appointment, AppointmentError, AppointmentStatus, LifecycleAction,
    VisitStatus,
};
use appointment_cell::services::lifecycle::AppointmentLifecycleService;
use doctor_cell::models::{Doctor, Weekday};

fn test_doctor() -> Doctor {
    let now = Utc::now();
    Doctor {
        email: "doctor@example.com".to_string(),
        name: "Dr. Test".to_string(),
        area_of_interest: "Cardiology".to_string(),
        address: "1 Clinic Street".to_string(),
        city: "Springfield".to_string(),
        available_days: vec![Weekday::Monday],
        available_hours: vec!["10".parse().unwrap()],
        approved: true,
        created_at: now,
        updated_at: now,
    }
}

fn hold() -> Appointment {
    Appointment::hold(
        &test_doctor(),
        "patient@example.com",
        "Pat Patient",
        Weekday::Monday,
        "10".parse().unwrap(),
    )
}

fn confirmed() -> Appointment {
    let mut appointment = hold();
    appointment.status = AppointmentStatus::Confirmed;
    appointment
}

fn completed() -> Appointment {
    let mut appointment = confirmed();
    appointment.visit_status = VisitStatus::Completed;
    appointment
}

fn actor(email: &str, role: ActorRole) -> Actor {
    Actor {
        email: email.to_string(),
        name: email.to_string(),
        role,
    }
}

#[test]
fn holds_allow_confirm_and_delete_only() {
    let lifecycle = AppointmentLifecycleService::new();
    let appointment = hold();

    assert_eq!(
        lifecycle.allowed_actions(&appointment),
        vec![LifecycleAction::Confirm, LifecycleAction::Delete]
    );

    assert!(lifecycle
        .validate_action(&appointment, LifecycleAction::Confirm)
        .is_ok());
    assert!(lifecycle
        .validate_action(&appointment, LifecycleAction::Delete)
        .is_ok());
    assert_matches!(
        lifecycle.validate_action(&appointment, LifecycleAction::CompleteVisit),
        Err(AppointmentError::InvalidTransition { .. })
    );
    assert_matches!(
        lifecycle.validate_action(&appointment, LifecycleAction::SubmitReview),
        Err(AppointmentError::InvalidTransition { .. })
    );
}

#[test]
fn confirmed_appointments_allow_only_visit_completion() {
    let lifecycle = AppointmentLifecycleService::new();
    let appointment = confirmed();

    assert_eq!(
        lifecycle.allowed_actions(&appointment),
        vec![LifecycleAction::CompleteVisit]
    );

    // Confirming twice must fail without mutating anything.
    assert_matches!(
        lifecycle.validate_action(&appointment, LifecycleAction::Confirm),
        Err(AppointmentError::InvalidTransition { .. })
    );
    // Deleting a confirmed appointment is disallowed outright.
    assert_matches!(
        lifecycle.validate_action(&appointment, LifecycleAction::Delete),
        Err(AppointmentError::InvalidTransition { .. })
    );
}

#[test]
fn completed_visits_allow_only_review_submission() {
    let lifecycle = AppointmentLifecycleService::new();
    let appointment = completed();

    assert_eq!(
        lifecycle.allowed_actions(&appointment),
        vec![LifecycleAction::SubmitReview]
    );
    assert_matches!(
        lifecycle.validate_action(&appointment, LifecycleAction::CompleteVisit),
        Err(AppointmentError::InvalidTransition { .. })
    );
}

#[test]
fn owners_and_admins_may_drive_the_lifecycle() {
    let lifecycle = AppointmentLifecycleService::new();
    let appointment = hold();

    let patient_owner = actor("patient@example.com", ActorRole::Patient);
    let doctor_owner = actor("doctor@example.com", ActorRole::Doctor);
    let admin = actor("admin@example.com", ActorRole::Admin);

    for action in [LifecycleAction::Confirm, LifecycleAction::Delete] {
        assert!(lifecycle.authorize(&patient_owner, &appointment, action).is_ok());
        assert!(lifecycle.authorize(&doctor_owner, &appointment, action).is_ok());
        assert!(lifecycle.authorize(&admin, &appointment, action).is_ok());
    }
}

#[test]
fn strangers_are_rejected_even_with_matching_role() {
    let lifecycle = AppointmentLifecycleService::new();
    let appointment = hold();

    let other_patient = actor("other@example.com", ActorRole::Patient);
    let other_doctor = actor("other-doc@example.com", ActorRole::Doctor);

    assert_matches!(
        lifecycle.authorize(&other_patient, &appointment, LifecycleAction::Confirm),
        Err(AppointmentError::Unauthorized)
    );
    assert_matches!(
        lifecycle.authorize(&other_doctor, &appointment, LifecycleAction::Delete),
        Err(AppointmentError::Unauthorized)
    );
}

#[test]
fn reviews_are_patient_owner_only() {
    let lifecycle = AppointmentLifecycleService::new();
    let appointment = completed();

    let patient_owner = actor("patient@example.com", ActorRole::Patient);
    let doctor_owner = actor("doctor@example.com", ActorRole::Doctor);
    let admin = actor("admin@example.com", ActorRole::Admin);

    assert!(lifecycle
        .authorize(&patient_owner, &appointment, LifecycleAction::SubmitReview)
        .is_ok());
    assert_matches!(
        lifecycle.authorize(&doctor_owner, &appointment, LifecycleAction::SubmitReview),
        Err(AppointmentError::Unauthorized)
    );
    assert_matches!(
        lifecycle.authorize(&admin, &appointment, LifecycleAction::SubmitReview),
        Err(AppointmentError::Unauthorized)
    );
}
