use assert_matches::assert_matches;

use doctor_cell::models::{DoctorError, RegisterDoctorRequest, UpdateScheduleRequest, Weekday};
use doctor_cell::services::registry::DoctorRegistry;

fn registration() -> RegisterDoctorRequest {
    RegisterDoctorRequest {
        area_of_interest: "Dermatology".to_string(),
        address: "12 Health Avenue".to_string(),
        city: "Riverton".to_string(),
        available_days: vec!["Monday".to_string(), "Tuesday".to_string()],
        available_hours: vec!["10".to_string(), "11:00".to_string()],
    }
}

#[tokio::test]
async fn register_parses_and_stores_the_schedule() {
    let registry = DoctorRegistry::new();

    let doctor = registry
        .register("derm@example.com", "Dr. Derm", registration())
        .await
        .unwrap();

    assert_eq!(doctor.available_days, vec![Weekday::Monday, Weekday::Tuesday]);
    assert_eq!(doctor.available_hours.len(), 2);
    assert_eq!(doctor.available_hours[0].to_string(), "10:00");
    assert!(!doctor.approved);
}

#[tokio::test]
async fn register_rejects_malformed_days_before_storing_anything() {
    let registry = DoctorRegistry::new();

    let mut request = registration();
    request.available_days = vec!["Monday".to_string(), "Moonday".to_string()];

    let result = registry.register("derm@example.com", "Dr. Derm", request).await;
    assert_matches!(result, Err(DoctorError::InvalidSchedule(_)));

    // The failed registration must not have created a profile.
    assert_matches!(registry.get("derm@example.com").await, Err(DoctorError::NotFound));
}

#[tokio::test]
async fn register_rejects_malformed_hours() {
    let registry = DoctorRegistry::new();

    let mut request = registration();
    request.available_hours = vec!["10".to_string(), "25".to_string()];

    let result = registry.register("derm@example.com", "Dr. Derm", request).await;
    assert_matches!(result, Err(DoctorError::InvalidSchedule(_)));
}

#[tokio::test]
async fn register_deduplicates_repeated_labels() {
    let registry = DoctorRegistry::new();

    let mut request = registration();
    request.available_days = vec!["Monday".to_string(), "mon".to_string()];
    request.available_hours = vec!["10".to_string(), "10:00".to_string()];

    let doctor = registry
        .register("derm@example.com", "Dr. Derm", request)
        .await
        .unwrap();

    assert_eq!(doctor.available_days, vec![Weekday::Monday]);
    assert_eq!(doctor.available_hours.len(), 1);
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let registry = DoctorRegistry::new();

    registry
        .register("derm@example.com", "Dr. Derm", registration())
        .await
        .unwrap();
    let second = registry
        .register("derm@example.com", "Dr. Derm", registration())
        .await;

    assert_matches!(second, Err(DoctorError::AlreadyRegistered));
}

#[tokio::test]
async fn register_requires_a_plausible_email() {
    let registry = DoctorRegistry::new();

    let result = registry.register("not-an-email", "Dr. Derm", registration()).await;
    assert_matches!(result, Err(DoctorError::ValidationError(_)));
}

#[tokio::test]
async fn approval_flips_the_flag_and_listing_shows_only_approved() {
    let registry = DoctorRegistry::new();

    registry
        .register("derm@example.com", "Dr. Derm", registration())
        .await
        .unwrap();
    registry
        .register("cardio@example.com", "Dr. Cardio", registration())
        .await
        .unwrap();

    assert!(registry.list_approved().await.is_empty());

    let approved = registry.approve("derm@example.com").await.unwrap();
    assert!(approved.approved);

    let listed = registry.list_approved().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].email, "derm@example.com");
}

#[tokio::test]
async fn approve_unknown_doctor_is_not_found() {
    let registry = DoctorRegistry::new();
    assert_matches!(registry.approve("ghost@example.com").await, Err(DoctorError::NotFound));
}

#[tokio::test]
async fn update_schedule_replaces_only_the_provided_fields() {
    let registry = DoctorRegistry::new();

    registry
        .register("derm@example.com", "Dr. Derm", registration())
        .await
        .unwrap();

    let updated = registry
        .update_schedule(
            "derm@example.com",
            UpdateScheduleRequest {
                available_days: Some(vec!["Friday".to_string()]),
                available_hours: None,
                address: None,
                city: Some("Lakeside".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.available_days, vec![Weekday::Friday]);
    assert_eq!(updated.available_hours.len(), 2);
    assert_eq!(updated.city, "Lakeside");
    assert_eq!(updated.address, "12 Health Avenue");
}

#[tokio::test]
async fn update_schedule_rejects_malformed_input_without_mutating() {
    let registry = DoctorRegistry::new();

    registry
        .register("derm@example.com", "Dr. Derm", registration())
        .await
        .unwrap();

    let result = registry
        .update_schedule(
            "derm@example.com",
            UpdateScheduleRequest {
                available_days: Some(vec!["Blursday".to_string()]),
                available_hours: None,
                address: None,
                city: None,
            },
        )
        .await;
    assert_matches!(result, Err(DoctorError::InvalidSchedule(_)));

    let doctor = registry.get("derm@example.com").await.unwrap();
    assert_eq!(doctor.available_days, vec![Weekday::Monday, Weekday::Tuesday]);
}
