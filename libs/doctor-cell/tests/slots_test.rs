use chrono::Utc;

use doctor_cell::models::{Doctor, Hour, Slot, Weekday};

fn test_doctor(days: Vec<Weekday>, hours: Vec<Hour>) -> Doctor {
    let now = Utc::now();
    Doctor {
        email: "doctor@example.com".to_string(),
        name: "Dr. Test".to_string(),
        area_of_interest: "Cardiology".to_string(),
        address: "1 Clinic Street".to_string(),
        city: "Springfield".to_string(),
        available_days: days,
        available_hours: hours,
        approved: true,
        created_at: now,
        updated_at: now,
    }
}

fn hour(label: &str) -> Hour {
    label.parse().expect("valid hour label")
}

#[test]
fn available_slots_is_the_cross_product_of_days_and_hours() {
    let doctor = test_doctor(
        vec![Weekday::Monday, Weekday::Tuesday],
        vec![hour("10"), hour("11")],
    );

    let slots = doctor.available_slots();
    assert_eq!(slots.len(), 4);

    for day in [Weekday::Monday, Weekday::Tuesday] {
        for h in [hour("10"), hour("11")] {
            assert!(slots.contains(&Slot { day, hour: h }));
        }
    }
}

#[test]
fn available_slots_preserves_declaration_order() {
    let doctor = test_doctor(
        vec![Weekday::Friday, Weekday::Monday],
        vec![hour("14"), hour("9")],
    );

    let slots = doctor.available_slots();
    assert_eq!(slots[0], Slot { day: Weekday::Friday, hour: hour("14") });
    assert_eq!(slots[1], Slot { day: Weekday::Friday, hour: hour("9") });
    assert_eq!(slots[2], Slot { day: Weekday::Monday, hour: hour("14") });
}

#[test]
fn empty_days_means_unbookable_not_an_error() {
    let doctor = test_doctor(vec![], vec![hour("10"), hour("11")]);
    assert!(doctor.available_slots().is_empty());
}

#[test]
fn empty_hours_means_unbookable_not_an_error() {
    let doctor = test_doctor(vec![Weekday::Monday], vec![]);
    assert!(doctor.available_slots().is_empty());
}

#[test]
fn offers_slot_requires_both_day_and_hour_to_be_declared() {
    let doctor = test_doctor(vec![Weekday::Monday], vec![hour("10")]);

    assert!(doctor.offers_slot(Weekday::Monday, hour("10")));
    assert!(!doctor.offers_slot(Weekday::Tuesday, hour("10")));
    assert!(!doctor.offers_slot(Weekday::Monday, hour("11")));
}

#[test]
fn weekday_parses_full_and_short_names() {
    assert_eq!("Monday".parse::<Weekday>().unwrap(), Weekday::Monday);
    assert_eq!("tue".parse::<Weekday>().unwrap(), Weekday::Tuesday);
    assert_eq!(" Friday ".parse::<Weekday>().unwrap(), Weekday::Friday);
    assert!("Funday".parse::<Weekday>().is_err());
    assert!("".parse::<Weekday>().is_err());
}

#[test]
fn hour_parses_bare_and_colon_forms() {
    assert_eq!(hour("10"), hour("10:00"));
    assert_eq!(hour("9").to_string(), "09:00");
    assert_eq!(hour("0").value(), 0);
    assert_eq!(hour("23").value(), 23);

    assert!("24".parse::<Hour>().is_err());
    assert!("10:30".parse::<Hour>().is_err());
    assert!("ten".parse::<Hour>().is_err());
    assert!("".parse::<Hour>().is_err());
}

#[test]
fn hour_serializes_as_its_label() {
    let serialized = serde_json::to_string(&hour("10")).unwrap();
    assert_eq!(serialized, "\"10:00\"");

    let parsed: Hour = serde_json::from_str("\"14:00\"").unwrap();
    assert_eq!(parsed, hour("14"));

    assert!(serde_json::from_str::<Hour>("\"25\"").is_err());
}
