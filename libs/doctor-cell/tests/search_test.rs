use assert_matches::assert_matches;
use chrono::Utc;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use doctor_cell::models::{Doctor, DoctorError, DoctorSearchQuery, Weekday};
use doctor_cell::services::search::SearchService;
use shared_utils::test_utils::TestConfig;

fn query(text: &str, city: &str, doctor_name: &str, page: u32) -> DoctorSearchQuery {
    DoctorSearchQuery {
        text: text.to_string(),
        city: city.to_string(),
        doctor_name: doctor_name.to_string(),
        page,
        page_size: 10,
    }
}

fn backend_doctor(email: &str, name: &str, city: &str) -> serde_json::Value {
    let now = Utc::now();
    let doctor = Doctor {
        email: email.to_string(),
        name: name.to_string(),
        area_of_interest: "Cardiology".to_string(),
        address: "1 Clinic Street".to_string(),
        city: city.to_string(),
        available_days: vec![Weekday::Monday],
        available_hours: vec!["10".parse().unwrap()],
        approved: true,
        created_at: now,
        updated_at: now,
    };
    serde_json::to_value(doctor).unwrap()
}

#[tokio::test]
async fn blank_query_returns_empty_without_calling_the_backend() {
    let mock_server = MockServer::start().await;

    // Any request at all would be a contract violation.
    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_backend_url(&mock_server.uri()).to_app_config();
    let service = SearchService::new(&config);

    let page = service.search(query("", "  ", "", 1)).await.unwrap();
    assert!(page.doctors.is_empty());
    assert_eq!(page.total_pages, 0);
}

#[tokio::test]
async fn search_passes_filters_and_page_to_the_backend() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors/search"))
        .and(body_partial_json(json!({
            "text": "cardiology",
            "city": "Riverton",
            "page": 2,
            "page_size": 10,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "doctors": [backend_doctor("cardio@example.com", "Dr. Cardio", "Riverton")],
            "total_pages": 3
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_backend_url(&mock_server.uri()).to_app_config();
    let service = SearchService::new(&config);

    let page = service
        .search(query("cardiology", "Riverton", "", 2))
        .await
        .unwrap();

    assert_eq!(page.doctors.len(), 1);
    assert_eq!(page.doctors[0].email, "cardio@example.com");
    assert_eq!(page.total_pages, 3);
}

#[tokio::test]
async fn page_past_the_end_is_an_empty_window_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "doctors": [backend_doctor("cardio@example.com", "Dr. Cardio", "Riverton")],
            "total_pages": 2
        })))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_backend_url(&mock_server.uri()).to_app_config();
    let service = SearchService::new(&config);

    let page = service.search(query("cardiology", "", "", 5)).await.unwrap();
    assert!(page.doctors.is_empty());
    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
async fn zero_page_is_a_validation_error() {
    let mock_server = MockServer::start().await;
    let config = TestConfig::with_backend_url(&mock_server.uri()).to_app_config();
    let service = SearchService::new(&config);

    let result = service.search(query("cardiology", "", "", 0)).await;
    assert_matches!(result, Err(DoctorError::ValidationError(_)));
}

#[tokio::test]
async fn backend_failure_surfaces_as_a_search_backend_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/doctors/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let config = TestConfig::with_backend_url(&mock_server.uri()).to_app_config();
    let service = SearchService::new(&config);

    let result = service.search(query("cardiology", "", "", 1)).await;
    assert_matches!(result, Err(DoctorError::SearchBackend(_)));
}
