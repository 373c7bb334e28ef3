// libs/doctor-cell/src/services/search.rs
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use shared_backend::BackendClient;
use shared_config::AppConfig;

use crate::models::{DoctorError, DoctorSearchPage, DoctorSearchQuery};

const MAX_PAGE_SIZE: u32 = 50;
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Pagination adapter over the external search backend. Matching and ranking
/// are the backend's job; this service only translates filters plus a page
/// cursor into a request and exposes the bounded result window.
pub struct SearchService {
    backend: BackendClient,
}

impl SearchService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    pub async fn search(&self, query: DoctorSearchQuery) -> Result<DoctorSearchPage, DoctorError> {
        if query.is_blank() {
            debug!("Rejecting blank doctor search without a backend call");
            return Ok(DoctorSearchPage::empty());
        }

        if query.page < 1 {
            return Err(DoctorError::ValidationError(
                "Page numbers start at 1".to_string(),
            ));
        }

        let page_size = match query.page_size {
            0 => DEFAULT_PAGE_SIZE,
            size => size.min(MAX_PAGE_SIZE),
        };

        let request_body = json!({
            "text": query.text.trim(),
            "city": query.city.trim(),
            "doctor_name": query.doctor_name.trim(),
            "page": query.page,
            "page_size": page_size,
        });

        let mut page: DoctorSearchPage = self
            .backend
            .request(Method::POST, "/rest/v1/doctors/search", Some(request_body))
            .await
            .map_err(|e| DoctorError::SearchBackend(e.to_string()))?;

        // A page past the end is an empty window, not an error.
        if query.page > page.total_pages {
            page.doctors.clear();
        }

        info!(
            "Doctor search returned {} results (page {} of {})",
            page.doctors.len(),
            query.page,
            page.total_pages
        );

        Ok(page)
    }
}
