// libs/doctor-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{
    DoctorError, DoctorSearchQuery, RegisterDoctorRequest, UpdateScheduleRequest,
};
use crate::services::registry::DoctorRegistry;
use crate::services::search::SearchService;

/// Shared state for the doctor cell. The registry lives for the whole
/// process; handlers must never hold doctor data of their own.
#[derive(Clone)]
pub struct DoctorState {
    pub config: Arc<AppConfig>,
    pub registry: Arc<DoctorRegistry>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub text: Option<String>,
    pub city: Option<String>,
    pub doctor_name: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

fn map_doctor_error(e: DoctorError) -> AppError {
    match e {
        DoctorError::NotFound => AppError::NotFound("Doctor not found".to_string()),
        DoctorError::AlreadyRegistered => {
            AppError::Conflict("A doctor profile already exists for this account".to_string())
        }
        DoctorError::InvalidSchedule(msg) => AppError::ValidationError(msg),
        DoctorError::ValidationError(msg) => AppError::ValidationError(msg),
        DoctorError::SearchBackend(_) => {
            AppError::ExternalService("Doctor search is temporarily unavailable".to_string())
        }
    }
}

fn identity(user: &User) -> Result<(String, String), AppError> {
    let email = user
        .email
        .clone()
        .ok_or_else(|| AppError::Auth("Credential is missing an email address".to_string()))?;
    let name = user.name.clone().unwrap_or_else(|| email.clone());
    Ok((email, name))
}

fn is_admin(user: &User) -> bool {
    user.role.as_deref() == Some("admin")
}

/// Register the calling doctor's profile. Identity comes from the verified
/// credential, never from the request body.
#[axum::debug_handler]
pub async fn register_doctor(
    State(state): State<Arc<DoctorState>>,
    Extension(user): Extension<User>,
    Json(request): Json<RegisterDoctorRequest>,
) -> Result<Json<Value>, AppError> {
    let (email, name) = identity(&user)?;

    let doctor = state
        .registry
        .register(&email, &name, request)
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(json!({
        "success": true,
        "doctor": doctor,
        "message": "Doctor profile registered; pending admin approval"
    })))
}

#[axum::debug_handler]
pub async fn approve_doctor(
    State(state): State<Arc<DoctorState>>,
    Path(doctor_email): Path<String>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    if !is_admin(&user) {
        return Err(AppError::Forbidden(
            "Only administrators can approve doctors".to_string(),
        ));
    }

    let doctor = state
        .registry
        .approve(&doctor_email)
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(json!({
        "success": true,
        "doctor": doctor,
        "message": "Doctor approved successfully"
    })))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<DoctorState>>,
    Path(doctor_email): Path<String>,
    Extension(_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let doctor = state
        .registry
        .get(&doctor_email)
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(json!({
        "success": true,
        "doctor": doctor,
        "available_slots": doctor.available_slots()
    })))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<DoctorState>>,
    Path(doctor_email): Path<String>,
    Extension(user): Extension<User>,
    Json(request): Json<UpdateScheduleRequest>,
) -> Result<Json<Value>, AppError> {
    let (email, _) = identity(&user)?;

    let is_owner = user.role.as_deref() == Some("doctor") && email == doctor_email;
    if !is_owner && !is_admin(&user) {
        return Err(AppError::Forbidden(
            "Not authorized to update this doctor's schedule".to_string(),
        ));
    }

    let doctor = state
        .registry
        .update_schedule(&doctor_email, request)
        .await
        .map_err(map_doctor_error)?;

    Ok(Json(json!({
        "success": true,
        "doctor": doctor,
        "message": "Schedule updated successfully"
    })))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<DoctorState>>,
    Extension(_user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let doctors = state.registry.list_approved().await;

    Ok(Json(json!({
        "success": true,
        "doctors": doctors
    })))
}

/// Public doctor search, delegated to the external backend.
#[axum::debug_handler]
pub async fn search_doctors(
    State(state): State<Arc<DoctorState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, AppError> {
    let query = DoctorSearchQuery {
        text: params.text.unwrap_or_default(),
        city: params.city.unwrap_or_default(),
        doctor_name: params.doctor_name.unwrap_or_default(),
        page: params.page.unwrap_or(1),
        page_size: params.page_size.unwrap_or(0),
    };

    let search_service = SearchService::new(&state.config);
    let page = search_service.search(query).await.map_err(map_doctor_error)?;

    Ok(Json(json!({
        "success": true,
        "doctors": page.doctors,
        "total_pages": page.total_pages
    })))
}
