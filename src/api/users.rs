//! User endpoints: registration, login, driver availability.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::http::error::ApiError;
use crate::http::request::AppJson;
use crate::http::response::{Created, LoginOk, Updated};
use crate::http::server::AppState;
use crate::store::{collections, Document, DocumentId, Filter, StoreError};

/// Registration payload. Fields are optional at the serde level so the
/// handler can report absence with the API's own message instead of a
/// deserializer one. An empty string counts as absent.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let (name, email, password) = match (
        non_empty(payload.name),
        non_empty(payload.email),
        non_empty(payload.password),
    ) {
        (Some(name), Some(email), Some(password)) => (name, email, password),
        _ => return Err(ApiError::validation("Missing required fields")),
    };
    let role = non_empty(payload.role).unwrap_or_else(|| "customer".to_string());

    // The uniqueness check and the insert are separate store calls; two
    // concurrent registrations with the same email can both pass the check.
    let existing = state
        .store
        .find_one(collections::USERS, Filter::new().eq("email", email.clone()))
        .await
        .map_err(|err| ApiError::store("Failed to register user", err))?;
    if existing.is_some() {
        return Err(ApiError::conflict("Email already registered"));
    }

    let user = Document::new()
        .with("name", name)
        .with("email", email.clone())
        .with("password", password)
        .with("role", role);
    let id = state
        .store
        .insert_one(collections::USERS, user)
        .await
        .map_err(|err| ApiError::store("Failed to register user", err))?;

    tracing::info!(user_id = %id, email = %email, "User registered");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginOk>, ApiError> {
    let (email, password) = match (non_empty(payload.email), non_empty(payload.password)) {
        (Some(email), Some(password)) => (email, password),
        _ => return Err(ApiError::validation("Email and password required")),
    };

    // Credentials are compared exactly as stored.
    let user = state
        .store
        .find_one(
            collections::USERS,
            Filter::new().eq("email", email.clone()).eq("password", password),
        )
        .await
        .map_err(|err| ApiError::store("Login failed", err))?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let user_id = user
        .id()
        .ok_or_else(|| StoreError::backend("stored user is missing its id"))?;

    tracing::info!(user_id = %user_id, "Login successful");
    Ok(Json(LoginOk {
        message: "Login successful".to_string(),
        user_id,
    }))
}

/// Availability payload. Kept as a raw value so anything that is not a
/// JSON boolean, null included, can be rejected explicitly.
#[derive(Debug, Deserialize)]
pub struct SetAvailabilityRequest {
    #[serde(default)]
    pub availability: Option<Value>,
}

/// PATCH /drivers/{id}/status
pub async fn set_driver_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<SetAvailabilityRequest>,
) -> Result<Json<Updated>, ApiError> {
    let driver_id =
        DocumentId::parse(&id).map_err(|_| ApiError::validation("Invalid driver ID"))?;
    let Some(Value::Bool(available)) = payload.availability else {
        return Err(ApiError::validation("Availability must be a boolean"));
    };

    // The role condition makes a non-driver id indistinguishable from an
    // unknown one: both miss the filter and report 404.
    let outcome = state
        .store
        .update_one(
            collections::USERS,
            Filter::id(driver_id).eq("role", "driver"),
            Document::new().with("available", available),
        )
        .await
        .map_err(|err| ApiError::store("Failed to update driver status", err))?;

    if outcome.matched == 0 {
        return Err(ApiError::not_found("Driver not found"));
    }

    tracing::info!(driver_id = %driver_id, available, "Driver availability set");
    Ok(Json(Updated { updated: outcome.modified }))
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
