//! Ride endpoints: the schemaless CRUD surface.
//!
//! Ride bodies are stored as-is. No field of a ride is required or
//! type-checked beyond being a JSON object, so whatever shape a client
//! submits is what listings later return.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::http::error::ApiError;
use crate::http::request::AppJson;
use crate::http::response::{Created, Deleted, RideStatus, Updated};
use crate::http::server::AppState;
use crate::store::{collections, Document, DocumentId, Filter};

/// GET /rides
pub async fn list_rides(State(state): State<AppState>) -> Result<Json<Vec<Document>>, ApiError> {
    let rides = state
        .store
        .find(collections::RIDES, Filter::new())
        .await
        .map_err(|err| ApiError::store("Failed to fetch rides", err))?;
    Ok(Json(rides))
}

/// POST /rides
pub async fn create_ride(
    State(state): State<AppState>,
    AppJson(body): AppJson<Value>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let Value::Object(fields) = body else {
        return Err(ApiError::validation("Invalid ride data"));
    };

    let id = state
        .store
        .insert_one(collections::RIDES, Document::from(fields))
        .await
        .map_err(|err| ApiError::store("Failed to create ride", err))?;

    tracing::info!(ride_id = %id, "Ride created");
    Ok((StatusCode::CREATED, Json(Created { id })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateRideStatusRequest {
    #[serde(default)]
    pub status: Option<Value>,
}

/// PATCH /rides/{id}
pub async fn update_ride_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateRideStatusRequest>,
) -> Result<Json<Updated>, ApiError> {
    let ride_id = parse_ride_id(&id)?;
    // An absent status field still writes a JSON null.
    let set = Document::new().with("status", payload.status.unwrap_or(Value::Null));

    let outcome = state
        .store
        .update_one(collections::RIDES, Filter::id(ride_id), set)
        .await
        .map_err(|err| ApiError::store("Failed to update ride", err))?;

    // Zero modified reports not-found even when the ride exists with the
    // same status already; callers cannot tell the two cases apart.
    if outcome.modified == 0 {
        return Err(ApiError::not_found("Ride not found"));
    }

    tracing::info!(ride_id = %ride_id, "Ride status updated");
    Ok(Json(Updated { updated: outcome.modified }))
}

/// PUT /rides/{id}
pub async fn replace_ride(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<Value>,
) -> Result<Json<RideStatus>, ApiError> {
    let ride_id = parse_ride_id(&id)?;
    let Value::Object(fields) = body else {
        return Err(ApiError::validation("Invalid ride data"));
    };

    let mut replacement = Document::from(fields);
    // The stored id wins; a client-supplied one never overwrites it.
    replacement.remove_id();

    let outcome = state
        .store
        .replace_one(collections::RIDES, Filter::id(ride_id), replacement)
        .await
        .map_err(|err| ApiError::store("Failed to replace ride", err))?;
    if outcome.matched == 0 {
        return Err(ApiError::not_found("Ride not found"));
    }

    // Re-read rather than echo the input, so the response reflects what
    // the store now holds. A concurrent delete can make this miss.
    let replaced = state
        .store
        .find_one(collections::RIDES, Filter::id(ride_id))
        .await
        .map_err(|err| ApiError::store("Failed to replace ride", err))?
        .ok_or_else(|| ApiError::not_found("Ride not found"))?;

    tracing::info!(ride_id = %ride_id, "Ride replaced");
    Ok(Json(RideStatus {
        status: replaced.get("status").cloned(),
    }))
}

/// DELETE /rides/{id}
pub async fn delete_ride(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
    let ride_id = parse_ride_id(&id)?;

    let outcome = state
        .store
        .delete_one(collections::RIDES, Filter::id(ride_id))
        .await
        .map_err(|err| ApiError::store("Failed to delete ride", err))?;
    if outcome.deleted == 0 {
        return Err(ApiError::not_found("Ride not found"));
    }

    tracing::info!(ride_id = %ride_id, "Ride deleted");
    Ok(Json(Deleted { deleted: outcome.deleted }))
}

fn parse_ride_id(raw: &str) -> Result<DocumentId, ApiError> {
    DocumentId::parse(raw).map_err(|_| ApiError::validation("Invalid ride ID"))
}
