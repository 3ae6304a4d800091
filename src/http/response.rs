//! Response bodies of the successful paths.
//!
//! Error bodies live with [`crate::http::error::ApiError`]; everything
//! here serializes straight into the success shapes clients rely on.

use serde::Serialize;
use serde_json::Value;

use crate::store::DocumentId;

/// Body of a creation: the assigned id.
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: DocumentId,
}

/// Body of a targeted update: how many documents changed.
#[derive(Debug, Serialize)]
pub struct Updated {
    pub updated: u64,
}

/// Body of a targeted delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: u64,
}

/// Body of a successful login.
#[derive(Debug, Serialize)]
pub struct LoginOk {
    pub message: String,
    #[serde(rename = "userId")]
    pub user_id: DocumentId,
}

/// Body of a ride replacement: the status field of the re-read document.
/// Absent when the replacement carried no status.
#[derive(Debug, Serialize)]
pub struct RideStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,
}

/// Body of the health endpoint.
#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}
