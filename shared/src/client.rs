//! Client-related types shared between the menu API and its clients
//!
//! Request/response DTOs of the remote menu API besides the menu
//! document itself.

use serde::{Deserialize, Serialize};

// =============================================================================
// Menu API DTOs
// =============================================================================

/// `POST /api/upload` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub image_url: String,
}

/// `GET /health` response
///
/// Only the HTTP status matters to clients; the body is informational.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: Option<String>,
}
