//! Wire types for the inference service's chat endpoint.

use serde::{Deserialize, Serialize};

/// Request body for `POST /chat`.
#[derive(Debug, Serialize)]
pub(super) struct ChatRequest<'a> {
    pub message: &'a str,
    pub sender: &'a str,
}

/// Success response body: `{"response": "..."}`.
#[derive(Debug, Deserialize)]
pub(super) struct ChatResponse {
    pub response: Option<String>,
}

/// Failure bodies optionally carry `{"error": "..."}`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ChatErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}
