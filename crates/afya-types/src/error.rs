//! Error taxonomy for the synchronization core.
//!
//! Two failure families with opposite propagation policies:
//!
//! - [`StoreError`] -- durable store calls. Advisory: swallowed (with
//!   logging) everywhere except explicit session deletion, where a silent
//!   failure would leave user-visible inconsistent state.
//! - [`InferenceError`] -- inference service calls. Always surfaced to the
//!   registry's error state, carrying a user-facing
//!   [`ErrorClassification`].
//!
//! Classification is produced directly from the `InferenceError` variant,
//! never inferred downstream from error message text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::time::Duration;

/// Failures from the durable store adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Connection(String),

    #[error("store returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("session exists only locally and has no durable record")]
    NotPersisted,

    #[error("session not found")]
    NotFound,

    #[error("malformed store response: {0}")]
    Decode(String),
}

/// Failures from the inference client.
///
/// A timeout is the client-side threshold being exceeded on a logical
/// operation; the underlying request may still complete later and its
/// result is discarded. Distinct from `Connection`, where no response was
/// reachable at all.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("cannot reach inference service: {0}")]
    Connection(String),

    #[error("inference request exceeded {after:?}")]
    Timeout { after: Duration },

    #[error("inference service requires authentication")]
    AuthRequired,

    #[error("inference service error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("inference failed: {0}")]
    Unknown(String),
}

/// Category of a user-facing inference failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ConnectionError,
    Timeout,
    AuthRequired,
    ServerError,
    Unknown,
}

/// User-facing description of an inference failure.
///
/// Drives the dismissible error banner and the synthetic assistant entry
/// appended to the timeline; it carries no automated-recovery semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorClassification {
    pub kind: ErrorKind,
    pub title: String,
    pub message: String,
    pub suggested_action: String,
}

impl InferenceError {
    /// The classification bucket for this failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            InferenceError::Connection(_) => ErrorKind::ConnectionError,
            InferenceError::Timeout { .. } => ErrorKind::Timeout,
            InferenceError::AuthRequired => ErrorKind::AuthRequired,
            InferenceError::Server { .. } => ErrorKind::ServerError,
            InferenceError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Produce the user-facing classification for this failure.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            InferenceError::Connection(_) => ErrorClassification {
                kind: ErrorKind::ConnectionError,
                title: "Connection failed".to_string(),
                message: "Cannot reach the assistant service.".to_string(),
                suggested_action: "Check your network connection and try again.".to_string(),
            },
            InferenceError::Timeout { after } => ErrorClassification {
                kind: ErrorKind::Timeout,
                title: "Request timed out".to_string(),
                message: format!(
                    "The assistant took longer than {} seconds to respond.",
                    after.as_secs()
                ),
                suggested_action: "Try again in a moment.".to_string(),
            },
            InferenceError::AuthRequired => ErrorClassification {
                kind: ErrorKind::AuthRequired,
                title: "Sign-in required".to_string(),
                message: "Your session is no longer authorized.".to_string(),
                suggested_action: "Sign in again and resend your message.".to_string(),
            },
            InferenceError::Server { status, message } => ErrorClassification {
                kind: ErrorKind::ServerError,
                title: "Assistant service error".to_string(),
                message: if message.is_empty() {
                    format!("The assistant service returned an error (HTTP {status}).")
                } else {
                    message.clone()
                },
                suggested_action: "Try again; if the problem persists, contact support."
                    .to_string(),
            },
            InferenceError::Unknown(message) => ErrorClassification {
                kind: ErrorKind::Unknown,
                title: "Something went wrong".to_string(),
                message: message.clone(),
                suggested_action: "Try sending your message again.".to_string(),
            },
        }
    }
}

impl ErrorClassification {
    /// The text rendered inline in the conversation when a send fails.
    pub fn inline_text(&self) -> String {
        format!(
            "Sorry, I ran into a problem: {} {}",
            self.message, self.suggested_action
        )
    }
}
