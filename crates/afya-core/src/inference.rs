//! InferenceClient trait definition.
//!
//! One logical operation: send a user utterance, get assistant text back.
//! Failures come back as [`InferenceError`] variants so the registry can
//! derive user-facing messaging without ever inspecting error text. No
//! automatic retry; the user resubmits.
//!
//! Implementations live in `afya-infra` (e.g. `HttpInferenceClient`).

use afya_types::error::InferenceError;
use afya_types::identity::OwnerId;

/// Client for the remote completion service.
pub trait InferenceClient: Send + Sync {
    /// Send one utterance on behalf of an owner and return the assistant's
    /// response text.
    ///
    /// A call exceeding the client-side timeout fails with
    /// [`InferenceError::Timeout`]; the transport may still complete the
    /// request afterwards, and that late result is discarded.
    fn send(
        &self,
        utterance: &str,
        owner: &OwnerId,
    ) -> impl std::future::Future<Output = Result<String, InferenceError>> + Send;
}
