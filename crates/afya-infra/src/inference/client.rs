//! Reqwest client for the inference service.
//!
//! One send per logical operation, no retry. The timeout applies per
//! request; when it fires the logical operation fails as `Timeout` even
//! though the underlying request may still complete on the wire -- that
//! late result is dropped with the connection.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use afya_core::inference::InferenceClient;
use afya_types::error::InferenceError;
use afya_types::identity::OwnerId;

use super::types::{ChatErrorBody, ChatRequest, ChatResponse};

/// Default client-side timeout for one inference call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the completion service.
///
/// The optional API key is wrapped in [`SecretString`] and only exposed
/// when building the authorization header; it never appears in logs or
/// Debug output.
pub struct HttpInferenceClient {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
    api_key: Option<SecretString>,
}

impl HttpInferenceClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("failed to create reqwest client");
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            api_key: None,
        }
    }

    /// Override the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attach a bearer token for services that require one.
    pub fn with_api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }

    fn map_transport(&self, e: reqwest::Error) -> InferenceError {
        if e.is_timeout() {
            InferenceError::Timeout { after: self.timeout }
        } else if e.is_connect() {
            InferenceError::Connection(e.to_string())
        } else {
            InferenceError::Unknown(e.to_string())
        }
    }
}

impl InferenceClient for HttpInferenceClient {
    async fn send(&self, utterance: &str, owner: &OwnerId) -> Result<String, InferenceError> {
        let body = ChatRequest {
            message: utterance,
            sender: owner.as_str(),
        };

        let mut request = self
            .client
            .post(self.chat_url())
            .timeout(self.timeout)
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request.send().await.map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => InferenceError::AuthRequired,
                code => {
                    let parsed: ChatErrorBody = serde_json::from_str(&body).unwrap_or_default();
                    InferenceError::Server {
                        status: code,
                        message: parsed.error.unwrap_or_default(),
                    }
                }
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::Unknown(format!("malformed response: {e}")))?;

        match parsed.response {
            Some(text) if !text.is_empty() => {
                debug!(chars = text.len(), "Inference response received");
                Ok(text)
            }
            _ => Err(InferenceError::Unknown(
                "assistant returned an empty response".to_string(),
            )),
        }
    }
}
