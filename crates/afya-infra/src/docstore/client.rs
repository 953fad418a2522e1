//! Reqwest client for the document store.

use std::time::Duration;

use tracing::debug;

use afya_core::store::SessionStore;
use afya_types::error::StoreError;
use afya_types::identity::OwnerId;
use afya_types::message::MessageEntry;
use afya_types::session::{Session, SessionId};

use super::types::{
    AppendMessageBody, CreateSessionBody, CreateSessionResponse, MessagesResponse,
    SessionsResponse,
};

/// Per-call timeout against the store. The store is never on the critical
/// path, so this is kept short.
const STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the durable document store.
pub struct DocStoreClient {
    client: reqwest::Client,
    base_url: String,
}

impl DocStoreClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(STORE_TIMEOUT)
            .build()
            .expect("failed to create reqwest client");
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Require a durable id; `Local` sessions have no remote record.
    fn durable_id<'a>(session_id: &'a SessionId) -> Result<&'a str, StoreError> {
        match session_id {
            SessionId::Durable(id) => Ok(id),
            SessionId::Local(_) => Err(StoreError::NotPersisted),
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        if status.as_u16() == 404 {
            return Err(StoreError::NotFound);
        }
        Err(StoreError::Status {
            code: status.as_u16(),
            body,
        })
    }
}

fn transport(e: reqwest::Error) -> StoreError {
    StoreError::Connection(e.to_string())
}

fn decode(e: reqwest::Error) -> StoreError {
    StoreError::Decode(e.to_string())
}

impl SessionStore for DocStoreClient {
    async fn create_session(&self, owner: &OwnerId, title: &str) -> Result<String, StoreError> {
        let now = chrono::Utc::now();
        let body = CreateSessionBody {
            owner_id: owner.as_str(),
            title,
            created_at: now,
            updated_at: now,
        };
        let response = self
            .client
            .post(self.url("/v1/sessions"))
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        let created: CreateSessionResponse =
            Self::check(response).await?.json().await.map_err(decode)?;
        debug!(session_id = %created.id, "Session document created");
        Ok(created.id)
    }

    async fn append_message(
        &self,
        session_id: &SessionId,
        entry: &MessageEntry,
    ) -> Result<(), StoreError> {
        let id = Self::durable_id(session_id)?;
        let body = AppendMessageBody::from_entry(entry);
        let response = self
            .client
            .post(self.url(&format!("/v1/sessions/{id}/messages")))
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_sessions(&self, owner: &OwnerId) -> Result<Vec<Session>, StoreError> {
        let response = self
            .client
            .get(self.url("/v1/sessions"))
            .query(&[("ownerId", owner.as_str())])
            .send()
            .await
            .map_err(transport)?;
        let listed: SessionsResponse =
            Self::check(response).await?.json().await.map_err(decode)?;
        // The store returns sessions ordered by updatedAt desc.
        Ok(listed.sessions.into_iter().map(Session::from).collect())
    }

    async fn list_messages(&self, session_id: &SessionId) -> Result<Vec<MessageEntry>, StoreError> {
        let id = Self::durable_id(session_id)?;
        let response = self
            .client
            .get(self.url(&format!("/v1/sessions/{id}/messages")))
            .send()
            .await
            .map_err(transport)?;
        let listed: MessagesResponse =
            Self::check(response).await?.json().await.map_err(decode)?;
        listed
            .messages
            .into_iter()
            .map(|doc| doc.into_entry().map_err(StoreError::Decode))
            .collect()
    }

    async fn delete_session(&self, session_id: &SessionId) -> Result<(), StoreError> {
        let id = Self::durable_id(session_id)?;
        // Cascade: message entries first, then the session record, so a
        // failure between the two never orphans messages under a deleted
        // session.
        let response = self
            .client
            .delete(self.url(&format!("/v1/sessions/{id}/messages")))
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await?;

        let response = self
            .client
            .delete(self.url(&format!("/v1/sessions/{id}")))
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await?;
        Ok(())
    }
}
