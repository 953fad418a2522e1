//! In-process session store.
//!
//! Backs the CLI's offline mode and integration tests. Honors the same
//! contracts as the remote store: listings ordered by recency, messages
//! by timestamp, cascade deletion, `updated_at` bumped on append.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use uuid::Uuid;

use afya_core::store::SessionStore;
use afya_types::error::StoreError;
use afya_types::identity::OwnerId;
use afya_types::message::MessageEntry;
use afya_types::session::{Session, SessionId};

#[derive(Default)]
struct Inner {
    sessions: Vec<Session>,
    messages: HashMap<String, Vec<MessageEntry>>,
}

/// `SessionStore` backed by process memory.
#[derive(Default)]
pub struct MemorySessionStore {
    inner: Mutex<Inner>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    async fn create_session(&self, owner: &OwnerId, title: &str) -> Result<String, StoreError> {
        let id = Uuid::now_v7().to_string();
        let now = Utc::now();
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        inner.sessions.push(Session {
            id: SessionId::durable(id.clone()),
            owner_id: owner.clone(),
            title: title.to_string(),
            created_at: now,
            updated_at: now,
        });
        Ok(id)
    }

    async fn append_message(
        &self,
        session_id: &SessionId,
        entry: &MessageEntry,
    ) -> Result<(), StoreError> {
        if !session_id.is_durable() {
            return Err(StoreError::NotPersisted);
        }
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        let session = inner
            .sessions
            .iter_mut()
            .find(|s| &s.id == session_id)
            .ok_or(StoreError::NotFound)?;
        session.updated_at = Utc::now();
        inner
            .messages
            .entry(session_id.as_str().to_string())
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    async fn list_sessions(&self, owner: &OwnerId) -> Result<Vec<Session>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        let mut sessions: Vec<Session> = inner
            .sessions
            .iter()
            .filter(|s| &s.owner_id == owner)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }

    async fn list_messages(&self, session_id: &SessionId) -> Result<Vec<MessageEntry>, StoreError> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        let mut entries = inner
            .messages
            .get(session_id.as_str())
            .cloned()
            .unwrap_or_default();
        entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(entries)
    }

    async fn delete_session(&self, session_id: &SessionId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        // Cascade order matches the remote store: messages, then session.
        inner.messages.remove(session_id.as_str());
        inner.sessions.retain(|s| &s.id != session_id);
        Ok(())
    }
}
