//! SessionStore trait definition.
//!
//! Pure persistence contract for the durable document store: no retry, no
//! business policy. Every call is attempted exactly once; the caller
//! decides whether a failure is advisory or fatal.
//!
//! Implementations live in `afya-infra` (e.g. `DocStoreClient`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use afya_types::error::StoreError;
use afya_types::identity::OwnerId;
use afya_types::message::MessageEntry;
use afya_types::session::{Session, SessionId};

/// Best-effort persistence of sessions and message entries.
///
/// The store mirrors conversation state, it does not own it: the registry
/// treats it as advisory for everything except explicit deletion.
pub trait SessionStore: Send + Sync {
    /// Create a durable session record and return the store-assigned id.
    fn create_session(
        &self,
        owner: &OwnerId,
        title: &str,
    ) -> impl std::future::Future<Output = Result<String, StoreError>> + Send;

    /// Append one message entry to a session.
    ///
    /// Also bumps the session's `updated_at` so listings stay ordered by
    /// recency. Fails with [`StoreError::NotPersisted`] for `Local` ids.
    fn append_message(
        &self,
        session_id: &SessionId,
        entry: &MessageEntry,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// List an owner's sessions, ordered by `updated_at` descending.
    fn list_sessions(
        &self,
        owner: &OwnerId,
    ) -> impl std::future::Future<Output = Result<Vec<Session>, StoreError>> + Send;

    /// List a session's messages, ordered by timestamp ascending.
    fn list_messages(
        &self,
        session_id: &SessionId,
    ) -> impl std::future::Future<Output = Result<Vec<MessageEntry>, StoreError>> + Send;

    /// Delete a session and everything under it: message entries first,
    /// then the session record.
    fn delete_session(
        &self,
        session_id: &SessionId,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
