//! Session identity and metadata types.
//!
//! A session is one conversation thread between a user and the inference
//! service. Session identity is a tagged union: ids assigned by the durable
//! store are `Durable`, ids synthesized client-side when the store was
//! unreachable are `Local`. The tag never changes for the lifetime of a
//! session, so calling code must branch explicitly before treating a
//! session as persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;

use crate::identity::OwnerId;

/// Prefix carried by every client-synthesized session id.
///
/// Matches the wire form of ids the dashboard has historically written, so
/// a `Local` id round-trips through storage or serialization unambiguously.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Identity of a session, tagged by where the id was minted.
///
/// Serialized as a plain string: `Local` ids carry the `local-` prefix,
/// anything else is `Durable`. In code the two are distinct variants so a
/// not-yet-persisted session cannot be mistaken for a durable one without
/// an explicit match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SessionId {
    /// Id assigned by the durable store.
    Durable(String),
    /// Id synthesized client-side when durable creation failed.
    /// Never reconciled with a durable id later.
    Local(String),
}

impl SessionId {
    /// Wrap an id returned by the durable store.
    pub fn durable(id: impl Into<String>) -> Self {
        SessionId::Durable(id.into())
    }

    /// Synthesize a fresh local id.
    ///
    /// UUIDv7 is timestamp-ordered with a random suffix, preserving the
    /// uniqueness properties of the historical `local-{millis}-{random}`
    /// scheme.
    pub fn new_local() -> Self {
        SessionId::Local(format!("{LOCAL_ID_PREFIX}{}", Uuid::now_v7()))
    }

    /// The raw string form, as stored and transmitted.
    pub fn as_str(&self) -> &str {
        match self {
            SessionId::Durable(s) | SessionId::Local(s) => s,
        }
    }

    /// Whether this session has a durable record behind it.
    pub fn is_durable(&self) -> bool {
        matches!(self, SessionId::Durable(_))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        if s.starts_with(LOCAL_ID_PREFIX) {
            SessionId::Local(s)
        } else {
            SessionId::Durable(s)
        }
    }
}

impl From<SessionId> for String {
    fn from(id: SessionId) -> String {
        match id {
            SessionId::Durable(s) | SessionId::Local(s) => s,
        }
    }
}

/// A conversation session between a user and the inference service.
///
/// `updated_at` is bumped by the store whenever a message is appended;
/// session listings are ordered by it, most recent first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub owner_id: OwnerId,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Build a session record for a just-synthesized local id.
    pub fn local(owner_id: OwnerId, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::new_local(),
            owner_id,
            title: title.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
