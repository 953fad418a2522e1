//! Wire types for the document store API.
//!
//! Field names are camelCase on the wire, matching the documents the
//! dashboard has always written. The wire sender form for assistant
//! entries is `"bot"`, kept for compatibility with existing history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use afya_types::message::{MessageEntry, Sender};
use afya_types::session::{Session, SessionId};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateSessionBody<'a> {
    pub owner_id: &'a str,
    pub title: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateSessionResponse {
    pub id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct SessionDoc {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SessionDoc> for Session {
    fn from(doc: SessionDoc) -> Self {
        Session {
            id: SessionId::from(doc.id),
            owner_id: doc.owner_id.into(),
            title: doc.title,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SessionsResponse {
    pub sessions: Vec<SessionDoc>,
}

#[derive(Debug, Serialize)]
pub(super) struct AppendMessageBody<'a> {
    pub id: Uuid,
    pub sender: &'a str,
    pub text: &'a str,
    pub timestamp: DateTime<Utc>,
}

impl<'a> AppendMessageBody<'a> {
    pub fn from_entry(entry: &'a MessageEntry) -> Self {
        Self {
            id: entry.id,
            sender: wire_sender(entry.sender),
            text: &entry.text,
            timestamp: entry.timestamp,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct MessageDoc {
    /// Entries written by older clients may lack a message id.
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    pub sender: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl MessageDoc {
    pub fn into_entry(self) -> Result<MessageEntry, String> {
        let sender: Sender = self.sender.parse()?;
        Ok(MessageEntry {
            id: self.id,
            sender,
            text: self.text,
            timestamp: self.timestamp,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct MessagesResponse {
    pub messages: Vec<MessageDoc>,
}

/// The sender string written to the store.
pub(super) fn wire_sender(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "user",
        Sender::Assistant => "bot",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_body_uses_legacy_bot_form() {
        let entry = MessageEntry::assistant("hello");
        let body = AppendMessageBody::from_entry(&entry);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["sender"], "bot");
        assert_eq!(json["text"], "hello");
    }

    #[test]
    fn test_message_doc_parses_both_sender_forms() {
        for (wire, expected) in [("bot", Sender::Assistant), ("user", Sender::User)] {
            let doc: MessageDoc = serde_json::from_value(serde_json::json!({
                "sender": wire,
                "text": "hi",
                "timestamp": "2026-01-01T00:00:00Z",
            }))
            .unwrap();
            assert_eq!(doc.into_entry().unwrap().sender, expected);
        }
    }

    #[test]
    fn test_message_doc_rejects_unknown_sender() {
        let doc: MessageDoc = serde_json::from_value(serde_json::json!({
            "sender": "system",
            "text": "hi",
            "timestamp": "2026-01-01T00:00:00Z",
        }))
        .unwrap();
        assert!(doc.into_entry().is_err());
    }

    #[test]
    fn test_session_doc_tags_local_ids() {
        let doc: SessionDoc = serde_json::from_value(serde_json::json!({
            "id": "local-0190-abc",
            "ownerId": "user-1",
            "title": "t",
            "createdAt": "2026-01-01T00:00:00Z",
            "updatedAt": "2026-01-01T00:00:00Z",
        }))
        .unwrap();
        let session: Session = doc.into();
        assert!(!session.id.is_durable());
    }

    #[test]
    fn test_create_body_is_camel_case() {
        let now = Utc::now();
        let body = CreateSessionBody {
            owner_id: "user-1",
            title: "t",
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("ownerId").is_some());
        assert!(json.get("createdAt").is_some());
    }
}
