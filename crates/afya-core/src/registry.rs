//! Session registry: session identity, lifecycle, and the send flow.
//!
//! One registry instance owns all mutable conversation state for one
//! signed-in user: the session list, the active session id, and the
//! timeline. Single-owner, single-writer -- every mutation goes through
//! `&mut self` on the cooperative thread, so no locking is needed here.
//! Embedders that need cross-thread access wrap the registry in an actor
//! or a mutex with one writer.
//!
//! Persistence policy: the store is advisory. Creation and loading never
//! fail outward; their store failures are routed to the injected
//! [`PersistenceObserver`] and conversation flow continues. Deletion is
//! the one exception -- a failed delete would leave a session the user
//! believes gone still listed, so it surfaces.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use afya_types::error::{ErrorClassification, StoreError};
use afya_types::identity::OwnerId;
use afya_types::message::MessageEntry;
use afya_types::session::{Session, SessionId};

use crate::inference::InferenceClient;
use crate::observer::PersistenceObserver;
use crate::store::SessionStore;
use crate::timeline::{Effect, Timeline, TimelineEvent};

/// Maximum length of a title derived from a first message.
const DERIVED_TITLE_CHARS: usize = 40;

/// Where the active timeline's entries came from.
///
/// A store outage during load yields an empty timeline just like a brand
/// new session does; this tag keeps the two distinguishable so the
/// presentation layer can say "history unavailable" instead of silently
/// showing nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineSource {
    /// History fetched from the durable store.
    Loaded,
    /// Local-only session; there is no durable history to fetch.
    Unpersisted,
    /// The store call failed; history may exist but is unavailable.
    LoadFailed,
}

/// Owns session identity and lifecycle, composing the durable store and
/// the inference client.
pub struct SessionRegistry<S, I, O> {
    store: Arc<S>,
    inference: Arc<I>,
    observer: Arc<O>,
    sessions: Vec<Session>,
    current: Option<SessionId>,
    timeline: Timeline,
}

impl<S, I, O> SessionRegistry<S, I, O>
where
    S: SessionStore + 'static,
    I: InferenceClient,
    O: PersistenceObserver + 'static,
{
    pub fn new(store: Arc<S>, inference: Arc<I>, observer: Arc<O>) -> Self {
        Self {
            store,
            inference,
            observer,
            sessions: Vec::new(),
            current: None,
            timeline: Timeline::new(),
        }
    }

    // --- Observable state ---

    /// Known sessions, most recently updated first.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// Id of the active session, if any.
    pub fn current(&self) -> Option<&SessionId> {
        self.current.as_ref()
    }

    /// The active session's timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Whether an inference call is outstanding.
    pub fn sending(&self) -> bool {
        self.timeline.sending()
    }

    /// The last inference failure, until dismissed.
    pub fn last_error(&self) -> Option<&ErrorClassification> {
        self.timeline.last_error()
    }

    /// Dismiss the error banner.
    pub fn clear_error(&mut self) {
        self.timeline.clear_error();
    }

    // --- Session lifecycle ---

    /// Create a session and make it current, seeding the timeline with
    /// the first user message.
    ///
    /// Never fails: if the store cannot create a durable record, a
    /// `Local` id is synthesized and the conversation proceeds. The
    /// session list is refreshed from the store best-effort afterwards.
    pub async fn create_session(
        &mut self,
        owner: &OwnerId,
        title: &str,
        first_message: &str,
    ) -> SessionId {
        let session = self.create_session_record(owner, title).await;
        let id = session.id.clone();

        self.insert_session(session);
        self.current = Some(id.clone());

        // Creation seeds the timeline without invoking inference; the
        // first message is mirrored like any other entry.
        let entry = MessageEntry::user(first_message);
        self.timeline = Timeline::from_entries(vec![entry.clone()]);
        self.spawn_mirror(id.clone(), entry);

        self.refresh_sessions(owner).await;
        id
    }

    /// Make `id` the current session and fetch its history.
    ///
    /// Never fails outward: a store failure yields an empty timeline
    /// tagged [`TimelineSource::LoadFailed`].
    pub async fn load_session(&mut self, id: SessionId) -> TimelineSource {
        let source = if id.is_durable() {
            match self.store.list_messages(&id).await {
                Ok(entries) => {
                    self.timeline = Timeline::from_entries(entries);
                    TimelineSource::Loaded
                }
                Err(e) => {
                    self.observer.store_failure("list_messages", &e);
                    self.timeline = Timeline::new();
                    TimelineSource::LoadFailed
                }
            }
        } else {
            // A local session has no durable history by definition.
            self.timeline = Timeline::new();
            TimelineSource::Unpersisted
        };
        self.current = Some(id);
        source
    }

    /// Delete a session and all its message entries.
    ///
    /// The one operation where a store failure surfaces: a session the
    /// user deleted must not silently stay listed.
    pub async fn delete_session(
        &mut self,
        id: &SessionId,
        owner: &OwnerId,
    ) -> Result<(), StoreError> {
        if id.is_durable() {
            self.store.delete_session(id).await?;
        }
        // Local sessions exist nowhere but here.
        self.sessions.retain(|s| &s.id != id);
        if self.current.as_ref() == Some(id) {
            self.current = None;
            self.timeline = Timeline::new();
        }
        info!(session_id = %id, "Session deleted");
        self.refresh_sessions(owner).await;
        Ok(())
    }

    /// Re-list sessions from the store, best-effort.
    ///
    /// On failure the previous list is kept. Local-only sessions always
    /// survive the merge -- the store has never heard of them.
    pub async fn refresh_sessions(&mut self, owner: &OwnerId) {
        match self.store.list_sessions(owner).await {
            Ok(remote) => {
                let locals: Vec<Session> = self
                    .sessions
                    .iter()
                    .filter(|s| !s.id.is_durable())
                    .cloned()
                    .collect();
                self.sessions = remote;
                for local in locals {
                    self.insert_session(local);
                }
            }
            Err(e) => self.observer.store_failure("list_sessions", &e),
        }
    }

    // --- Send flow ---

    /// Send a user utterance on the current session.
    ///
    /// No-op while a send is outstanding. With no current session, one is
    /// created first (title derived from the text). The user entry is
    /// appended optimistically and mirrored fire-and-forget; the mirror
    /// is not ordered against the inference call.
    pub async fn send(&mut self, owner: &OwnerId, text: &str) {
        if self.timeline.sending() {
            debug!("Send rejected: a request is already outstanding");
            return;
        }

        let session_id = match self.current.clone() {
            Some(id) => id,
            None => {
                let session = self
                    .create_session_record(owner, &derive_title(text))
                    .await;
                let id = session.id.clone();
                self.insert_session(session);
                self.current = Some(id.clone());
                self.timeline = Timeline::new();
                id
            }
        };

        let effects = self.timeline.apply(TimelineEvent::SendRequested {
            entry: MessageEntry::user(text),
        });

        for effect in effects {
            match effect {
                Effect::Mirror(entry) => self.spawn_mirror(session_id.clone(), entry),
                Effect::Invoke { utterance } => {
                    let event = match self.inference.send(&utterance, owner).await {
                        Ok(response) => TimelineEvent::SendCompleted {
                            entry: MessageEntry::assistant(response),
                        },
                        Err(e) => TimelineEvent::SendFailed {
                            classification: e.classify(),
                        },
                    };
                    for follow_up in self.timeline.apply(event) {
                        if let Effect::Mirror(entry) = follow_up {
                            self.spawn_mirror(session_id.clone(), entry);
                        }
                    }
                }
            }
        }

        self.touch_session(&session_id);
    }

    // --- Internals ---

    /// Attempt durable creation, falling back to a local session record.
    async fn create_session_record(&mut self, owner: &OwnerId, title: &str) -> Session {
        match self.store.create_session(owner, title).await {
            Ok(id) => {
                info!(session_id = %id, "Session created in store");
                let now = Utc::now();
                Session {
                    id: SessionId::durable(id),
                    owner_id: owner.clone(),
                    title: title.to_string(),
                    created_at: now,
                    updated_at: now,
                }
            }
            Err(e) => {
                self.observer.store_failure("create_session", &e);
                let session = Session::local(owner.clone(), title);
                info!(session_id = %session.id, "Store unavailable, continuing with local session");
                session
            }
        }
    }

    /// Insert keeping the list ordered by `updated_at` descending.
    fn insert_session(&mut self, session: Session) {
        self.sessions.retain(|s| s.id != session.id);
        let at = self
            .sessions
            .partition_point(|s| s.updated_at > session.updated_at);
        self.sessions.insert(at, session);
    }

    /// Bump a session's recency after activity and re-order the list.
    fn touch_session(&mut self, id: &SessionId) {
        if let Some(mut session) = self.sessions.iter().find(|s| &s.id == id).cloned() {
            session.updated_at = Utc::now();
            self.insert_session(session);
        }
    }

    /// Mirror an entry to the store without awaiting it.
    ///
    /// Not on the critical path: the task may still be in flight when the
    /// inference response lands, and its failure only reaches the
    /// observer.
    fn spawn_mirror(&self, session_id: SessionId, entry: MessageEntry) {
        let store = Arc::clone(&self.store);
        let observer = Arc::clone(&self.observer);
        tokio::spawn(async move {
            if let Err(e) = store.append_message(&session_id, &entry).await {
                observer.store_failure("append_message", &e);
            }
        });
    }
}

/// Derive a session title from the first utterance.
fn derive_title(text: &str) -> String {
    let trimmed = text.trim();
    let mut title: String = trimmed.chars().take(DERIVED_TITLE_CHARS).collect();
    if trimmed.chars().count() > DERIVED_TITLE_CHARS {
        title.push('…');
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::InferenceClient;
    use crate::observer::PersistenceObserver;
    use crate::store::SessionStore;
    use afya_types::error::{ErrorKind, InferenceError};
    use afya_types::message::Sender;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    // --- Fakes ---

    /// Working in-memory store honoring the ordering and cascade contracts.
    #[derive(Default)]
    struct MemoryStore {
        sessions: Mutex<Vec<Session>>,
        messages: Mutex<HashMap<String, Vec<MessageEntry>>>,
        next_id: Mutex<u64>,
    }

    impl SessionStore for MemoryStore {
        async fn create_session(
            &self,
            owner: &OwnerId,
            title: &str,
        ) -> Result<String, StoreError> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let id = format!("s{next}");
            let now = Utc::now();
            self.sessions.lock().unwrap().push(Session {
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
            let mut sessions = self.sessions.lock().unwrap();
            let session = sessions
                .iter_mut()
                .find(|s| &s.id == session_id)
                .ok_or(StoreError::NotFound)?;
            session.updated_at = Utc::now();
            self.messages
                .lock()
                .unwrap()
                .entry(session_id.as_str().to_string())
                .or_default()
                .push(entry.clone());
            Ok(())
        }

        async fn list_sessions(&self, owner: &OwnerId) -> Result<Vec<Session>, StoreError> {
            let mut sessions: Vec<Session> = self
                .sessions
                .lock()
                .unwrap()
                .iter()
                .filter(|s| &s.owner_id == owner)
                .cloned()
                .collect();
            sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            Ok(sessions)
        }

        async fn list_messages(
            &self,
            session_id: &SessionId,
        ) -> Result<Vec<MessageEntry>, StoreError> {
            let mut entries = self
                .messages
                .lock()
                .unwrap()
                .get(session_id.as_str())
                .cloned()
                .unwrap_or_default();
            entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
            Ok(entries)
        }

        async fn delete_session(&self, session_id: &SessionId) -> Result<(), StoreError> {
            self.messages.lock().unwrap().remove(session_id.as_str());
            self.sessions.lock().unwrap().retain(|s| &s.id != session_id);
            Ok(())
        }
    }

    /// Store where every call fails, simulating an outage.
    struct OutageStore;

    impl SessionStore for OutageStore {
        async fn create_session(&self, _: &OwnerId, _: &str) -> Result<String, StoreError> {
            Err(StoreError::Connection("store down".into()))
        }
        async fn append_message(
            &self,
            _: &SessionId,
            _: &MessageEntry,
        ) -> Result<(), StoreError> {
            Err(StoreError::Connection("store down".into()))
        }
        async fn list_sessions(&self, _: &OwnerId) -> Result<Vec<Session>, StoreError> {
            Err(StoreError::Connection("store down".into()))
        }
        async fn list_messages(&self, _: &SessionId) -> Result<Vec<MessageEntry>, StoreError> {
            Err(StoreError::Connection("store down".into()))
        }
        async fn delete_session(&self, _: &SessionId) -> Result<(), StoreError> {
            Err(StoreError::Connection("store down".into()))
        }
    }

    /// Inference client answering from a script, one item per send.
    struct ScriptedInference {
        script: Mutex<Vec<Result<String, InferenceError>>>,
    }

    impl ScriptedInference {
        fn new(script: Vec<Result<String, InferenceError>>) -> Self {
            Self {
                script: Mutex::new(script),
            }
        }

        fn echo() -> Self {
            Self {
                script: Mutex::new(Vec::new()),
            }
        }
    }

    impl InferenceClient for ScriptedInference {
        async fn send(&self, utterance: &str, _: &OwnerId) -> Result<String, InferenceError> {
            let mut script = self.script.lock().unwrap();
            if script.is_empty() {
                Ok(format!("echo: {utterance}"))
            } else {
                script.remove(0)
            }
        }
    }

    /// Observer recording every swallowed store failure.
    #[derive(Default)]
    struct RecordingObserver {
        failures: Mutex<Vec<String>>,
    }

    impl RecordingObserver {
        fn operations(&self) -> Vec<String> {
            self.failures.lock().unwrap().clone()
        }
    }

    impl PersistenceObserver for RecordingObserver {
        fn store_failure(&self, operation: &str, _: &StoreError) {
            self.failures.lock().unwrap().push(operation.to_string());
        }
    }

    type TestRegistry<S> = SessionRegistry<S, ScriptedInference, RecordingObserver>;

    fn registry_with<S: SessionStore + 'static>(
        store: S,
        inference: ScriptedInference,
    ) -> (TestRegistry<S>, Arc<S>, Arc<RecordingObserver>) {
        let store = Arc::new(store);
        let observer = Arc::new(RecordingObserver::default());
        let registry = SessionRegistry::new(
            Arc::clone(&store),
            Arc::new(inference),
            Arc::clone(&observer),
        );
        (registry, store, observer)
    }

    fn owner() -> OwnerId {
        OwnerId::from("user-1")
    }

    /// Let fire-and-forget mirror tasks run on the current-thread runtime.
    async fn drain_mirrors() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_n_sends_yield_alternating_ordered_timeline() {
        let (mut registry, _, _) = registry_with(MemoryStore::default(), ScriptedInference::echo());

        for i in 0..4 {
            registry.send(&owner(), &format!("question {i}")).await;
        }

        let entries = registry.timeline().entries();
        assert_eq!(entries.len(), 8);
        for (i, entry) in entries.iter().enumerate() {
            let expected = if i % 2 == 0 { Sender::User } else { Sender::Assistant };
            assert_eq!(entry.sender, expected, "entry {i}");
        }
        assert!(entries.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
        assert!(!registry.sending());
        assert!(registry.last_error().is_none());
    }

    #[tokio::test]
    async fn test_create_session_under_outage_returns_local_id() {
        let (mut registry, _, observer) =
            registry_with(OutageStore, ScriptedInference::echo());

        let id = registry
            .create_session(&owner(), "Malaria symptoms", "What are malaria symptoms?")
            .await;

        assert!(matches!(id, SessionId::Local(_)));
        assert_eq!(registry.current(), Some(&id));
        assert_eq!(registry.sessions().len(), 1);
        // The swallowed failures reached the observer instead of vanishing.
        assert!(observer
            .operations()
            .contains(&"create_session".to_string()));
    }

    #[tokio::test]
    async fn test_create_session_durable_path() {
        let (mut registry, store, _) =
            registry_with(MemoryStore::default(), ScriptedInference::echo());

        let id = registry
            .create_session(&owner(), "Symptoms", "What are malaria symptoms?")
            .await;
        drain_mirrors().await;

        assert!(id.is_durable());
        assert_eq!(registry.timeline().entries().len(), 1);
        let mirrored = store.list_messages(&id).await.unwrap();
        assert_eq!(mirrored.len(), 1);
        assert_eq!(mirrored[0].text, "What are malaria symptoms?");
    }

    #[tokio::test]
    async fn test_send_with_no_session_creates_one() {
        let (mut registry, _, _) = registry_with(MemoryStore::default(), ScriptedInference::echo());

        registry.send(&owner(), "What are malaria symptoms?").await;

        let entries = registry.timeline().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].sender, Sender::User);
        assert_eq!(entries[0].text, "What are malaria symptoms?");
        assert_eq!(entries[1].sender, Sender::Assistant);
        assert!(!registry.sending());
        assert!(registry.last_error().is_none());
        assert!(registry.current().is_some());
        assert_eq!(registry.sessions().len(), 1);
    }

    #[tokio::test]
    async fn test_send_mirrors_both_entries() {
        let (mut registry, store, observer) =
            registry_with(MemoryStore::default(), ScriptedInference::echo());

        registry.send(&owner(), "hello").await;
        drain_mirrors().await;

        let id = registry.current().unwrap().clone();
        let mirrored = store.list_messages(&id).await.unwrap();
        assert_eq!(mirrored.len(), 2);
        assert_eq!(mirrored[0].sender, Sender::User);
        assert_eq!(mirrored[1].sender, Sender::Assistant);
        assert!(observer.operations().is_empty());
    }

    #[tokio::test]
    async fn test_send_proceeds_through_store_outage() {
        let (mut registry, _, observer) = registry_with(OutageStore, ScriptedInference::echo());

        registry.send(&owner(), "hello").await;
        drain_mirrors().await;

        // Conversation flow unaffected; mirror failures observed.
        assert_eq!(registry.timeline().entries().len(), 2);
        assert!(registry.last_error().is_none());
        let operations = observer.operations();
        assert!(operations.contains(&"create_session".to_string()));
        assert!(operations.contains(&"append_message".to_string()));
    }

    #[tokio::test]
    async fn test_timeout_sets_timeout_error_not_connection() {
        let (mut registry, _, _) = registry_with(
            MemoryStore::default(),
            ScriptedInference::new(vec![Err(InferenceError::Timeout {
                after: Duration::from_secs(30),
            })]),
        );

        registry.send(&owner(), "slow question").await;

        assert!(!registry.sending());
        assert_eq!(registry.last_error().unwrap().kind, ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_failed_send_appends_one_synthetic_entry_then_recovers() {
        let (mut registry, _, _) = registry_with(
            MemoryStore::default(),
            ScriptedInference::new(vec![
                Err(InferenceError::Connection("refused".into())),
                Ok("all good now".into()),
            ]),
        );

        registry.send(&owner(), "first try").await;
        let entries = registry.timeline().entries();
        assert_eq!(entries.len(), 2, "user entry plus one synthetic, not two");
        assert_eq!(entries[1].sender, Sender::Assistant);
        assert_eq!(
            registry.last_error().unwrap().kind,
            ErrorKind::ConnectionError
        );

        // No permanent lockout: the next send succeeds normally.
        registry.send(&owner(), "second try").await;
        assert_eq!(registry.timeline().entries().len(), 4);
        assert_eq!(registry.timeline().entries()[3].text, "all good now");
        assert!(registry.last_error().is_none());
    }

    #[tokio::test]
    async fn test_delete_session_removes_from_list_and_store() {
        let (mut registry, store, _) =
            registry_with(MemoryStore::default(), ScriptedInference::echo());

        registry.send(&owner(), "hello").await;
        drain_mirrors().await;
        let id = registry.current().unwrap().clone();

        registry.delete_session(&id, &owner()).await.unwrap();

        assert!(registry.sessions().iter().all(|s| s.id != id));
        assert!(registry.current().is_none());
        assert!(registry.timeline().entries().is_empty());
        assert!(store.list_messages(&id).await.unwrap().is_empty());

        // Loading the deleted session yields an empty timeline.
        let source = registry.load_session(id).await;
        assert_eq!(source, TimelineSource::Loaded);
        assert!(registry.timeline().entries().is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_surfaces() {
        let (mut registry, _, _) = registry_with(OutageStore, ScriptedInference::echo());

        let id = SessionId::durable("s1");
        let result = registry.delete_session(&id, &owner()).await;
        assert!(matches!(result, Err(StoreError::Connection(_))));
    }

    #[tokio::test]
    async fn test_delete_local_session_is_purely_local() {
        let (mut registry, _, _) = registry_with(OutageStore, ScriptedInference::echo());

        let id = registry.create_session(&owner(), "t", "hi").await;
        assert!(matches!(id, SessionId::Local(_)));

        // Succeeds even with the store down: nothing durable to delete.
        registry.delete_session(&id, &owner()).await.unwrap();
        assert!(registry.sessions().is_empty());
    }

    #[tokio::test]
    async fn test_load_session_distinguishes_failure_from_empty() {
        let (mut registry, _, observer) = registry_with(OutageStore, ScriptedInference::echo());

        let durable = registry.load_session(SessionId::durable("s9")).await;
        assert_eq!(durable, TimelineSource::LoadFailed);
        assert!(registry.timeline().entries().is_empty());
        assert!(observer
            .operations()
            .contains(&"list_messages".to_string()));

        let local = registry.load_session(SessionId::new_local()).await;
        assert_eq!(local, TimelineSource::Unpersisted);
    }

    #[tokio::test]
    async fn test_load_session_restores_history() {
        let (mut registry, _, _) = registry_with(MemoryStore::default(), ScriptedInference::echo());

        registry.send(&owner(), "remember this").await;
        drain_mirrors().await;
        let id = registry.current().unwrap().clone();

        let source = registry.load_session(id).await;
        assert_eq!(source, TimelineSource::Loaded);
        let entries = registry.timeline().entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "remember this");
    }

    #[tokio::test]
    async fn test_refresh_keeps_local_sessions_on_merge() {
        let (mut registry, store, _) =
            registry_with(MemoryStore::default(), ScriptedInference::echo());

        // One durable session in the store, one local-only in the registry.
        store.create_session(&owner(), "remote").await.unwrap();
        let local = Session::local(owner(), "offline chat");
        let local_id = local.id.clone();
        registry.insert_session(local);

        registry.refresh_sessions(&owner()).await;

        assert_eq!(registry.sessions().len(), 2);
        assert!(registry.sessions().iter().any(|s| s.id == local_id));
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_list() {
        let (mut registry, _, observer) = registry_with(OutageStore, ScriptedInference::echo());

        let id = registry.create_session(&owner(), "t", "hi").await;
        registry.refresh_sessions(&owner()).await;

        assert_eq!(registry.sessions().len(), 1);
        assert_eq!(&registry.sessions()[0].id, &id);
        assert!(observer
            .operations()
            .contains(&"list_sessions".to_string()));
    }

    #[tokio::test]
    async fn test_sessions_ordered_by_recency() {
        let (mut registry, _, _) = registry_with(MemoryStore::default(), ScriptedInference::echo());

        registry.send(&owner(), "first conversation").await;
        let first = registry.current().unwrap().clone();

        registry.load_session(SessionId::durable("nonexistent")).await;
        registry.current = None;
        registry.send(&owner(), "second conversation").await;
        let second = registry.current().unwrap().clone();

        assert_ne!(first, second);
        assert_eq!(&registry.sessions()[0].id, &second);
    }

    #[tokio::test]
    async fn test_clear_error() {
        let (mut registry, _, _) = registry_with(
            MemoryStore::default(),
            ScriptedInference::new(vec![Err(InferenceError::AuthRequired)]),
        );

        registry.send(&owner(), "q").await;
        assert!(registry.last_error().is_some());

        registry.clear_error();
        assert!(registry.last_error().is_none());
        // The composer stays usable; the inline record stays.
        assert_eq!(registry.timeline().entries().len(), 2);
    }

    #[tokio::test]
    async fn test_store_roundtrip_preserves_sender_text_and_order() {
        let store = MemoryStore::default();
        let id = SessionId::durable(store.create_session(&owner(), "t").await.unwrap());

        let first = MessageEntry::user("question");
        let second = MessageEntry::assistant("answer");
        store.append_message(&id, &first).await.unwrap();
        store.append_message(&id, &second).await.unwrap();

        let listed = store.list_messages(&id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].sender, first.sender);
        assert_eq!(listed[0].text, first.text);
        assert_eq!(listed[1].sender, second.sender);
        assert!(listed[0].timestamp <= listed[1].timestamp);
    }

    #[test]
    fn test_derive_title_truncates_on_char_boundary() {
        assert_eq!(derive_title("  short  "), "short");
        let long = "x".repeat(80);
        let title = derive_title(&long);
        assert_eq!(title.chars().count(), DERIVED_TITLE_CHARS + 1);
        assert!(title.ends_with('…'));
    }
}
