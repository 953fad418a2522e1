//! Per-session message timeline and send state machine.
//!
//! The timeline is a pure state machine: [`Timeline::apply`] consumes an
//! event, mutates local state, and returns the side effects the caller
//! must execute (mirror writes, the inference call). No IO happens here,
//! which is what makes the send flow testable without adapters.
//!
//! States: `Idle -> Sending -> Idle(success | error)`. A `SendRequested`
//! while already sending is rejected outright -- at most one outstanding
//! inference call per registry instance, overlapping sends are dropped,
//! not queued.

use afya_types::error::ErrorClassification;
use afya_types::message::MessageEntry;

/// Input to the send state machine.
#[derive(Debug)]
pub enum TimelineEvent {
    /// The user submitted an utterance; `entry` is the optimistic user
    /// message to append before any network activity.
    SendRequested { entry: MessageEntry },
    /// The inference call succeeded; `entry` is the assistant response.
    SendCompleted { entry: MessageEntry },
    /// The inference call failed.
    SendFailed { classification: ErrorClassification },
}

/// Side effect the caller must execute after an [`apply`](Timeline::apply).
#[derive(Debug)]
pub enum Effect {
    /// Mirror this entry to the durable store, fire-and-forget.
    Mirror(MessageEntry),
    /// Invoke the inference service with this utterance.
    Invoke { utterance: String },
}

/// Ordered message state for the active session.
///
/// Entries are append-only and totally ordered by non-decreasing
/// timestamp; appends clamp to the previous entry's timestamp when the
/// clock reads earlier.
#[derive(Debug, Default)]
pub struct Timeline {
    entries: Vec<MessageEntry>,
    sending: bool,
    last_error: Option<ErrorClassification>,
}

impl Timeline {
    /// Fresh idle timeline with no entries and no error.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a timeline from entries loaded out of the store.
    ///
    /// Entries are re-clamped on the way in so a store that returned
    /// slightly out-of-order timestamps cannot break the ordering
    /// invariant.
    pub fn from_entries(entries: Vec<MessageEntry>) -> Self {
        let mut timeline = Self::new();
        for entry in entries {
            timeline.append(entry);
        }
        timeline
    }

    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    pub fn sending(&self) -> bool {
        self.sending
    }

    pub fn last_error(&self) -> Option<&ErrorClassification> {
        self.last_error.as_ref()
    }

    /// Dismiss the error banner.
    pub fn clear_error(&mut self) {
        self.last_error = None;
    }

    /// Advance the state machine and return the effects to execute.
    pub fn apply(&mut self, event: TimelineEvent) -> Vec<Effect> {
        match event {
            TimelineEvent::SendRequested { entry } => {
                if self.sending {
                    // One outstanding request at a time; the composer
                    // stays enabled but this submission is dropped.
                    return Vec::new();
                }
                let utterance = entry.text.clone();
                let appended = self.append(entry);
                self.sending = true;
                vec![Effect::Mirror(appended), Effect::Invoke { utterance }]
            }
            TimelineEvent::SendCompleted { entry } => {
                let appended = self.append(entry);
                self.sending = false;
                self.last_error = None;
                vec![Effect::Mirror(appended)]
            }
            TimelineEvent::SendFailed { classification } => {
                // The failure stays visible inline in the conversation,
                // not just in the banner.
                self.append(MessageEntry::assistant(classification.inline_text()));
                self.last_error = Some(classification);
                self.sending = false;
                Vec::new()
            }
        }
    }

    /// Append an entry, clamping its timestamp to keep ordering
    /// non-decreasing. Returns the entry as stored.
    fn append(&mut self, mut entry: MessageEntry) -> MessageEntry {
        if let Some(last) = self.entries.last()
            && entry.timestamp < last.timestamp
        {
            entry.timestamp = last.timestamp;
        }
        self.entries.push(entry.clone());
        entry
    }
}
