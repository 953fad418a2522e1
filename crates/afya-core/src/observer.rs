//! Persistence failure observer.
//!
//! Store failures outside of deletion are swallowed by policy -- storage
//! is advisory, never on the critical path of a conversation. Swallowed
//! is not silent: every such failure is routed through an injected
//! observer so production logs capture it and tests can assert on it.

use afya_types::error::StoreError;
use tracing::warn;

/// Sink for store failures that the registry recovers from locally.
pub trait PersistenceObserver: Send + Sync {
    /// Called once per swallowed store failure. `operation` names the
    /// store call that failed (e.g. `"append_message"`).
    fn store_failure(&self, operation: &str, error: &StoreError);
}

/// Default observer: structured warning logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PersistenceObserver for TracingObserver {
    fn store_failure(&self, operation: &str, error: &StoreError) {
        warn!(operation, error = %error, "Store call failed, continuing without persistence");
    }
}
