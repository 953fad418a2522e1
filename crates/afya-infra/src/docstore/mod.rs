//! Document store adapter.
//!
//! `DocStoreClient` implements [`afya_core::store::SessionStore`] against
//! the remote document store: a `sessions` collection with a nested
//! `messages` collection per session. Availability is not guaranteed and
//! every call is attempted exactly once; retry policy belongs to callers.

mod client;
mod types;

pub use client::DocStoreClient;
