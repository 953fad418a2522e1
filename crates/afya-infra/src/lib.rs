//! Infrastructure adapters for the Afya chat core.
//!
//! Implements the `afya-core` ports against the real collaborators:
//!
//! - [`docstore`] -- reqwest client for the durable document store.
//! - [`inference`] -- reqwest client for the inference service, with the
//!   client-side timeout and failure classification.
//! - [`memory`] -- in-process store used by offline mode and tests.

pub mod docstore;
pub mod inference;
pub mod memory;
