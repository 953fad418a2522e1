//! Shared domain types for the Afya chat core.
//!
//! This crate contains the types used across the session/message
//! synchronization layer: sessions, message entries, owner identity,
//! error taxonomy, and configuration.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod identity;
pub mod message;
pub mod session;
