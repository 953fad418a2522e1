//! Session registry, timeline state machine, and adapter ports for the
//! Afya chat core.
//!
//! This crate defines the "ports" (the [`store::SessionStore`] and
//! [`inference::InferenceClient`] traits) that the infrastructure layer
//! implements, plus the business logic that composes them: the
//! [`timeline::Timeline`] send state machine and the
//! [`registry::SessionRegistry`]. It depends only on `afya-types` --
//! never on `afya-infra` or any HTTP/IO crate.

pub mod inference;
pub mod observer;
pub mod registry;
pub mod store;
pub mod timeline;
