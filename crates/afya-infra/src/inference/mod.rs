//! Inference service adapter.
//!
//! `HttpInferenceClient` implements
//! [`afya_core::inference::InferenceClient`] against the completion
//! service's HTTP endpoint, enforcing the client-side timeout and mapping
//! transport and status failures onto the [`InferenceError`] taxonomy.
//!
//! [`InferenceError`]: afya_types::error::InferenceError

mod client;
mod types;

pub use client::HttpInferenceClient;
