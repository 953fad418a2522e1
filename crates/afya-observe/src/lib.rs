//! Telemetry initialization for Afya binaries.

pub mod tracing_setup;
