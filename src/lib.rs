#![deny(missing_docs)]

//! Core library for the Quotaday quotation server.

/// Client resolution and per-request access logging.
pub mod access_log;
/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Quote traffic counters.
pub mod metrics;
/// Bounded quotation store and its encodings.
pub mod quote;
/// Build version reporting.
pub mod version;
