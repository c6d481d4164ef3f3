#![deny(missing_docs)]

//! Core library for the student records service.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// Student records, storage, and service orchestration.
pub mod students;
/// Upstream text-generation client used for record summaries.
pub mod summary;
