//! # API Shared
//!
//! Shared wire definitions for the assessment service APIs.
//!
//! Contains:
//! - Request/response types for the REST surface (`wire` module)
//! - Shared services like `HealthService`
//!
//! The types here mirror the JSON contract consumed by the web front end:
//! camelCase field names, timestamps as RFC 3339 strings, and generated
//! assessments whose answer choices carry no correctness information.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
