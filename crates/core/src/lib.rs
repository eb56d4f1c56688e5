//! # Assessment Core
//!
//! Core business logic for the driving-school assessment service.
//!
//! This crate contains pure generation and grading operations against an
//! external question bank:
//! - Random, non-repeating question selection for published manuals
//! - Authoritative grading of submitted answers with per-chapter
//!   weak-area recommendations
//! - An ephemeral in-memory registry correlating generated assessments
//!   with later grade requests
//!
//! **No API concerns**: HTTP servers, OpenAPI documents, or service
//! interfaces belong in `api-rest` or `api-shared`.

pub mod bank;
pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod grader;
pub mod registry;
pub mod scoring;
pub mod service;

pub use bank::{BankError, HttpQuestionBank, InMemoryQuestionBank, QuestionBank};
pub use config::CoreConfig;
pub use error::{AssessmentError, AssessmentResult};
pub use registry::AssessmentRegistry;
pub use service::AssessmentService;
