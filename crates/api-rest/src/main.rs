//! Assessment REST API server binary.
//!
//! Resolves configuration from the environment once at startup, wires
//! the HTTP question-bank client into the assessment service, and serves
//! the REST API (with OpenAPI/Swagger UI).
//!
//! # Environment Variables
//! - `ASSESSMENT_REST_ADDR`: server address (default: "0.0.0.0:3000")
//! - `QUESTION_BANK_URL`: base URL of the question bank service
//!   (default: "http://localhost:4000")
//! - `PASSING_THRESHOLD`: pass percentage (default: 70)
//! - `DEFAULT_QUESTION_COUNT`: count used when requests omit one
//!   (default: 40)
//! - `ASSESSMENT_TTL_SECS`: how long generated assessments stay gradable
//!   (default: 7200)

use api_rest::AppState;
use assessment_core::config::{
    assessment_ttl_from_env_value, passing_threshold_from_env_value, question_count_from_env_value,
};
use assessment_core::{AssessmentService, CoreConfig, HttpQuestionBank};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("api_rest=info".parse()?)
                .add_directive("assessment_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("ASSESSMENT_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let bank_url =
        std::env::var("QUESTION_BANK_URL").unwrap_or_else(|_| "http://localhost:4000".into());

    let passing_threshold =
        passing_threshold_from_env_value(std::env::var("PASSING_THRESHOLD").ok())?;
    let default_question_count =
        question_count_from_env_value(std::env::var("DEFAULT_QUESTION_COUNT").ok())?;
    let assessment_ttl = assessment_ttl_from_env_value(std::env::var("ASSESSMENT_TTL_SECS").ok())?;

    let cfg = Arc::new(CoreConfig::new(
        bank_url,
        passing_threshold,
        default_question_count,
        assessment_ttl,
    )?);

    let bank = Arc::new(HttpQuestionBank::new(
        cfg.bank_base_url(),
        cfg.bank_timeout(),
    )?);
    let service = Arc::new(AssessmentService::new(cfg, bank));

    api_rest::serve(&addr, AppState::new(service)).await
}
