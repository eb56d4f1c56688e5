//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! core services as `Arc<CoreConfig>`. Request handlers never read
//! process-wide environment variables, which keeps behaviour consistent in
//! multi-threaded runtimes and test harnesses.

use crate::constants::{
    DEFAULT_ASSESSMENT_TTL_SECS, DEFAULT_BANK_TIMEOUT_SECS, DEFAULT_PASSING_THRESHOLD,
    DEFAULT_QUESTION_COUNT, REGISTRY_CAPACITY,
};
use crate::{AssessmentError, AssessmentResult};
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    bank_base_url: String,
    passing_threshold: f64,
    default_question_count: u32,
    assessment_ttl: Duration,
    bank_timeout: Duration,
    registry_capacity: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(
        bank_base_url: String,
        passing_threshold: f64,
        default_question_count: u32,
        assessment_ttl: Duration,
    ) -> AssessmentResult<Self> {
        if bank_base_url.trim().is_empty() {
            return Err(AssessmentError::InvalidInput(
                "question bank base URL cannot be empty".into(),
            ));
        }
        if !(0.0..=100.0).contains(&passing_threshold) {
            return Err(AssessmentError::InvalidInput(
                "passing threshold must be between 0 and 100".into(),
            ));
        }
        if default_question_count == 0 {
            return Err(AssessmentError::InvalidInput(
                "default question count must be at least 1".into(),
            ));
        }

        Ok(Self {
            bank_base_url,
            passing_threshold,
            default_question_count,
            assessment_ttl,
            bank_timeout: Duration::from_secs(DEFAULT_BANK_TIMEOUT_SECS),
            registry_capacity: REGISTRY_CAPACITY,
        })
    }

    pub fn bank_base_url(&self) -> &str {
        &self.bank_base_url
    }

    pub fn passing_threshold(&self) -> f64 {
        self.passing_threshold
    }

    pub fn default_question_count(&self) -> u32 {
        self.default_question_count
    }

    pub fn assessment_ttl(&self) -> Duration {
        self.assessment_ttl
    }

    pub fn bank_timeout(&self) -> Duration {
        self.bank_timeout
    }

    pub fn registry_capacity(&self) -> usize {
        self.registry_capacity
    }
}

/// Parse the passing threshold from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default of 70.
pub fn passing_threshold_from_env_value(value: Option<String>) -> AssessmentResult<f64> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        Some(v) => v
            .parse::<f64>()
            .map_err(|_| AssessmentError::InvalidInput(format!("invalid passing threshold: {v}"))),
        None => Ok(DEFAULT_PASSING_THRESHOLD),
    }
}

/// Parse the default question count from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default of 40.
pub fn question_count_from_env_value(value: Option<String>) -> AssessmentResult<u32> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        Some(v) => v
            .parse::<u32>()
            .map_err(|_| AssessmentError::InvalidInput(format!("invalid question count: {v}"))),
        None => Ok(DEFAULT_QUESTION_COUNT),
    }
}

/// Parse the assessment TTL (in seconds) from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default of two
/// hours.
pub fn assessment_ttl_from_env_value(value: Option<String>) -> AssessmentResult<Duration> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let secs = match value {
        Some(v) => v
            .parse::<u64>()
            .map_err(|_| AssessmentError::InvalidInput(format!("invalid assessment TTL: {v}")))?,
        None => DEFAULT_ASSESSMENT_TTL_SECS,
    };

    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cfg() -> CoreConfig {
        CoreConfig::new(
            "http://localhost:4000".into(),
            70.0,
            40,
            Duration::from_secs(3600),
        )
        .expect("CoreConfig::new should succeed")
    }

    #[test]
    fn test_new_accepts_valid_configuration() {
        let cfg = test_cfg();
        assert_eq!(cfg.bank_base_url(), "http://localhost:4000");
        assert_eq!(cfg.passing_threshold(), 70.0);
        assert_eq!(cfg.default_question_count(), 40);
        assert_eq!(cfg.assessment_ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn test_new_rejects_empty_bank_url() {
        let err = CoreConfig::new("  ".into(), 70.0, 40, Duration::from_secs(3600))
            .expect_err("empty bank URL should be rejected");
        assert!(matches!(err, AssessmentError::InvalidInput(_)));
    }

    #[test]
    fn test_new_rejects_out_of_range_threshold() {
        let err = CoreConfig::new(
            "http://localhost:4000".into(),
            120.0,
            40,
            Duration::from_secs(3600),
        )
        .expect_err("threshold above 100 should be rejected");
        assert!(matches!(err, AssessmentError::InvalidInput(_)));
    }

    #[test]
    fn test_new_rejects_zero_question_count() {
        let err = CoreConfig::new(
            "http://localhost:4000".into(),
            70.0,
            0,
            Duration::from_secs(3600),
        )
        .expect_err("zero question count should be rejected");
        assert!(matches!(err, AssessmentError::InvalidInput(_)));
    }

    #[test]
    fn test_passing_threshold_from_env_value_defaults_and_parses() {
        assert_eq!(
            passing_threshold_from_env_value(None).expect("default should succeed"),
            DEFAULT_PASSING_THRESHOLD
        );
        assert_eq!(
            passing_threshold_from_env_value(Some(" 85 ".into())).expect("parse should succeed"),
            85.0
        );
        passing_threshold_from_env_value(Some("many".into()))
            .expect_err("non-numeric threshold should fail");
    }

    #[test]
    fn test_question_count_from_env_value_defaults_and_parses() {
        assert_eq!(
            question_count_from_env_value(None).expect("default should succeed"),
            DEFAULT_QUESTION_COUNT
        );
        assert_eq!(
            question_count_from_env_value(Some("25".into())).expect("parse should succeed"),
            25
        );
        question_count_from_env_value(Some("-3".into()))
            .expect_err("negative count should fail");
    }

    #[test]
    fn test_assessment_ttl_from_env_value_defaults_and_parses() {
        assert_eq!(
            assessment_ttl_from_env_value(None).expect("default should succeed"),
            Duration::from_secs(DEFAULT_ASSESSMENT_TTL_SECS)
        );
        assert_eq!(
            assessment_ttl_from_env_value(Some("60".into())).expect("parse should succeed"),
            Duration::from_secs(60)
        );
    }
}
