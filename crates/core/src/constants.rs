//! Shared constants for the assessment core.

/// Percentage a learner must reach to pass, unless overridden at startup.
pub const DEFAULT_PASSING_THRESHOLD: f64 = 70.0;

/// Question count requested when the caller omits one. Matches the fixed
/// count the web front end always asks for.
pub const DEFAULT_QUESTION_COUNT: u32 = 40;

/// How long a generated assessment stays gradable.
pub const DEFAULT_ASSESSMENT_TTL_SECS: u64 = 2 * 60 * 60;

/// Request-level timeout for calls to the question bank.
pub const DEFAULT_BANK_TIMEOUT_SECS: u64 = 10;

/// Upper bound on concurrently outstanding assessments held in memory.
pub const REGISTRY_CAPACITY: usize = 10_000;

/// At most this many chapters are named in the recommendation summary.
pub const MAX_SUMMARY_CHAPTERS: usize = 3;
