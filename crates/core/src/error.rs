use crate::bank::BankError;

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("manual not found: {0}")]
    ManualNotFound(String),
    #[error("manual is not published: {0}")]
    ManualNotPublished(String),
    #[error("manual has no questions available: {0}")]
    NoQuestionsAvailable(String),
    #[error("assessment not found or expired: {0}")]
    AssessmentNotFound(String),
    #[error("question not found: {0}")]
    QuestionNotFound(String),
    #[error("assessment {assessment_id} was not generated from manual {manual_id}")]
    AssessmentManualMismatch {
        assessment_id: String,
        manual_id: String,
    },
    #[error("invalid submission: {0}")]
    InvalidSubmission(String),
    #[error("question bank unavailable: {0}")]
    Bank(#[from] BankError),
}

pub type AssessmentResult<T> = std::result::Result<T, AssessmentError>;
