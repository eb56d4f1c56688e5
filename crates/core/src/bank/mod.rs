//! Question bank collaborator.
//!
//! The question bank is an external service that owns manuals, chapters,
//! questions and answers; this service only reads from it. The
//! [`QuestionBank`] trait is the seam: production code talks to the bank
//! over HTTP ([`HttpQuestionBank`]), tests and local development use the
//! deterministic [`InMemoryQuestionBank`].
//!
//! Bank payloads carry correctness flags (`isCorrect`). They must never
//! leave the core untransformed; generated assessments expose only
//! identifier and text per answer.

use serde::{Deserialize, Serialize};

pub mod http;
pub mod memory;

pub use http::HttpQuestionBank;
pub use memory::InMemoryQuestionBank;

/// Publication status of a manual. Only published manuals are eligible
/// for assessment generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManualStatus {
    Draft,
    Published,
}

/// A study manual, the top-level document assessments are based on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manual {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ManualStatus,
    #[serde(default)]
    pub chapter_count: u32,
}

/// The chapter a question belongs to, as embedded in bank question
/// payloads. Carrying `manual_id` here lets the grader verify manual
/// membership without extra round trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterRef {
    pub id: String,
    pub manual_id: String,
    pub title: String,
}

/// An answer as the bank stores it, correctness flag included.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub id: String,
    pub answer_text: String,
    pub is_correct: bool,
    #[serde(default)]
    pub order: u32,
}

/// A question with its ordered answer set and owning chapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub chapter_id: String,
    pub question_text: String,
    #[serde(default)]
    pub order: u32,
    pub answers: Vec<Answer>,
    pub chapter: ChapterRef,
}

impl Question {
    /// The authoritative correct answer.
    ///
    /// The bank guarantees exactly one answer per question is flagged
    /// correct. Should that invariant ever be violated upstream, the
    /// first flagged answer in answer order wins; a question with no
    /// flagged answer yields `None` and can never be answered correctly.
    pub fn correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.is_correct)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BankError {
    #[error("question bank request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("question bank returned status {status} for {path}")]
    UnexpectedStatus { status: u16, path: String },
}

/// Read operations the assessment core needs from the question bank.
#[async_trait::async_trait]
pub trait QuestionBank: Send + Sync {
    /// All published manuals.
    async fn list_manuals(&self) -> Result<Vec<Manual>, BankError>;

    /// A single manual by id, `None` when the bank has no such manual.
    async fn fetch_manual(&self, manual_id: &str) -> Result<Option<Manual>, BankError>;

    /// Every question across all chapters of a manual, answers and
    /// correctness flags included.
    async fn fetch_questions(&self, manual_id: &str) -> Result<Vec<Question>, BankError>;

    /// A single question by id, `None` when the bank has no such question.
    async fn fetch_question(&self, question_id: &str) -> Result<Option<Question>, BankError>;
}
