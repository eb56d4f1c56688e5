//! In-memory question bank for tests and local development.

use super::{BankError, Manual, ManualStatus, Question, QuestionBank};
use std::collections::HashMap;

/// Deterministic question bank backed by plain collections.
///
/// Built up with [`with_manual`](InMemoryQuestionBank::with_manual); all
/// trait operations then behave like the real bank, including hiding
/// draft manuals from the listing.
#[derive(Default)]
pub struct InMemoryQuestionBank {
    manuals: Vec<Manual>,
    questions: HashMap<String, Vec<Question>>,
}

impl InMemoryQuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a manual together with its question set.
    pub fn with_manual(mut self, manual: Manual, questions: Vec<Question>) -> Self {
        self.questions.insert(manual.id.clone(), questions);
        self.manuals.push(manual);
        self
    }
}

#[async_trait::async_trait]
impl QuestionBank for InMemoryQuestionBank {
    async fn list_manuals(&self) -> Result<Vec<Manual>, BankError> {
        Ok(self
            .manuals
            .iter()
            .filter(|m| m.status == ManualStatus::Published)
            .cloned()
            .collect())
    }

    async fn fetch_manual(&self, manual_id: &str) -> Result<Option<Manual>, BankError> {
        Ok(self.manuals.iter().find(|m| m.id == manual_id).cloned())
    }

    async fn fetch_questions(&self, manual_id: &str) -> Result<Vec<Question>, BankError> {
        Ok(self.questions.get(manual_id).cloned().unwrap_or_default())
    }

    async fn fetch_question(&self, question_id: &str) -> Result<Option<Question>, BankError> {
        Ok(self
            .questions
            .values()
            .flatten()
            .find(|q| q.id == question_id)
            .cloned())
    }
}
