//! Assessment generation.
//!
//! Given a published manual and a requested question count, selects a
//! uniform random sample of that manual's questions without replacement,
//! strips every correctness flag, and records the selection in the
//! registry so a later grade request can be correlated.
//!
//! Shortfall policy: when the manual has fewer questions than requested,
//! the generator caps at what exists rather than failing; the response's
//! `totalQuestions` reports the actual count.

use crate::bank::ManualStatus;
use crate::error::{AssessmentError, AssessmentResult};
use crate::service::AssessmentService;
use api_shared::wire::{AnswerChoice, AssessmentQuestion, GenerateAssessmentRes, ManualRef};
use chrono::Utc;
use rand::seq::SliceRandom;
use uuid::Uuid;

impl AssessmentService {
    /// Generates a randomized assessment over `manual_id`.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError` if:
    /// - `question_count` is zero (`InvalidInput`)
    /// - the manual does not exist (`ManualNotFound`)
    /// - the manual is not published (`ManualNotPublished`)
    /// - the manual has no questions at all (`NoQuestionsAvailable`)
    /// - the question bank cannot be reached (`Bank`)
    pub async fn generate(
        &self,
        manual_id: &str,
        question_count: u32,
    ) -> AssessmentResult<GenerateAssessmentRes> {
        if question_count == 0 {
            return Err(AssessmentError::InvalidInput(
                "questionCount must be at least 1".into(),
            ));
        }

        let manual = self
            .bank
            .fetch_manual(manual_id)
            .await?
            .ok_or_else(|| AssessmentError::ManualNotFound(manual_id.to_string()))?;
        if manual.status != ManualStatus::Published {
            return Err(AssessmentError::ManualNotPublished(manual_id.to_string()));
        }

        let mut questions = self.bank.fetch_questions(manual_id).await?;
        if questions.is_empty() {
            return Err(AssessmentError::NoQuestionsAvailable(manual_id.to_string()));
        }

        // Shuffle-and-truncate: a uniform sample without replacement,
        // already in randomized presentation order.
        questions.shuffle(&mut rand::thread_rng());
        questions.truncate(question_count as usize);

        let assessment_id = Uuid::new_v4();
        let question_ids: Vec<String> = questions.iter().map(|q| q.id.clone()).collect();
        self.registry
            .insert(assessment_id, manual.id.clone(), question_ids);

        let total_questions = questions.len() as u32;
        tracing::info!(
            "generated assessment {assessment_id} for manual {} with {total_questions} questions",
            manual.id
        );

        Ok(GenerateAssessmentRes {
            assessment_id: assessment_id.to_string(),
            manual: ManualRef {
                id: manual.id,
                title: manual.title,
            },
            questions: questions
                .into_iter()
                .map(|q| AssessmentQuestion {
                    id: q.id,
                    question_text: q.question_text,
                    chapter_id: q.chapter_id,
                    chapter_title: q.chapter.title,
                    answers: q
                        .answers
                        .into_iter()
                        .map(|a| AnswerChoice {
                            id: a.id,
                            answer_text: a.answer_text,
                        })
                        .collect(),
                })
                .collect(),
            total_questions,
            generated_at: Utc::now().to_rfc3339(),
        })
    }
}
