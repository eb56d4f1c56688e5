//! The assessment service: shared state for generation and grading.

use crate::bank::{ManualStatus, QuestionBank};
use crate::config::CoreConfig;
use crate::error::AssessmentResult;
use crate::registry::AssessmentRegistry;
use api_shared::wire::ManualRes;
use std::sync::Arc;

/// Stateless request/response operations over the question bank.
///
/// Both operations share the bank client, the resolved configuration and
/// the ephemeral assessment registry; there is no other state. The
/// generation half lives in [`crate::generator`], the grading half in
/// [`crate::grader`].
pub struct AssessmentService {
    pub(crate) cfg: Arc<CoreConfig>,
    pub(crate) bank: Arc<dyn QuestionBank>,
    pub(crate) registry: AssessmentRegistry,
}

impl AssessmentService {
    /// Creates a service over `bank`, sizing the registry from `cfg`.
    pub fn new(cfg: Arc<CoreConfig>, bank: Arc<dyn QuestionBank>) -> Self {
        let registry = AssessmentRegistry::new(cfg.assessment_ttl(), cfg.registry_capacity());
        Self {
            cfg,
            bank,
            registry,
        }
    }

    /// Question count used when a generate request omits one.
    pub fn default_question_count(&self) -> u32 {
        self.cfg.default_question_count()
    }

    /// The published manuals available for assessment.
    ///
    /// Pass-through of the bank's listing, reduced to the fields the
    /// caller needs. Draft manuals are filtered out even if the bank
    /// returns them.
    pub async fn list_manuals(&self) -> AssessmentResult<Vec<ManualRes>> {
        let manuals = self.bank.list_manuals().await?;
        Ok(manuals
            .into_iter()
            .filter(|m| m.status == ManualStatus::Published)
            .map(|m| ManualRes {
                id: m.id,
                title: m.title,
                description: m.description,
                chapter_count: m.chapter_count,
            })
            .collect())
    }
}
