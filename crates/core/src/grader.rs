//! Assessment grading.
//!
//! Re-derives correctness from the question bank for every question of a
//! previously generated assessment. Client-declared correctness is never
//! trusted: the authoritative answer set is fetched per question, with
//! the individual fetches issued concurrently and joined before the
//! score is computed.
//!
//! Submission policy:
//! - duplicate question ids are rejected as `InvalidSubmission`
//! - question ids outside the generated assessment are rejected as
//!   `InvalidSubmission` before any fetch, so no partial result exists
//! - an answer id that does not belong to its question simply grades as
//!   incorrect; it can never equal the correct id
//! - unanswered questions grade as incorrect with empty answer fields

use crate::error::{AssessmentError, AssessmentResult};
use crate::scoring;
use crate::service::AssessmentService;
use api_shared::wire::{
    GradeAssessmentRes, ManualRef, QuestionResult, StudyRecommendations, SubmittedAnswer,
};
use chrono::Utc;
use futures::future::try_join_all;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

impl AssessmentService {
    /// Grades a submission against the assessment's generated question set.
    ///
    /// `total` is the number of generated questions, not the number of
    /// submitted answers, so `correct + incorrect == total` holds even
    /// for empty submissions.
    ///
    /// # Errors
    ///
    /// Returns `AssessmentError` if:
    /// - the assessment id is unknown or expired (`AssessmentNotFound`)
    /// - the assessment was generated from a different manual
    ///   (`AssessmentManualMismatch`)
    /// - the manual no longer exists in the bank (`ManualNotFound`)
    /// - a generated question no longer exists (`QuestionNotFound`)
    /// - the submission carries duplicate or out-of-scope question ids
    ///   (`InvalidSubmission`)
    /// - the question bank cannot be reached (`Bank`)
    pub async fn grade(
        &self,
        assessment_id: &str,
        manual_id: &str,
        answers: &[SubmittedAnswer],
    ) -> AssessmentResult<GradeAssessmentRes> {
        let id = Uuid::parse_str(assessment_id)
            .map_err(|_| AssessmentError::AssessmentNotFound(assessment_id.to_string()))?;
        let stored = self
            .registry
            .lookup(&id)
            .ok_or_else(|| AssessmentError::AssessmentNotFound(assessment_id.to_string()))?;
        if stored.manual_id != manual_id {
            return Err(AssessmentError::AssessmentManualMismatch {
                assessment_id: assessment_id.to_string(),
                manual_id: manual_id.to_string(),
            });
        }

        let manual = self
            .bank
            .fetch_manual(manual_id)
            .await?
            .ok_or_else(|| AssessmentError::ManualNotFound(manual_id.to_string()))?;

        let generated: HashSet<&str> = stored.question_ids.iter().map(String::as_str).collect();
        let mut submitted: HashMap<&str, &str> = HashMap::new();
        for answer in answers {
            if !generated.contains(answer.question_id.as_str()) {
                return Err(AssessmentError::InvalidSubmission(format!(
                    "question {} is not part of this assessment",
                    answer.question_id
                )));
            }
            if submitted
                .insert(answer.question_id.as_str(), answer.answer_id.as_str())
                .is_some()
            {
                return Err(AssessmentError::InvalidSubmission(format!(
                    "duplicate answer for question {}",
                    answer.question_id
                )));
            }
        }

        // Authoritative copies, fetched concurrently and joined.
        let fetches = stored.question_ids.iter().map(|question_id| async move {
            self.bank
                .fetch_question(question_id)
                .await?
                .ok_or_else(|| AssessmentError::QuestionNotFound(question_id.clone()))
        });
        let questions = try_join_all(fetches).await?;

        let mut results = Vec::with_capacity(questions.len());
        for question in &questions {
            if question.chapter.manual_id != manual_id {
                return Err(AssessmentError::AssessmentManualMismatch {
                    assessment_id: assessment_id.to_string(),
                    manual_id: manual_id.to_string(),
                });
            }

            let user_answer_id = submitted
                .get(question.id.as_str())
                .copied()
                .unwrap_or_default();
            let user_answer_text = question
                .answers
                .iter()
                .find(|a| a.id == user_answer_id)
                .map(|a| a.answer_text.clone())
                .unwrap_or_default();
            let (correct_answer_id, correct_answer_text) = question
                .correct_answer()
                .map(|a| (a.id.clone(), a.answer_text.clone()))
                .unwrap_or_default();
            let is_correct = !user_answer_id.is_empty() && user_answer_id == correct_answer_id;

            results.push(QuestionResult {
                question_id: question.id.clone(),
                question_text: question.question_text.clone(),
                chapter_id: question.chapter_id.clone(),
                chapter_title: question.chapter.title.clone(),
                user_answer_id: user_answer_id.to_string(),
                correct_answer_id,
                is_correct,
                user_answer_text,
                correct_answer_text,
            });
        }

        let correct = results.iter().filter(|r| r.is_correct).count() as u32;
        let total = stored.question_ids.len() as u32;
        let score = scoring::compute_score(correct, total, self.cfg.passing_threshold());
        let weak_chapters = scoring::weak_chapters(&results);
        let summary = scoring::recommendation_summary(&weak_chapters);

        tracing::info!(
            "graded assessment {assessment_id}: {correct}/{total} correct, passed={}",
            score.passed
        );

        Ok(GradeAssessmentRes {
            assessment_id: assessment_id.to_string(),
            manual: ManualRef {
                id: manual.id,
                title: manual.title,
            },
            score,
            results,
            study_recommendations: StudyRecommendations {
                should_review: !weak_chapters.is_empty(),
                weak_chapters,
                summary,
            },
            graded_at: Utc::now().to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{Answer, ChapterRef, InMemoryQuestionBank, Manual, ManualStatus, Question};
    use crate::config::CoreConfig;
    use std::sync::Arc;
    use std::time::Duration;

    fn published_manual(id: &str, title: &str) -> Manual {
        Manual {
            id: id.into(),
            title: title.into(),
            description: None,
            status: ManualStatus::Published,
            chapter_count: 2,
        }
    }

    fn chapter(id: &str, manual_id: &str, title: &str) -> ChapterRef {
        ChapterRef {
            id: id.into(),
            manual_id: manual_id.into(),
            title: title.into(),
        }
    }

    fn answer(id: &str, is_correct: bool) -> Answer {
        Answer {
            id: id.into(),
            answer_text: format!("Answer {id}"),
            is_correct,
            order: 0,
        }
    }

    fn question(id: &str, chapter: &ChapterRef, answers: Vec<Answer>) -> Question {
        Question {
            id: id.into(),
            chapter_id: chapter.id.clone(),
            question_text: format!("Question {id}"),
            order: 0,
            answers,
            chapter: chapter.clone(),
        }
    }

    /// Manual `m1`: chapter `c1` with `q1` (correct `a1`) and `q2`
    /// (correct `a3`), chapter `c2` with `q3` (correct `a5`).
    fn scenario_bank() -> InMemoryQuestionBank {
        let c1 = chapter("c1", "m1", "Road signs");
        let c2 = chapter("c2", "m1", "Speed limits");
        InMemoryQuestionBank::new().with_manual(
            published_manual("m1", "Car Manual"),
            vec![
                question("q1", &c1, vec![answer("a1", true), answer("a2", false)]),
                question("q2", &c1, vec![answer("a3", true), answer("a4", false)]),
                question("q3", &c2, vec![answer("a5", true), answer("a6", false)]),
            ],
        )
    }

    fn service(bank: InMemoryQuestionBank) -> AssessmentService {
        let cfg = Arc::new(
            CoreConfig::new(
                "http://localhost:4000".into(),
                70.0,
                40,
                Duration::from_secs(3600),
            )
            .expect("CoreConfig::new should succeed"),
        );
        AssessmentService::new(cfg, Arc::new(bank))
    }

    fn submitted(pairs: &[(&str, &str)]) -> Vec<SubmittedAnswer> {
        pairs
            .iter()
            .map(|(question_id, answer_id)| SubmittedAnswer {
                question_id: (*question_id).into(),
                answer_id: (*answer_id).into(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_grade_example_scenario() {
        let service = service(scenario_bank());
        let generated = service
            .generate("m1", 3)
            .await
            .expect("generate should succeed");

        let res = service
            .grade(
                &generated.assessment_id,
                "m1",
                &submitted(&[("q1", "a1"), ("q2", "a4"), ("q3", "a5")]),
            )
            .await
            .expect("grade should succeed");

        assert_eq!(res.score.correct, 2);
        assert_eq!(res.score.incorrect, 1);
        assert_eq!(res.score.total, 3);
        assert!((res.score.percentage - 66.7).abs() < 0.1);
        assert!(!res.score.passed);

        let weak = &res.study_recommendations.weak_chapters;
        assert_eq!(weak.len(), 1, "only the missed chapter is weak");
        assert_eq!(weak[0].chapter_id, "c1");
        assert_eq!(weak[0].incorrect_count, 1);
        assert_eq!(weak[0].total_count, 2);
        assert_eq!(weak[0].accuracy, 50.0);
        assert!(res.study_recommendations.should_review);
        assert!(res.study_recommendations.summary.contains("Road signs"));
    }

    #[tokio::test]
    async fn test_grade_all_correct_passes_with_grade_a() {
        let service = service(scenario_bank());
        let generated = service
            .generate("m1", 3)
            .await
            .expect("generate should succeed");

        let res = service
            .grade(
                &generated.assessment_id,
                "m1",
                &submitted(&[("q1", "a1"), ("q2", "a3"), ("q3", "a5")]),
            )
            .await
            .expect("grade should succeed");

        assert_eq!(res.score.percentage, 100.0);
        assert_eq!(res.score.incorrect, 0);
        assert!(res.score.passed);
        assert_eq!(res.score.grade, "A");
        assert!(!res.study_recommendations.should_review);
        assert!(res.study_recommendations.weak_chapters.is_empty());
        assert!(res.results.iter().all(|r| r.is_correct));
    }

    #[tokio::test]
    async fn test_grade_empty_submission_counts_everything_incorrect() {
        let service = service(scenario_bank());
        let generated = service
            .generate("m1", 3)
            .await
            .expect("generate should succeed");

        let res = service
            .grade(&generated.assessment_id, "m1", &[])
            .await
            .expect("empty submission should still grade");

        assert_eq!(res.score.correct, 0);
        assert_eq!(res.score.total, 3, "total covers unanswered questions");
        assert!(res.results.iter().all(|r| !r.is_correct));
        assert!(res
            .results
            .iter()
            .all(|r| r.user_answer_id.is_empty() && r.user_answer_text.is_empty()));

        let weak_ids: Vec<&str> = res
            .study_recommendations
            .weak_chapters
            .iter()
            .map(|c| c.chapter_id.as_str())
            .collect();
        assert_eq!(weak_ids.len(), 2, "every chapter with questions is weak");
        assert!(weak_ids.contains(&"c1") && weak_ids.contains(&"c2"));
    }

    #[tokio::test]
    async fn test_grade_foreign_answer_id_is_just_incorrect() {
        let service = service(scenario_bank());
        let generated = service
            .generate("m1", 3)
            .await
            .expect("generate should succeed");

        let res = service
            .grade(
                &generated.assessment_id,
                "m1",
                &submitted(&[("q1", "a5"), ("q2", "a3"), ("q3", "a5")]),
            )
            .await
            .expect("a foreign answer id should not error");

        let q1 = res
            .results
            .iter()
            .find(|r| r.question_id == "q1")
            .expect("q1 should be in the results");
        assert!(!q1.is_correct);
        assert!(
            q1.user_answer_text.is_empty(),
            "a foreign answer id has no text on this question"
        );
        assert_eq!(res.score.correct, 2);
    }

    #[tokio::test]
    async fn test_grade_rejects_out_of_scope_question_id() {
        let service = service(scenario_bank());
        let generated = service
            .generate("m1", 2)
            .await
            .expect("generate should succeed");

        // One id is guaranteed absent from a 2-of-3 selection.
        let absent = ["q1", "q2", "q3"]
            .iter()
            .find(|id| !generated.questions.iter().any(|q| &q.id == *id))
            .expect("one question must be unselected");

        let err = service
            .grade(
                &generated.assessment_id,
                "m1",
                &submitted(&[(absent, "a1")]),
            )
            .await
            .expect_err("out-of-scope question id should be rejected");
        assert!(matches!(err, AssessmentError::InvalidSubmission(_)));
    }

    #[tokio::test]
    async fn test_grade_rejects_duplicate_question_ids() {
        let service = service(scenario_bank());
        let generated = service
            .generate("m1", 3)
            .await
            .expect("generate should succeed");

        let err = service
            .grade(
                &generated.assessment_id,
                "m1",
                &submitted(&[("q1", "a1"), ("q1", "a2")]),
            )
            .await
            .expect_err("duplicate question ids should be rejected");
        assert!(matches!(err, AssessmentError::InvalidSubmission(_)));
    }

    #[tokio::test]
    async fn test_grade_unknown_assessment_fails() {
        let service = service(scenario_bank());

        let err = service
            .grade(&Uuid::new_v4().to_string(), "m1", &[])
            .await
            .expect_err("unknown assessment id should fail");
        assert!(matches!(err, AssessmentError::AssessmentNotFound(_)));

        let err = service
            .grade("not-a-uuid", "m1", &[])
            .await
            .expect_err("malformed assessment id should fail");
        assert!(matches!(err, AssessmentError::AssessmentNotFound(_)));
    }

    #[tokio::test]
    async fn test_grade_manual_mismatch_fails() {
        let c9 = chapter("c9", "m2", "Other chapter");
        let bank = scenario_bank().with_manual(
            published_manual("m2", "Motorcycle Manual"),
            vec![question(
                "q9",
                &c9,
                vec![answer("a9", true), answer("a10", false)],
            )],
        );
        let service = service(bank);
        let generated = service
            .generate("m1", 3)
            .await
            .expect("generate should succeed");

        let err = service
            .grade(&generated.assessment_id, "m2", &[])
            .await
            .expect_err("grading against the wrong manual should fail");
        assert!(matches!(
            err,
            AssessmentError::AssessmentManualMismatch { .. }
        ));
    }

    #[tokio::test]
    async fn test_grade_expired_assessment_fails() {
        let cfg = Arc::new(
            CoreConfig::new("http://localhost:4000".into(), 70.0, 40, Duration::ZERO)
                .expect("CoreConfig::new should succeed"),
        );
        let service = AssessmentService::new(cfg, Arc::new(scenario_bank()));
        let generated = service
            .generate("m1", 3)
            .await
            .expect("generate should succeed");

        let err = service
            .grade(&generated.assessment_id, "m1", &[])
            .await
            .expect_err("expired assessment should not be gradable");
        assert!(matches!(err, AssessmentError::AssessmentNotFound(_)));
    }
}
