//! Request/response types for the assessment REST surface.
//!
//! Field names follow the JSON contract of the consuming front end
//! (camelCase throughout). Generated assessments expose answers as
//! [`AnswerChoice`], which deliberately has no correctness flag: the
//! grade endpoint is the only place correctness ever appears.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Error body returned alongside any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub message: String,
}

/// A published manual as listed to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManualRes {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub chapter_count: u32,
}

/// Short manual reference embedded in assessment responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManualRef {
    pub id: String,
    pub title: String,
}

/// Request body for `POST /assessments/manuals/{manualId}/generate`.
///
/// `question_count` defaults to the server's configured count (40)
/// when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAssessmentReq {
    pub manual_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_count: Option<u32>,
}

/// An answer choice presented to the learner. No correctness flag, by
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerChoice {
    pub id: String,
    pub answer_text: String,
}

/// A question as presented in a generated assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentQuestion {
    pub id: String,
    pub question_text: String,
    pub chapter_id: String,
    pub chapter_title: String,
    pub answers: Vec<AnswerChoice>,
}

/// Response body for a generated assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAssessmentRes {
    pub assessment_id: String,
    pub manual: ManualRef,
    pub questions: Vec<AssessmentQuestion>,
    pub total_questions: u32,
    pub generated_at: String,
}

/// One submitted answer: the learner's chosen answer for a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: String,
    pub answer_id: String,
}

/// Request body for `POST /assessments/grade`.
///
/// Unanswered questions are simply absent from `answers`; they are
/// graded as incorrect, never as errors.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeAssessmentReq {
    pub assessment_id: String,
    pub manual_id: String,
    pub answers: Vec<SubmittedAnswer>,
}

/// Aggregate score over a graded assessment.
///
/// `total` counts every question in the original assessment, answered
/// or not, so `correct + incorrect == total` always holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub correct: u32,
    pub incorrect: u32,
    pub total: u32,
    pub percentage: f64,
    pub passed: bool,
    pub grade: String,
}

/// Per-question grading detail.
///
/// `user_answer_id` and `user_answer_text` are empty strings when the
/// question was left unanswered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question_id: String,
    pub question_text: String,
    pub chapter_id: String,
    pub chapter_title: String,
    pub user_answer_id: String,
    pub correct_answer_id: String,
    pub is_correct: bool,
    pub user_answer_text: String,
    pub correct_answer_text: String,
}

/// A chapter where the learner's accuracy fell below 100%.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeakChapter {
    pub chapter_id: String,
    pub chapter_title: String,
    pub incorrect_count: u32,
    pub total_count: u32,
    pub accuracy: f64,
}

/// Study recommendations derived from the weak-chapter breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudyRecommendations {
    pub should_review: bool,
    pub weak_chapters: Vec<WeakChapter>,
    pub summary: String,
}

/// Response body for a graded assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeAssessmentRes {
    pub assessment_id: String,
    pub manual: ManualRef,
    pub score: Score,
    pub results: Vec<QuestionResult>,
    pub study_recommendations: StudyRecommendations,
    pub graded_at: String,
}
