//! Scoring and weak-chapter aggregation helpers.
//!
//! Pure functions shared by the grader: aggregate score arithmetic, the
//! letter-grade banding table, per-chapter accuracy, and the
//! human-readable recommendation summary.
//!
//! Banding: >= 90 "A", >= 80 "B", >= 70 "C", below 70 "F".

use crate::constants::MAX_SUMMARY_CHAPTERS;
use api_shared::wire::{QuestionResult, Score, WeakChapter};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Letter grade for a percentage, per the fixed banding table.
pub fn letter_grade(percentage: f64) -> &'static str {
    if percentage >= 90.0 {
        "A"
    } else if percentage >= 80.0 {
        "B"
    } else if percentage >= 70.0 {
        "C"
    } else {
        "F"
    }
}

/// Aggregate score over `total` questions, `correct` of them right.
///
/// `total` is the question count of the original assessment, so
/// unanswered questions count against the learner.
pub fn compute_score(correct: u32, total: u32, passing_threshold: f64) -> Score {
    let percentage = if total == 0 {
        0.0
    } else {
        100.0 * f64::from(correct) / f64::from(total)
    };

    Score {
        correct,
        incorrect: total - correct,
        total,
        percentage,
        passed: percentage >= passing_threshold,
        grade: letter_grade(percentage).to_string(),
    }
}

/// Chapters with at least one incorrect answer, weakest first.
///
/// Sorted by ascending accuracy; ties broken by chapter title so the
/// ordering is deterministic.
pub fn weak_chapters(results: &[QuestionResult]) -> Vec<WeakChapter> {
    let mut by_chapter: HashMap<&str, (&str, u32, u32)> = HashMap::new();
    for result in results {
        let entry = by_chapter
            .entry(result.chapter_id.as_str())
            .or_insert((result.chapter_title.as_str(), 0, 0));
        entry.1 += 1;
        if !result.is_correct {
            entry.2 += 1;
        }
    }

    let mut weak: Vec<WeakChapter> = by_chapter
        .into_iter()
        .filter(|(_, (_, _, incorrect))| *incorrect > 0)
        .map(|(chapter_id, (title, total, incorrect))| WeakChapter {
            chapter_id: chapter_id.to_string(),
            chapter_title: title.to_string(),
            incorrect_count: incorrect,
            total_count: total,
            accuracy: 100.0 * f64::from(total - incorrect) / f64::from(total),
        })
        .collect();

    weak.sort_by(|a, b| {
        a.accuracy
            .partial_cmp(&b.accuracy)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.chapter_title.cmp(&b.chapter_title))
    });

    weak
}

/// One-sentence study recommendation naming the weakest chapters.
///
/// `weak` must already be sorted weakest first; at most three chapters
/// are named.
pub fn recommendation_summary(weak: &[WeakChapter]) -> String {
    let names: Vec<&str> = weak
        .iter()
        .take(MAX_SUMMARY_CHAPTERS)
        .map(|c| c.chapter_title.as_str())
        .collect();

    match names.as_slice() {
        [] => "No chapters need review.".to_string(),
        [only] => format!("Focus your review on {only}."),
        [rest @ .., last] => format!("Focus your review on {} and {}.", rest.join(", "), last),
    }
}
