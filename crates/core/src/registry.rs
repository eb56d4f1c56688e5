//! Ephemeral registry of generated assessments.
//!
//! The grader is stateless with respect to the generator except for one
//! piece of correlation data: which questions a given assessment id was
//! generated with, and from which manual. That data lives here, in
//! process memory only. Entries expire after a TTL and the map is
//! capacity-bounded; nothing is ever written to disk. Assessments are
//! ephemeral, so losing in-flight entries on restart is acceptable.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// What the grader needs to know about a generated assessment.
#[derive(Debug, Clone)]
pub struct StoredAssessment {
    pub manual_id: String,
    pub question_ids: Vec<String>,
    created_at: Instant,
}

pub struct AssessmentRegistry {
    entries: RwLock<HashMap<Uuid, StoredAssessment>>,
    ttl: Duration,
    capacity: usize,
}

impl AssessmentRegistry {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
            capacity,
        }
    }

    /// Records a freshly generated assessment.
    ///
    /// Expired entries are dropped on every insert. When the registry is
    /// at capacity, the oldest live entry is evicted to make room.
    pub fn insert(&self, assessment_id: Uuid, manual_id: String, question_ids: Vec<String>) {
        let mut entries = match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        entries.retain(|_, e| e.created_at.elapsed() < self.ttl);

        if entries.len() >= self.capacity {
            if let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, e)| e.created_at)
                .map(|(id, _)| *id)
            {
                entries.remove(&oldest);
                tracing::warn!("assessment registry at capacity, evicted {oldest}");
            }
        }

        entries.insert(
            assessment_id,
            StoredAssessment {
                manual_id,
                question_ids,
                created_at: Instant::now(),
            },
        );
    }

    /// Looks up a live assessment. Expired entries behave as absent.
    pub fn lookup(&self, assessment_id: &Uuid) -> Option<StoredAssessment> {
        let entries = match self.entries.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        entries
            .get(assessment_id)
            .filter(|e| e.created_at.elapsed() < self.ttl)
            .cloned()
    }

    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_then_lookup_returns_entry() {
        let registry = AssessmentRegistry::new(Duration::from_secs(60), 16);
        let id = Uuid::new_v4();
        registry.insert(id, "m1".into(), vec!["q1".into(), "q2".into()]);

        let stored = registry.lookup(&id).expect("entry should be present");
        assert_eq!(stored.manual_id, "m1");
        assert_eq!(stored.question_ids, vec!["q1", "q2"]);
    }

    #[test]
    fn test_lookup_unknown_id_returns_none() {
        let registry = AssessmentRegistry::new(Duration::from_secs(60), 16);
        assert!(registry.lookup(&Uuid::new_v4()).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_expired_entries_behave_as_absent() {
        let registry = AssessmentRegistry::new(Duration::ZERO, 16);
        let id = Uuid::new_v4();
        registry.insert(id, "m1".into(), vec!["q1".into()]);

        assert!(
            registry.lookup(&id).is_none(),
            "entry past its TTL should not be returned"
        );
    }

    #[test]
    fn test_capacity_bound_evicts_to_make_room() {
        let registry = AssessmentRegistry::new(Duration::from_secs(60), 2);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let third = Uuid::new_v4();

        registry.insert(first, "m1".into(), vec![]);
        registry.insert(second, "m1".into(), vec![]);
        registry.insert(third, "m1".into(), vec![]);

        assert_eq!(registry.len(), 2, "registry should stay within capacity");
        assert!(
            registry.lookup(&third).is_some(),
            "the newest entry should survive eviction"
        );
    }
}
