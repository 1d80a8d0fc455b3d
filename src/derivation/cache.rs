use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{DisciplineId, FrameworkLibrary, GradeId, TrackId};

use super::job::Job;
use super::rules;

/// Composite identity of a derived job.
///
/// Keyed by entity ids rather than object identity, so distinct instances of
/// the same logical combination share one cache slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobKey {
    pub discipline: DisciplineId,
    pub grade: GradeId,
    pub track: Option<TrackId>,
}

impl JobKey {
    pub fn new(discipline: &DisciplineId, grade: &GradeId, track: Option<&TrackId>) -> Self {
        Self {
            discipline: discipline.clone(),
            grade: grade.clone(),
            track: track.cloned(),
        }
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.track {
            Some(track) => write!(f, "{}/{}/{}", self.discipline, self.grade, track),
            None => write!(f, "{}/{}", self.discipline, self.grade),
        }
    }
}

/// Memoizes derived jobs per composite key.
///
/// One lock spans the whole check-then-insert, so concurrent requests for
/// the same key never derive twice and never observe a partially built job.
/// Entries never expire on their own; invalidation is explicit.
#[derive(Debug, Default)]
pub struct JobCache {
    entries: Mutex<HashMap<JobKey, Arc<Job>>>,
    derivations: AtomicU64,
}

impl JobCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached job for `key`, deriving and storing it on first
    /// request. Invalid combinations yield `None` and are not cached, so a
    /// later data correction is picked up without an explicit invalidation.
    pub fn get_or_derive(&self, library: &FrameworkLibrary, key: &JobKey) -> Option<Arc<Job>> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(job) = entries.get(key) {
            debug!(key = %key, "job cache hit");
            return Some(Arc::clone(job));
        }

        let discipline = library.discipline(&key.discipline)?;
        let grade = library.grade(&key.grade)?;
        let track = match &key.track {
            Some(id) => Some(library.track(id)?),
            None => None,
        };

        self.derivations.fetch_add(1, Ordering::Relaxed);
        let job = Arc::new(rules::derive_job(discipline, grade, track, library)?);
        entries.insert(key.clone(), Arc::clone(&job));
        debug!(key = %key, "job cache miss, derived");
        Some(job)
    }

    /// Drop one entry. Returns whether it was present.
    pub fn invalidate(&self, key: &JobKey) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many derivations this cache has performed. Observability only,
    /// and the spy the determinism tests rely on.
    pub fn derivations(&self) -> u64 {
        self.derivations.load(Ordering::Relaxed)
    }
}
