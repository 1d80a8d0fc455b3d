use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{BehaviourId, DisciplineId, FrameworkLibrary, SkillId, TrackId};
use crate::derivation::{Job, JobCache, JobKey};
use crate::levels::{MaturityLevel, SkillLevel};

use super::{calculate_job_match, CandidateProfile, MatchResult, MatchTier, MatchWeights};

/// Cap on development-path steps unless a caller asks for more.
pub const DEFAULT_DEVELOPMENT_STEPS: usize = 5;

/// One ranked entry in a cross-catalogue search.
#[derive(Debug, Clone)]
pub struct RankedJob {
    pub job: Arc<Job>,
    pub result: MatchResult,
    pub grade_rank: u8,
}

/// What a development step asks the candidate to raise, and from where.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "focus", rename_all = "snake_case")]
pub enum DevelopmentTarget {
    Skill {
        id: SkillId,
        from: Option<SkillLevel>,
        to: SkillLevel,
    },
    Behaviour {
        id: BehaviourId,
        from: Option<MaturityLevel>,
        to: MaturityLevel,
    },
}

/// One entry in the ordered remediation list between two jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentStep {
    pub name: String,
    pub target: DevelopmentTarget,
    pub priority: f32,
}

/// Every job the catalogue can derive: disciplines × grades × their valid
/// tracks, deduplicated through the cache.
fn enumerate_jobs(library: &FrameworkLibrary, cache: &JobCache) -> Vec<(Arc<Job>, u8)> {
    let mut jobs = Vec::new();
    let mut seen = HashSet::new();

    for discipline in library.disciplines() {
        for grade in library.grades() {
            for track in &discipline.valid_tracks {
                let key = JobKey::new(&discipline.id, &grade.id, track.as_ref());
                if !seen.insert(key.clone()) {
                    continue;
                }
                if let Some(job) = cache.get_or_derive(library, &key) {
                    jobs.push((job, grade.rank));
                }
            }
        }
    }

    jobs
}

fn rank_all(
    candidate: &CandidateProfile,
    library: &FrameworkLibrary,
    cache: &JobCache,
    weights: &MatchWeights,
) -> Vec<RankedJob> {
    enumerate_jobs(library, cache)
        .into_iter()
        .map(|(job, grade_rank)| {
            let result = calculate_job_match(candidate, &job, weights);
            RankedJob {
                job,
                result,
                grade_rank,
            }
        })
        .collect()
}

fn by_score_desc(a: &RankedJob, b: &RankedJob) -> Ordering {
    b.result
        .score
        .partial_cmp(&a.result.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.job.title.cmp(&b.job.title))
}

/// Rank every derivable job for a candidate, best first. Title is the
/// deterministic tie-break on equal scores.
pub fn find_matching_jobs(
    candidate: &CandidateProfile,
    library: &FrameworkLibrary,
    cache: &JobCache,
    weights: &MatchWeights,
) -> Vec<RankedJob> {
    let mut ranked = rank_all(candidate, library, cache, weights);
    ranked.sort_by(by_score_desc);
    ranked
}

/// Like [`find_matching_jobs`] but keeps only stretch-or-better tiers.
pub fn find_realistic_matches(
    candidate: &CandidateProfile,
    library: &FrameworkLibrary,
    cache: &JobCache,
    weights: &MatchWeights,
) -> Vec<RankedJob> {
    let mut ranked: Vec<RankedJob> = rank_all(candidate, library, cache, weights)
        .into_iter()
        .filter(|entry| entry.result.tier >= MatchTier::Stretch)
        .collect();
    ranked.sort_by(by_score_desc);
    ranked
}

/// The grade whose derived job fits the candidate best within one
/// discipline/track. On equal scores the lower grade wins, so the estimate
/// never overshoots.
pub fn estimate_best_fit_grade(
    candidate: &CandidateProfile,
    discipline: &DisciplineId,
    track: Option<&TrackId>,
    library: &FrameworkLibrary,
    cache: &JobCache,
    weights: &MatchWeights,
) -> Option<RankedJob> {
    let mut best: Option<RankedJob> = None;

    for grade in library.grades_by_rank() {
        let key = JobKey::new(discipline, &grade.id, track);
        let Some(job) = cache.get_or_derive(library, &key) else {
            continue;
        };
        let result = calculate_job_match(candidate, &job, weights);
        let better = best
            .as_ref()
            .map(|current| result.score > current.result.score)
            .unwrap_or(true);
        if better {
            best = Some(RankedJob {
                job,
                result,
                grade_rank: grade.rank,
            });
        }
    }

    best
}

/// The nearest achievable job above the current grade: lowest rank first,
/// then best score, and only stretch-or-better matches qualify.
pub fn find_next_step_job(
    candidate: &CandidateProfile,
    current: &Job,
    library: &FrameworkLibrary,
    cache: &JobCache,
    weights: &MatchWeights,
) -> Option<RankedJob> {
    let current_rank = library.grade(&current.grade)?.rank;

    let mut candidates: Vec<RankedJob> = rank_all(candidate, library, cache, weights)
        .into_iter()
        .filter(|entry| entry.grade_rank > current_rank)
        .filter(|entry| entry.result.tier >= MatchTier::Stretch)
        .collect();

    candidates.sort_by(|a, b| {
        a.grade_rank
            .cmp(&b.grade_rank)
            .then_with(|| by_score_desc(a, b))
    });
    candidates.into_iter().next()
}

/// Rank the gaps between a current and a target job into an ordered,
/// capped remediation list. Priority is the match weight times the gap
/// size, so a wide gap on a primary skill outranks a narrow one on a broad
/// skill.
pub fn derive_development_path(
    current: &Job,
    target: &Job,
    weights: &MatchWeights,
    limit: usize,
) -> Vec<DevelopmentStep> {
    let mut steps = Vec::new();

    for entry in &target.skill_matrix {
        let from = current.skill_entry(&entry.skill_id).map(|e| e.level);
        let gap = match from {
            Some(level) => entry.level.rank() as i32 - level.rank() as i32,
            None => entry.level.rank() as i32 + 1,
        };
        if gap <= 0 {
            continue;
        }
        let weight = weights.type_weight(entry.skill_type) * weights.capability_boost(&entry.capability);
        steps.push(DevelopmentStep {
            name: entry.name.clone(),
            target: DevelopmentTarget::Skill {
                id: entry.skill_id.clone(),
                from,
                to: entry.level,
            },
            priority: weight * gap as f32,
        });
    }

    for entry in &target.behaviour_profile {
        let from = current.behaviour_entry(&entry.behaviour_id).map(|e| e.maturity);
        let gap = match from {
            Some(maturity) => entry.maturity.rank() as i32 - maturity.rank() as i32,
            None => entry.maturity.rank() as i32 + 1,
        };
        if gap <= 0 {
            continue;
        }
        steps.push(DevelopmentStep {
            name: entry.name.clone(),
            target: DevelopmentTarget::Behaviour {
                id: entry.behaviour_id.clone(),
                from,
                to: entry.maturity,
            },
            priority: weights.behaviour_weight * gap as f32,
        });
    }

    steps.sort_by(|a, b| {
        b.priority
            .partial_cmp(&a.priority)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    steps.truncate(limit);
    steps
}
