//! Weighted gap scoring of candidate profiles against derived jobs, tier
//! classification, and directional searches across the catalogue.

mod config;
mod search;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{BehaviourId, SkillId};
use crate::derivation::{Job, SkillType};
use crate::levels::{MaturityLevel, SkillLevel};

pub use config::MatchWeights;
pub use search::{
    derive_development_path, estimate_best_fit_grade, find_matching_jobs, find_next_step_job,
    find_realistic_matches, DevelopmentStep, DevelopmentTarget, RankedJob,
    DEFAULT_DEVELOPMENT_STEPS,
};

/// Decayed score per absolute level gap. Gaps past the end of the table use
/// the final entry.
const GAP_SCORES: [f32; 5] = [1.0, 0.7, 0.4, 0.15, 0.05];

/// A candidate's sparse self-assessment. Not required to cover every skill
/// or behaviour a job asks for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    #[serde(default)]
    pub skills: BTreeMap<SkillId, SkillLevel>,
    #[serde(default)]
    pub behaviours: BTreeMap<BehaviourId, MaturityLevel>,
}

impl CandidateProfile {
    /// A profile that exactly meets a derived job. Useful as the starting
    /// point for next-step and progression searches.
    pub fn from_job(job: &Job) -> Self {
        Self {
            skills: job
                .skill_matrix
                .iter()
                .map(|entry| (entry.skill_id.clone(), entry.level))
                .collect(),
            behaviours: job
                .behaviour_profile
                .iter()
                .map(|entry| (entry.behaviour_id.clone(), entry.maturity))
                .collect(),
        }
    }
}

/// Four ordered match-quality buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Aspirational,
    Stretch,
    Good,
    Strong,
}

impl MatchTier {
    pub const STRONG_MIN: f32 = 0.85;
    pub const GOOD_MIN: f32 = 0.70;
    pub const STRETCH_MIN: f32 = 0.55;

    /// Thresholds are inclusive of their own boundary and exclusive of the
    /// tier below.
    pub fn classify(score: f32) -> Self {
        if score >= Self::STRONG_MIN {
            MatchTier::Strong
        } else if score >= Self::GOOD_MIN {
            MatchTier::Good
        } else if score >= Self::STRETCH_MIN {
            MatchTier::Stretch
        } else {
            MatchTier::Aspirational
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MatchTier::Strong => "strong",
            MatchTier::Good => "good",
            MatchTier::Stretch => "stretch",
            MatchTier::Aspirational => "aspirational",
        }
    }
}

/// Per-skill contribution to a match, kept for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGapDetail {
    pub skill_id: SkillId,
    pub name: String,
    pub skill_type: SkillType,
    pub required: SkillLevel,
    pub assessed: Option<SkillLevel>,
    /// Required rank minus assessed rank; a missing assessment reads as one
    /// past the required gap.
    pub gap: i32,
    pub score: f32,
    pub weight: f32,
}

/// Per-behaviour contribution to a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviourGapDetail {
    pub behaviour_id: BehaviourId,
    pub name: String,
    pub required: MaturityLevel,
    pub assessed: Option<MaturityLevel>,
    pub gap: i32,
    pub score: f32,
    pub weight: f32,
}

/// Composite score, tier, and the gap breakdown behind them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: f32,
    pub tier: MatchTier,
    pub skill_score: f32,
    pub behaviour_score: f32,
    pub skill_gaps: Vec<SkillGapDetail>,
    pub behaviour_gaps: Vec<BehaviourGapDetail>,
}

/// Table lookup on the absolute gap. Exceeding a requirement scores the same
/// as falling short by the same amount; the simplification is deliberate.
pub fn calculate_gap_score(gap: i32) -> f32 {
    let index = gap.unsigned_abs() as usize;
    GAP_SCORES[index.min(GAP_SCORES.len() - 1)]
}

const fn worst_gap_score() -> f32 {
    GAP_SCORES[GAP_SCORES.len() - 1]
}

/// Score a candidate against a derived job.
///
/// Skills the candidate never assessed contribute the worst gap score. The
/// skill and behaviour sub-scores combine by the configured share,
/// renormalized over the parts the job actually has, so a job with an empty
/// behaviour profile is judged on skills alone.
pub fn calculate_job_match(
    candidate: &CandidateProfile,
    job: &Job,
    weights: &MatchWeights,
) -> MatchResult {
    let mut skill_gaps = Vec::with_capacity(job.skill_matrix.len());
    let mut skill_weighted = 0.0f32;
    let mut skill_weight_total = 0.0f32;

    for entry in &job.skill_matrix {
        let weight = weights.type_weight(entry.skill_type) * weights.capability_boost(&entry.capability);
        let assessed = candidate.skills.get(&entry.skill_id).copied();
        let (gap, score) = match assessed {
            Some(level) => {
                let gap = entry.level.rank() as i32 - level.rank() as i32;
                (gap, calculate_gap_score(gap))
            }
            None => (entry.level.rank() as i32 + 1, worst_gap_score()),
        };
        skill_weighted += weight * score;
        skill_weight_total += weight;
        skill_gaps.push(SkillGapDetail {
            skill_id: entry.skill_id.clone(),
            name: entry.name.clone(),
            skill_type: entry.skill_type,
            required: entry.level,
            assessed,
            gap,
            score,
            weight,
        });
    }

    let mut behaviour_gaps = Vec::with_capacity(job.behaviour_profile.len());
    let mut behaviour_weighted = 0.0f32;
    let mut behaviour_weight_total = 0.0f32;

    for entry in &job.behaviour_profile {
        let weight = weights.behaviour_weight;
        let assessed = candidate.behaviours.get(&entry.behaviour_id).copied();
        let (gap, score) = match assessed {
            Some(maturity) => {
                let gap = entry.maturity.rank() as i32 - maturity.rank() as i32;
                (gap, calculate_gap_score(gap))
            }
            None => (entry.maturity.rank() as i32 + 1, worst_gap_score()),
        };
        behaviour_weighted += weight * score;
        behaviour_weight_total += weight;
        behaviour_gaps.push(BehaviourGapDetail {
            behaviour_id: entry.behaviour_id.clone(),
            name: entry.name.clone(),
            required: entry.maturity,
            assessed,
            gap,
            score,
            weight,
        });
    }

    let skill_score = if skill_weight_total > 0.0 {
        skill_weighted / skill_weight_total
    } else {
        0.0
    };
    let behaviour_score = if behaviour_weight_total > 0.0 {
        behaviour_weighted / behaviour_weight_total
    } else {
        0.0
    };

    let mut combined = 0.0f32;
    let mut share_total = 0.0f32;
    if !job.skill_matrix.is_empty() {
        combined += weights.skill_share * skill_score;
        share_total += weights.skill_share;
    }
    if !job.behaviour_profile.is_empty() {
        combined += weights.behaviour_share() * behaviour_score;
        share_total += weights.behaviour_share();
    }
    let score = if share_total > 0.0 {
        combined / share_total
    } else {
        0.0
    };

    MatchResult {
        score,
        tier: MatchTier::classify(score),
        skill_score,
        behaviour_score,
        skill_gaps,
        behaviour_gaps,
    }
}
