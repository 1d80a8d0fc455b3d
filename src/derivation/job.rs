use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{BehaviourId, CapabilityId, DisciplineId, GradeId, SkillId, TrackId};
use crate::levels::{MaturityLevel, SkillLevel};

/// How a skill entered the matrix. Declaration order doubles as the
/// tie-break order for deterministic list outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    Primary,
    Secondary,
    Broad,
    Track,
}

impl SkillType {
    pub const fn label(self) -> &'static str {
        match self {
            SkillType::Primary => "primary",
            SkillType::Secondary => "secondary",
            SkillType::Broad => "broad",
            SkillType::Track => "track",
        }
    }
}

/// One derived requirement in a job's skill matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatrixEntry {
    pub skill_id: SkillId,
    pub name: String,
    pub capability: CapabilityId,
    pub skill_type: SkillType,
    pub level: SkillLevel,
    /// The catalogue description for the derived level, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One derived expectation in a job's behaviour profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviourProfileEntry {
    pub behaviour_id: BehaviourId,
    pub name: String,
    pub maturity: MaturityLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A concrete job definition derived from exactly one discipline, one grade,
/// and zero-or-one track. Never persisted; always recomputable from the
/// reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub discipline: DisciplineId,
    pub grade: GradeId,
    pub track: Option<TrackId>,
    pub skill_matrix: Vec<SkillMatrixEntry>,
    pub behaviour_profile: Vec<BehaviourProfileEntry>,
    pub responsibilities: Vec<String>,
}

impl Job {
    pub fn skill_entry(&self, id: &SkillId) -> Option<&SkillMatrixEntry> {
        self.skill_matrix.iter().find(|entry| entry.skill_id == *id)
    }

    pub fn behaviour_entry(&self, id: &BehaviourId) -> Option<&BehaviourProfileEntry> {
        self.behaviour_profile
            .iter()
            .find(|entry| entry.behaviour_id == *id)
    }

    /// Highest derived level observed per capability across the matrix.
    /// Drives capability-decomposition interviews.
    pub fn max_capability_levels(&self) -> BTreeMap<CapabilityId, SkillLevel> {
        let mut levels: BTreeMap<CapabilityId, SkillLevel> = BTreeMap::new();
        for entry in &self.skill_matrix {
            levels
                .entry(entry.capability.clone())
                .and_modify(|level| {
                    if entry.level > *level {
                        *level = entry.level;
                    }
                })
                .or_insert(entry.level);
        }
        levels
    }
}
