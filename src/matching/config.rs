use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::CapabilityId;
use crate::derivation::SkillType;

/// Weighting profile for candidate-to-job scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub primary_weight: f32,
    pub secondary_weight: f32,
    pub broad_weight: f32,
    pub track_weight: f32,
    /// Uniform weight per behaviour entry.
    pub behaviour_weight: f32,
    /// Multipliers applied on top of the type weight for specific
    /// capabilities. Absent capabilities multiply by 1.
    #[serde(default)]
    pub capability_boosts: BTreeMap<CapabilityId, f32>,
    /// Share of the composite score carried by skills; behaviours carry the
    /// rest.
    pub skill_share: f32,
}

impl MatchWeights {
    pub fn type_weight(&self, skill_type: SkillType) -> f32 {
        match skill_type {
            SkillType::Primary => self.primary_weight,
            SkillType::Secondary => self.secondary_weight,
            SkillType::Broad => self.broad_weight,
            SkillType::Track => self.track_weight,
        }
    }

    pub fn capability_boost(&self, capability: &CapabilityId) -> f32 {
        self.capability_boosts.get(capability).copied().unwrap_or(1.0)
    }

    pub fn behaviour_share(&self) -> f32 {
        1.0 - self.skill_share
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            primary_weight: 3.0,
            secondary_weight: 2.0,
            broad_weight: 1.0,
            track_weight: 1.5,
            behaviour_weight: 1.0,
            capability_boosts: BTreeMap::new(),
            skill_share: 0.7,
        }
    }
}
