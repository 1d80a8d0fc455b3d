use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::levels::{MaturityLevel, SkillLevel};

/// Identifier wrapper for skills.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkillId(pub String);

/// Identifier wrapper for behaviours.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BehaviourId(pub String);

/// Identifier wrapper for capability groupings (delivery, scale, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CapabilityId(pub String);

/// Identifier wrapper for disciplines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DisciplineId(pub String);

/// Identifier wrapper for tracks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackId(pub String);

/// Identifier wrapper for grades.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GradeId(pub String);

macro_rules! id_display {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<&str> for $ty {
                fn from(value: &str) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

id_display!(SkillId, BehaviourId, CapabilityId, DisciplineId, TrackId, GradeId);

/// Immutable skill reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub capability: CapabilityId,
    /// What each proficiency level looks like for this skill.
    #[serde(default)]
    pub level_descriptions: BTreeMap<SkillLevel, String>,
    /// Excluded from agent-oriented catalogues when set.
    #[serde(default)]
    pub human_only: bool,
}

/// Immutable behaviour reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Behaviour {
    pub id: BehaviourId,
    pub name: String,
    #[serde(default)]
    pub maturity_descriptions: BTreeMap<MaturityLevel, String>,
}

/// An engineering specialization defining a T-shaped skill profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discipline {
    pub id: DisciplineId,
    pub name: String,
    pub primary_skills: Vec<SkillId>,
    #[serde(default)]
    pub secondary_skills: Vec<SkillId>,
    #[serde(default)]
    pub broad_skills: Vec<SkillId>,
    #[serde(default)]
    pub behaviour_modifiers: BTreeMap<BehaviourId, i32>,
    /// Management variants derive people responsibilities on top of the grade's.
    #[serde(default)]
    pub management: bool,
    /// Tracks valid for this discipline. A `None` entry means the track-less
    /// ("generalist") combination is valid.
    pub valid_tracks: Vec<Option<TrackId>>,
}

impl Discipline {
    /// A combination is valid when the requested track, or its absence, is listed.
    pub fn allows_track(&self, track: Option<&TrackId>) -> bool {
        self.valid_tracks.iter().any(|entry| entry.as_ref() == track)
    }
}

/// A contextual overlay applied on top of a discipline/grade pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    /// Skill-level shift per capability.
    #[serde(default)]
    pub capability_modifiers: BTreeMap<CapabilityId, i32>,
    /// Maturity shift per behaviour.
    #[serde(default)]
    pub behaviour_modifiers: BTreeMap<BehaviourId, i32>,
}

impl Track {
    pub fn capability_modifier(&self, capability: &CapabilityId) -> i32 {
        self.capability_modifiers.get(capability).copied().unwrap_or(0)
    }

    pub fn behaviour_modifier(&self, behaviour: &BehaviourId) -> i32 {
        self.behaviour_modifiers.get(behaviour).copied().unwrap_or(0)
    }
}

/// Baseline proficiency per skill-matrix type at a given grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeBaseLevels {
    pub primary: SkillLevel,
    pub secondary: SkillLevel,
    pub broad: SkillLevel,
}

/// A career level defining baseline skill and behaviour expectations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub id: GradeId,
    pub name: String,
    /// Ordinal position in the progression ladder; defines the total order.
    pub rank: u8,
    pub base_levels: GradeBaseLevels,
    pub base_maturity: MaturityLevel,
    #[serde(default)]
    pub expectations: Vec<String>,
}
