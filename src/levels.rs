use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical proficiency scale for skills, ordered least to most capable.
///
/// All modifier arithmetic happens in integer rank space; names only appear
/// at the data boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Awareness,
    Working,
    Practitioner,
    Proficient,
    Expert,
}

/// Canonical maturity scale for behaviours, ordered least to most mature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityLevel {
    Emerging,
    Developing,
    Practicing,
    Influencing,
    Leading,
}

/// Raised when reference data carries a level name outside the canonical
/// scales. Every downstream rank computation depends on a valid name, so
/// this is a hard error rather than a silent default.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("unknown skill level '{0}'")]
    UnknownSkillLevel(String),
    #[error("unknown behaviour maturity '{0}'")]
    UnknownMaturity(String),
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 5] = [
        SkillLevel::Awareness,
        SkillLevel::Working,
        SkillLevel::Practitioner,
        SkillLevel::Proficient,
        SkillLevel::Expert,
    ];

    /// Zero-based rank within the canonical ordering.
    pub const fn rank(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            SkillLevel::Awareness => "awareness",
            SkillLevel::Working => "working",
            SkillLevel::Practitioner => "practitioner",
            SkillLevel::Proficient => "proficient",
            SkillLevel::Expert => "expert",
        }
    }

    pub fn from_rank(rank: usize) -> Option<Self> {
        Self::ALL.get(rank).copied()
    }

    pub fn from_label(value: &str) -> Result<Self, LevelError> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.label() == value)
            .ok_or_else(|| LevelError::UnknownSkillLevel(value.to_string()))
    }

    /// Shift by `delta` ranks, clamped into the canonical range.
    pub fn apply_modifier(self, delta: i32) -> Self {
        let shifted = self.rank() as i32 + delta;
        let clamped = shifted.clamp(0, (Self::ALL.len() - 1) as i32);
        Self::ALL[clamped as usize]
    }
}

impl MaturityLevel {
    pub const ALL: [MaturityLevel; 5] = [
        MaturityLevel::Emerging,
        MaturityLevel::Developing,
        MaturityLevel::Practicing,
        MaturityLevel::Influencing,
        MaturityLevel::Leading,
    ];

    /// Zero-based rank within the canonical ordering.
    pub const fn rank(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            MaturityLevel::Emerging => "emerging",
            MaturityLevel::Developing => "developing",
            MaturityLevel::Practicing => "practicing",
            MaturityLevel::Influencing => "influencing",
            MaturityLevel::Leading => "leading",
        }
    }

    pub fn from_rank(rank: usize) -> Option<Self> {
        Self::ALL.get(rank).copied()
    }

    pub fn from_label(value: &str) -> Result<Self, LevelError> {
        Self::ALL
            .iter()
            .copied()
            .find(|level| level.label() == value)
            .ok_or_else(|| LevelError::UnknownMaturity(value.to_string()))
    }

    /// Shift by `delta` ranks, clamped into the canonical range.
    pub fn apply_modifier(self, delta: i32) -> Self {
        let shifted = self.rank() as i32 + delta;
        let clamped = shifted.clamp(0, (Self::ALL.len() - 1) as i32);
        Self::ALL[clamped as usize]
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
