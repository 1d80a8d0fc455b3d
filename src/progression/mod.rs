//! Structural diff between two derived jobs: which skills and behaviours a
//! move gains, loses, or shifts, with deterministic ordering for list output.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{BehaviourId, SkillId};
use crate::derivation::{BehaviourProfileEntry, Job, SkillMatrixEntry, SkillType};
use crate::levels::{MaturityLevel, SkillLevel};

/// How a single skill differs between the two jobs. `Changed` with equal
/// endpoints means unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkillShift {
    Gained { level: SkillLevel },
    Lost { level: SkillLevel },
    Changed { from: SkillLevel, to: SkillLevel },
}

impl SkillShift {
    /// Rank delta for entries present on both sides; zero when unchanged.
    pub fn delta(&self) -> Option<i32> {
        match self {
            SkillShift::Changed { from, to } => Some(to.rank() as i32 - from.rank() as i32),
            _ => None,
        }
    }

    /// Sort magnitude. Gained and lost entries weigh their full level rank
    /// plus one, so they always outrank a same-sized level shift.
    pub fn magnitude(&self) -> u32 {
        match self {
            SkillShift::Gained { level } | SkillShift::Lost { level } => level.rank() as u32 + 1,
            SkillShift::Changed { from, to } => {
                (to.rank() as i32 - from.rank() as i32).unsigned_abs()
            }
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, SkillShift::Changed { from, to } if from == to)
    }
}

/// How a single behaviour differs between the two jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MaturityShift {
    Gained { maturity: MaturityLevel },
    Lost { maturity: MaturityLevel },
    Changed { from: MaturityLevel, to: MaturityLevel },
}

impl MaturityShift {
    pub fn delta(&self) -> Option<i32> {
        match self {
            MaturityShift::Changed { from, to } => Some(to.rank() as i32 - from.rank() as i32),
            _ => None,
        }
    }

    pub fn magnitude(&self) -> u32 {
        match self {
            MaturityShift::Gained { maturity } | MaturityShift::Lost { maturity } => {
                maturity.rank() as u32 + 1
            }
            MaturityShift::Changed { from, to } => {
                (to.rank() as i32 - from.rank() as i32).unsigned_abs()
            }
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, MaturityShift::Changed { from, to } if from == to)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillChange {
    pub skill_id: SkillId,
    pub name: String,
    /// Type taken from the target side when present, else from the current.
    pub skill_type: SkillType,
    pub shift: SkillShift,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviourChange {
    pub behaviour_id: BehaviourId,
    pub name: String,
    pub shift: MaturityShift,
}

/// Aggregate counts over one change list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeTotals {
    pub gained: usize,
    pub lost: usize,
    pub changed: usize,
    pub unchanged: usize,
}

/// The full from/to comparison between two derived jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionAnalysis {
    pub from_title: String,
    pub to_title: String,
    pub skill_changes: Vec<SkillChange>,
    pub behaviour_changes: Vec<BehaviourChange>,
    pub skill_totals: ChangeTotals,
    pub behaviour_totals: ChangeTotals,
}

/// Diff the skill matrices. Ordering is magnitude descending, then type
/// ascending, then name ascending, and must stay stable for list output.
pub fn calculate_skill_changes(
    current: &[SkillMatrixEntry],
    target: &[SkillMatrixEntry],
) -> Vec<SkillChange> {
    let mut remaining: BTreeMap<&SkillId, &SkillMatrixEntry> =
        current.iter().map(|entry| (&entry.skill_id, entry)).collect();
    let mut changes = Vec::new();

    for entry in target {
        match remaining.remove(&entry.skill_id) {
            Some(existing) => changes.push(SkillChange {
                skill_id: entry.skill_id.clone(),
                name: entry.name.clone(),
                skill_type: entry.skill_type,
                shift: SkillShift::Changed {
                    from: existing.level,
                    to: entry.level,
                },
            }),
            None => changes.push(SkillChange {
                skill_id: entry.skill_id.clone(),
                name: entry.name.clone(),
                skill_type: entry.skill_type,
                shift: SkillShift::Gained { level: entry.level },
            }),
        }
    }

    for entry in remaining.into_values() {
        changes.push(SkillChange {
            skill_id: entry.skill_id.clone(),
            name: entry.name.clone(),
            skill_type: entry.skill_type,
            shift: SkillShift::Lost { level: entry.level },
        });
    }

    changes.sort_by(|a, b| {
        b.shift
            .magnitude()
            .cmp(&a.shift.magnitude())
            .then_with(|| a.skill_type.cmp(&b.skill_type))
            .then_with(|| a.name.cmp(&b.name))
    });
    changes
}

/// Diff the behaviour profiles; same ordering minus the type tie-break.
pub fn calculate_behaviour_changes(
    current: &[BehaviourProfileEntry],
    target: &[BehaviourProfileEntry],
) -> Vec<BehaviourChange> {
    let mut remaining: BTreeMap<&BehaviourId, &BehaviourProfileEntry> = current
        .iter()
        .map(|entry| (&entry.behaviour_id, entry))
        .collect();
    let mut changes = Vec::new();

    for entry in target {
        match remaining.remove(&entry.behaviour_id) {
            Some(existing) => changes.push(BehaviourChange {
                behaviour_id: entry.behaviour_id.clone(),
                name: entry.name.clone(),
                shift: MaturityShift::Changed {
                    from: existing.maturity,
                    to: entry.maturity,
                },
            }),
            None => changes.push(BehaviourChange {
                behaviour_id: entry.behaviour_id.clone(),
                name: entry.name.clone(),
                shift: MaturityShift::Gained {
                    maturity: entry.maturity,
                },
            }),
        }
    }

    for entry in remaining.into_values() {
        changes.push(BehaviourChange {
            behaviour_id: entry.behaviour_id.clone(),
            name: entry.name.clone(),
            shift: MaturityShift::Lost {
                maturity: entry.maturity,
            },
        });
    }

    changes.sort_by(|a, b| {
        b.shift
            .magnitude()
            .cmp(&a.shift.magnitude())
            .then_with(|| a.name.cmp(&b.name))
    });
    changes
}

/// Compare two derived jobs end to end.
pub fn analyze_progression(from: &Job, to: &Job) -> ProgressionAnalysis {
    let skill_changes = calculate_skill_changes(&from.skill_matrix, &to.skill_matrix);
    let behaviour_changes =
        calculate_behaviour_changes(&from.behaviour_profile, &to.behaviour_profile);
    let skill_totals = skill_totals(&skill_changes);
    let behaviour_totals = behaviour_totals(&behaviour_changes);

    ProgressionAnalysis {
        from_title: from.title.clone(),
        to_title: to.title.clone(),
        skill_changes,
        behaviour_changes,
        skill_totals,
        behaviour_totals,
    }
}

fn skill_totals(changes: &[SkillChange]) -> ChangeTotals {
    let mut totals = ChangeTotals::default();
    for change in changes {
        match &change.shift {
            SkillShift::Gained { .. } => totals.gained += 1,
            SkillShift::Lost { .. } => totals.lost += 1,
            shift if shift.is_unchanged() => totals.unchanged += 1,
            _ => totals.changed += 1,
        }
    }
    totals
}

fn behaviour_totals(changes: &[BehaviourChange]) -> ChangeTotals {
    let mut totals = ChangeTotals::default();
    for change in changes {
        match &change.shift {
            MaturityShift::Gained { .. } => totals.gained += 1,
            MaturityShift::Lost { .. } => totals.lost += 1,
            shift if shift.is_unchanged() => totals.unchanged += 1,
            _ => totals.changed += 1,
        }
    }
    totals
}
