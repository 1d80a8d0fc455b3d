use serde::{Deserialize, Serialize};

use super::domain::{
    Behaviour, BehaviourId, CapabilityId, Discipline, DisciplineId, Grade, GradeId, Skill,
    SkillId, Track, TrackId,
};

/// Read-only view over the parsed framework reference data.
///
/// Loading and referential-integrity validation happen outside the engine;
/// the library only resolves lookups. Collections stay in their loaded order
/// so every enumeration downstream is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameworkLibrary {
    skills: Vec<Skill>,
    behaviours: Vec<Behaviour>,
    disciplines: Vec<Discipline>,
    tracks: Vec<Track>,
    grades: Vec<Grade>,
}

impl FrameworkLibrary {
    pub fn new(
        skills: Vec<Skill>,
        behaviours: Vec<Behaviour>,
        disciplines: Vec<Discipline>,
        tracks: Vec<Track>,
        grades: Vec<Grade>,
    ) -> Self {
        Self {
            skills,
            behaviours,
            disciplines,
            tracks,
            grades,
        }
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn behaviours(&self) -> &[Behaviour] {
        &self.behaviours
    }

    pub fn disciplines(&self) -> &[Discipline] {
        &self.disciplines
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    pub fn skill(&self, id: &SkillId) -> Option<&Skill> {
        self.skills.iter().find(|skill| skill.id == *id)
    }

    pub fn behaviour(&self, id: &BehaviourId) -> Option<&Behaviour> {
        self.behaviours.iter().find(|behaviour| behaviour.id == *id)
    }

    pub fn discipline(&self, id: &DisciplineId) -> Option<&Discipline> {
        self.disciplines.iter().find(|discipline| discipline.id == *id)
    }

    pub fn track(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.iter().find(|track| track.id == *id)
    }

    pub fn grade(&self, id: &GradeId) -> Option<&Grade> {
        self.grades.iter().find(|grade| grade.id == *id)
    }

    /// Grades sorted by ordinal rank, id as a stable tie-break.
    pub fn grades_by_rank(&self) -> Vec<&Grade> {
        let mut grades: Vec<&Grade> = self.grades.iter().collect();
        grades.sort_by(|a, b| a.rank.cmp(&b.rank).then_with(|| a.id.cmp(&b.id)));
        grades
    }

    pub fn skills_in_capability<'a>(
        &'a self,
        capability: &'a CapabilityId,
    ) -> impl Iterator<Item = &'a Skill> {
        self.skills
            .iter()
            .filter(move |skill| skill.capability == *capability)
    }

    /// A copy of the library without human-only skills, for agent-oriented
    /// derivations. Discipline skill lists are left untouched; derivation
    /// skips ids the catalogue no longer resolves.
    pub fn agent_view(&self) -> Self {
        Self {
            skills: self
                .skills
                .iter()
                .filter(|skill| !skill.human_only)
                .cloned()
                .collect(),
            behaviours: self.behaviours.clone(),
            disciplines: self.disciplines.clone(),
            tracks: self.tracks.clone(),
            grades: self.grades.clone(),
        }
    }
}
