//! Framework reference data: skills, behaviours, disciplines, tracks, and
//! grades, plus the indexed library the engine resolves them through.

mod domain;
mod library;

pub use domain::{
    Behaviour, BehaviourId, CapabilityId, Discipline, DisciplineId, Grade, GradeBaseLevels,
    GradeId, Skill, SkillId, Track, TrackId,
};
pub use library::FrameworkLibrary;
