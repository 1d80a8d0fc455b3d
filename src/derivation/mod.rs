//! Level-arithmetic derivation of concrete jobs from discipline, grade, and
//! optional track, plus the memoizing job cache.

mod cache;
mod job;
mod rules;

pub use cache::{JobCache, JobKey};
pub use job::{BehaviourProfileEntry, Job, SkillMatrixEntry, SkillType};
pub use rules::{
    derive_behaviour_maturity, derive_behaviour_profile, derive_job, derive_skill_level,
    derive_skill_matrix,
};
