//! Career framework engine.
//!
//! Skills, behaviours, disciplines, tracks, and grades compose into derived
//! job definitions, which drive candidate matching, career-progression
//! analysis, and time-budgeted interview guides. The engine is pure: given
//! the same reference data it always produces the same outputs, and it never
//! performs I/O. Loading (YAML/JSON), rendering, and transport live with the
//! callers.

pub mod catalog;
pub mod derivation;
pub mod interview;
pub mod levels;
pub mod matching;
pub mod progression;
mod service;

pub use catalog::FrameworkLibrary;
pub use derivation::{Job, JobCache, JobKey};
pub use interview::{InterviewGuide, InterviewPlanConfig, QuestionBank};
pub use levels::{LevelError, MaturityLevel, SkillLevel};
pub use matching::{CandidateProfile, MatchResult, MatchTier, MatchWeights};
pub use progression::ProgressionAnalysis;
pub use service::FrameworkService;
