use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::{DisciplineId, FrameworkLibrary, GradeId, TrackId};
use crate::derivation::{self, Job, JobCache, JobKey};
use crate::interview::{
    derive_decomposition_interview, derive_interview_questions, derive_mission_fit_interview,
    derive_stakeholder_interview, InterviewGuide, InterviewPlanConfig, QuestionBank,
};
use crate::matching::{
    calculate_job_match, derive_development_path, estimate_best_fit_grade, find_matching_jobs,
    find_next_step_job, find_realistic_matches, CandidateProfile, DevelopmentStep, MatchResult,
    MatchWeights, RankedJob, DEFAULT_DEVELOPMENT_STEPS,
};
use crate::progression::{analyze_progression, ProgressionAnalysis};

/// Façade composing the reference library, the job cache, and the scoring
/// configuration. Presentation layers hand in plain data and get plain
/// records back; nothing here performs I/O.
pub struct FrameworkService {
    library: FrameworkLibrary,
    cache: JobCache,
    match_weights: MatchWeights,
    interview_config: InterviewPlanConfig,
}

impl FrameworkService {
    pub fn new(library: FrameworkLibrary) -> Self {
        Self::with_config(
            library,
            MatchWeights::default(),
            InterviewPlanConfig::default(),
        )
    }

    pub fn with_config(
        library: FrameworkLibrary,
        match_weights: MatchWeights,
        interview_config: InterviewPlanConfig,
    ) -> Self {
        info!(
            skills = library.skills().len(),
            behaviours = library.behaviours().len(),
            disciplines = library.disciplines().len(),
            "framework service ready"
        );
        Self {
            library,
            cache: JobCache::new(),
            match_weights,
            interview_config,
        }
    }

    pub fn library(&self) -> &FrameworkLibrary {
        &self.library
    }

    pub fn match_weights(&self) -> &MatchWeights {
        &self.match_weights
    }

    /// Derive a job without touching the cache. `None` when the combination
    /// is invalid or any id does not resolve.
    pub fn derive_job(
        &self,
        discipline: &DisciplineId,
        grade: &GradeId,
        track: Option<&TrackId>,
    ) -> Option<Job> {
        let discipline = self.library.discipline(discipline)?;
        let grade = self.library.grade(grade)?;
        let track = match track {
            Some(id) => Some(self.library.track(id)?),
            None => None,
        };
        derivation::derive_job(discipline, grade, track, &self.library)
    }

    /// Cached derivation keyed by composite identity.
    pub fn get_or_create_job(
        &self,
        discipline: &DisciplineId,
        grade: &GradeId,
        track: Option<&TrackId>,
    ) -> Option<Arc<Job>> {
        let key = JobKey::new(discipline, grade, track);
        self.cache.get_or_derive(&self.library, &key)
    }

    pub fn invalidate_job(&self, key: &JobKey) -> bool {
        debug!(key = %key, "invalidating cached job");
        self.cache.invalidate(key)
    }

    pub fn clear_job_cache(&self) {
        self.cache.clear();
    }

    pub fn job_cache_size(&self) -> usize {
        self.cache.len()
    }

    pub fn calculate_job_match(&self, candidate: &CandidateProfile, job: &Job) -> MatchResult {
        calculate_job_match(candidate, job, &self.match_weights)
    }

    pub fn find_matching_jobs(&self, candidate: &CandidateProfile) -> Vec<RankedJob> {
        find_matching_jobs(candidate, &self.library, &self.cache, &self.match_weights)
    }

    pub fn find_realistic_matches(&self, candidate: &CandidateProfile) -> Vec<RankedJob> {
        find_realistic_matches(candidate, &self.library, &self.cache, &self.match_weights)
    }

    pub fn estimate_best_fit_grade(
        &self,
        candidate: &CandidateProfile,
        discipline: &DisciplineId,
        track: Option<&TrackId>,
    ) -> Option<RankedJob> {
        estimate_best_fit_grade(
            candidate,
            discipline,
            track,
            &self.library,
            &self.cache,
            &self.match_weights,
        )
    }

    pub fn find_next_step_job(
        &self,
        candidate: &CandidateProfile,
        current: &Job,
    ) -> Option<RankedJob> {
        find_next_step_job(
            candidate,
            current,
            &self.library,
            &self.cache,
            &self.match_weights,
        )
    }

    pub fn derive_development_path(&self, current: &Job, target: &Job) -> Vec<DevelopmentStep> {
        derive_development_path(
            current,
            target,
            &self.match_weights,
            DEFAULT_DEVELOPMENT_STEPS,
        )
    }

    pub fn analyze_progression(&self, from: &Job, to: &Job) -> ProgressionAnalysis {
        analyze_progression(from, to)
    }

    pub fn derive_interview_questions(&self, job: &Job, bank: &QuestionBank) -> InterviewGuide {
        derive_interview_questions(job, bank, &self.match_weights, &self.interview_config)
    }

    pub fn derive_mission_fit_interview(&self, job: &Job, bank: &QuestionBank) -> InterviewGuide {
        derive_mission_fit_interview(job, bank, &self.match_weights, &self.interview_config)
    }

    pub fn derive_stakeholder_interview(&self, job: &Job, bank: &QuestionBank) -> InterviewGuide {
        derive_stakeholder_interview(job, bank, &self.match_weights, &self.interview_config)
    }

    pub fn derive_decomposition_interview(&self, job: &Job, bank: &QuestionBank) -> InterviewGuide {
        derive_decomposition_interview(job, bank, &self.match_weights, &self.interview_config)
    }
}
