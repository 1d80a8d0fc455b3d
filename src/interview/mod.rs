//! Interview assembly: a two-pass greedy allocator that guarantees breadth
//! (one question per target while time allows) before spending the rest of
//! the budget on depth. A bin-packing approximation, kept greedy so the
//! output stays predictable and explainable to interviewers.

mod bank;
mod config;

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{BehaviourId, CapabilityId, SkillId};
use crate::derivation::Job;
use crate::levels::SkillLevel;
use crate::matching::MatchWeights;

pub use bank::{Question, QuestionBank, QuestionTarget, TargetId};
pub use config::InterviewPlanConfig;

/// A question chosen for a guide, with the priority that earned its slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAssignment {
    pub question_id: String,
    pub prompt: String,
    pub target: QuestionTarget,
    pub duration_minutes: u32,
    pub priority: f32,
}

/// Which target ids received at least one question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSets {
    pub skills: BTreeSet<SkillId>,
    pub behaviours: BTreeSet<BehaviourId>,
    pub capabilities: BTreeSet<CapabilityId>,
}

impl CoverageSets {
    fn record(&mut self, target: &QuestionTarget) {
        match target {
            QuestionTarget::Skill { id, .. } => {
                self.skills.insert(id.clone());
            }
            QuestionTarget::Behaviour { id, .. } => {
                self.behaviours.insert(id.clone());
            }
            QuestionTarget::Capability { id, .. } => {
                self.capabilities.insert(id.clone());
            }
        }
    }
}

/// An assembled interview plan for one derived job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewGuide {
    pub job_title: String,
    pub questions: Vec<QuestionAssignment>,
    pub total_minutes: u32,
    pub coverage: CoverageSets,
}

struct CandidateQuestion<'a> {
    question: &'a Question,
    target_id: TargetId,
    priority: f32,
    duration: u32,
}

fn sort_candidates(candidates: &mut [CandidateQuestion<'_>]) {
    candidates.sort_by(|a, b| {
        b.priority
            .partial_cmp(&a.priority)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.question.id.cmp(&b.question.id))
    });
}

/// The two-pass greedy fill. Pass 1 takes at most one question per target
/// while the running time stays within the limit; pass 2 walks the same
/// order again adding depth on already-covered targets.
fn allocate<'a>(
    candidates: &[CandidateQuestion<'a>],
    limit_minutes: u32,
) -> (Vec<usize>, u32) {
    let mut chosen = vec![false; candidates.len()];
    let mut covered: HashSet<&TargetId> = HashSet::new();
    let mut spent = 0u32;

    for (index, candidate) in candidates.iter().enumerate() {
        if covered.contains(&candidate.target_id) {
            continue;
        }
        if spent + candidate.duration <= limit_minutes {
            chosen[index] = true;
            covered.insert(&candidate.target_id);
            spent += candidate.duration;
        }
    }

    for (index, candidate) in candidates.iter().enumerate() {
        if chosen[index] || !covered.contains(&candidate.target_id) {
            continue;
        }
        if spent + candidate.duration <= limit_minutes {
            chosen[index] = true;
            spent += candidate.duration;
        }
    }

    let selected = chosen
        .iter()
        .enumerate()
        .filter_map(|(index, taken)| taken.then_some(index))
        .collect();
    (selected, spent)
}

fn collect_skill_candidates<'a>(
    job: &'a Job,
    bank: &'a QuestionBank,
    weights: &MatchWeights,
    config: &InterviewPlanConfig,
) -> Vec<CandidateQuestion<'a>> {
    let mut candidates = Vec::new();

    for entry in &job.skill_matrix {
        let base = weights.type_weight(entry.skill_type)
            + (weights.capability_boost(&entry.capability) - 1.0);

        for question in bank.skill_questions(&entry.skill_id, entry.level) {
            candidates.push(CandidateQuestion {
                question,
                target_id: question.target.id(),
                priority: base + entry.level.rank() as f32,
                duration: question
                    .duration_minutes
                    .unwrap_or(config.default_question_minutes),
            });
        }

        if config.include_below_level {
            if let Some(below) = entry
                .level
                .rank()
                .checked_sub(1)
                .and_then(SkillLevel::from_rank)
            {
                for question in bank.skill_questions(&entry.skill_id, below) {
                    candidates.push(CandidateQuestion {
                        question,
                        target_id: question.target.id(),
                        priority: base + below.rank() as f32 - config.below_level_penalty,
                        duration: question
                            .duration_minutes
                            .unwrap_or(config.default_question_minutes),
                    });
                }
            }
        }
    }

    sort_candidates(&mut candidates);
    candidates
}

fn collect_behaviour_candidates<'a>(
    job: &'a Job,
    bank: &'a QuestionBank,
    weights: &MatchWeights,
    config: &InterviewPlanConfig,
) -> Vec<CandidateQuestion<'a>> {
    let mut candidates = Vec::new();

    for entry in &job.behaviour_profile {
        for question in bank.behaviour_questions(&entry.behaviour_id, entry.maturity) {
            candidates.push(CandidateQuestion {
                question,
                target_id: question.target.id(),
                priority: weights.behaviour_weight + entry.maturity.rank() as f32,
                duration: question
                    .duration_minutes
                    .unwrap_or(config.default_question_minutes),
            });
        }
    }

    sort_candidates(&mut candidates);
    candidates
}

fn collect_capability_candidates<'a>(
    job: &'a Job,
    bank: &'a QuestionBank,
    weights: &MatchWeights,
    config: &InterviewPlanConfig,
) -> Vec<CandidateQuestion<'a>> {
    let mut candidates = Vec::new();

    for (capability, level) in job.max_capability_levels() {
        for question in bank.capability_questions(&capability, level) {
            candidates.push(CandidateQuestion {
                question,
                target_id: question.target.id(),
                priority: weights.capability_boost(&capability) + level.rank() as f32,
                duration: question
                    .duration_minutes
                    .unwrap_or(config.default_capability_minutes),
            });
        }
    }

    sort_candidates(&mut candidates);
    candidates
}

fn assemble(job: &Job, batches: Vec<(Vec<CandidateQuestion<'_>>, Vec<usize>)>) -> InterviewGuide {
    let mut questions = Vec::new();
    let mut coverage = CoverageSets::default();
    let mut total_minutes = 0u32;

    for (candidates, selected) in batches {
        for index in selected {
            let candidate = &candidates[index];
            coverage.record(&candidate.question.target);
            total_minutes += candidate.duration;
            questions.push(QuestionAssignment {
                question_id: candidate.question.id.clone(),
                prompt: candidate.question.prompt.clone(),
                target: candidate.question.target.clone(),
                duration_minutes: candidate.duration,
                priority: candidate.priority,
            });
        }
    }

    // Presentation order: highest priority first across both categories.
    questions.sort_by(|a, b| {
        b.priority
            .partial_cmp(&a.priority)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.question_id.cmp(&b.question_id))
    });

    InterviewGuide {
        job_title: job.title.clone(),
        questions,
        total_minutes,
        coverage,
    }
}

/// The standard guide: skills and behaviours sharing the budget by the
/// configured ratio. The behaviour pass is additionally capped by whatever
/// the skill pass left of the overall budget, so the guide as a whole never
/// exceeds target + tolerance.
pub fn derive_interview_questions(
    job: &Job,
    bank: &QuestionBank,
    weights: &MatchWeights,
    config: &InterviewPlanConfig,
) -> InterviewGuide {
    let overall_limit = config.target_minutes + config.tolerance_minutes;

    let skill_candidates = collect_skill_candidates(job, bank, weights, config);
    let skill_limit = config.skill_budget() + config.tolerance_minutes;
    let (skill_selected, skill_spent) = allocate(&skill_candidates, skill_limit);

    let behaviour_candidates = collect_behaviour_candidates(job, bank, weights, config);
    let behaviour_limit = (config.behaviour_budget() + config.tolerance_minutes)
        .min(overall_limit.saturating_sub(skill_spent));
    let (behaviour_selected, _) = allocate(&behaviour_candidates, behaviour_limit);

    assemble(
        job,
        vec![
            (skill_candidates, skill_selected),
            (behaviour_candidates, behaviour_selected),
        ],
    )
}

/// Mission-fit variant: skill questions only, with the whole budget.
pub fn derive_mission_fit_interview(
    job: &Job,
    bank: &QuestionBank,
    weights: &MatchWeights,
    config: &InterviewPlanConfig,
) -> InterviewGuide {
    let candidates = collect_skill_candidates(job, bank, weights, config);
    let limit = config.target_minutes + config.tolerance_minutes;
    let (selected, _) = allocate(&candidates, limit);
    assemble(job, vec![(candidates, selected)])
}

/// Stakeholder variant: the same mixed allocation with the time ratio
/// flipped towards behaviours.
pub fn derive_stakeholder_interview(
    job: &Job,
    bank: &QuestionBank,
    weights: &MatchWeights,
    config: &InterviewPlanConfig,
) -> InterviewGuide {
    let flipped = InterviewPlanConfig {
        skill_time_share: config.behaviour_time_share(),
        ..config.clone()
    };
    derive_interview_questions(job, bank, weights, &flipped)
}

/// Decomposition variant: capability-level questions at the highest skill
/// level the matrix shows per capability, with the whole budget.
pub fn derive_decomposition_interview(
    job: &Job,
    bank: &QuestionBank,
    weights: &MatchWeights,
    config: &InterviewPlanConfig,
) -> InterviewGuide {
    let candidates = collect_capability_candidates(job, bank, weights, config);
    let limit = config.target_minutes + config.tolerance_minutes;
    let (selected, _) = allocate(&candidates, limit);
    assemble(job, vec![(candidates, selected)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BehaviourId, CapabilityId, DisciplineId, GradeId, SkillId};
    use crate::derivation::{BehaviourProfileEntry, SkillMatrixEntry, SkillType};
    use crate::levels::MaturityLevel;

    fn matrix_entry(id: &str, capability: &str, skill_type: SkillType, level: SkillLevel) -> SkillMatrixEntry {
        SkillMatrixEntry {
            skill_id: SkillId::from(id),
            name: id.to_string(),
            capability: CapabilityId::from(capability),
            skill_type,
            level,
            description: None,
        }
    }

    fn job() -> Job {
        Job {
            title: "Senior Backend Engineer".to_string(),
            discipline: DisciplineId::from("backend"),
            grade: GradeId::from("senior"),
            track: None,
            skill_matrix: vec![
                matrix_entry("api-design", "delivery", SkillType::Primary, SkillLevel::Proficient),
                matrix_entry(
                    "distributed-systems",
                    "scale",
                    SkillType::Primary,
                    SkillLevel::Proficient,
                ),
                matrix_entry("code-review", "delivery", SkillType::Broad, SkillLevel::Working),
            ],
            behaviour_profile: vec![
                BehaviourProfileEntry {
                    behaviour_id: BehaviourId::from("ownership"),
                    name: "ownership".to_string(),
                    maturity: MaturityLevel::Influencing,
                    description: None,
                },
                BehaviourProfileEntry {
                    behaviour_id: BehaviourId::from("collaboration"),
                    name: "collaboration".to_string(),
                    maturity: MaturityLevel::Practicing,
                    description: None,
                },
            ],
            responsibilities: Vec::new(),
        }
    }

    fn skill_question(id: &str, skill: &str, level: SkillLevel, minutes: Option<u32>) -> Question {
        Question {
            id: id.to_string(),
            prompt: format!("Tell me about {skill}"),
            target: QuestionTarget::Skill {
                id: SkillId::from(skill),
                level,
            },
            duration_minutes: minutes,
        }
    }

    fn behaviour_question(id: &str, behaviour: &str, maturity: MaturityLevel) -> Question {
        Question {
            id: id.to_string(),
            prompt: format!("Describe a time you showed {behaviour}"),
            target: QuestionTarget::Behaviour {
                id: BehaviourId::from(behaviour),
                maturity,
            },
            duration_minutes: Some(5),
        }
    }

    fn capability_question(id: &str, capability: &str, level: SkillLevel) -> Question {
        Question {
            id: id.to_string(),
            prompt: format!("Decompose a {capability} problem"),
            target: QuestionTarget::Capability {
                id: CapabilityId::from(capability),
                level,
            },
            duration_minutes: None,
        }
    }

    fn abundant_bank() -> QuestionBank {
        let mut questions = Vec::new();
        for (skill, level) in [
            ("api-design", SkillLevel::Proficient),
            ("distributed-systems", SkillLevel::Proficient),
            ("code-review", SkillLevel::Working),
        ] {
            for index in 0..6 {
                questions.push(skill_question(
                    &format!("{skill}-{index}"),
                    skill,
                    level,
                    Some(5),
                ));
            }
        }
        for (behaviour, maturity) in [
            ("ownership", MaturityLevel::Influencing),
            ("collaboration", MaturityLevel::Practicing),
        ] {
            for index in 0..6 {
                questions.push(behaviour_question(
                    &format!("{behaviour}-{index}"),
                    behaviour,
                    maturity,
                ));
            }
        }
        QuestionBank::new(questions)
    }

    #[test]
    fn guide_stays_within_budget_plus_tolerance() {
        let job = job();
        let bank = abundant_bank();
        let config = InterviewPlanConfig::default();

        let guide =
            derive_interview_questions(&job, &bank, &MatchWeights::default(), &config);

        assert!(guide.total_minutes <= config.target_minutes + config.tolerance_minutes);
        assert!(guide.total_minutes > 0);
        assert_eq!(
            guide.total_minutes,
            guide.questions.iter().map(|q| q.duration_minutes).sum::<u32>()
        );
    }

    #[test]
    fn every_bankable_target_is_covered_before_depth() {
        let job = job();
        let bank = abundant_bank();

        let guide = derive_interview_questions(
            &job,
            &bank,
            &MatchWeights::default(),
            &InterviewPlanConfig::default(),
        );

        for entry in &job.skill_matrix {
            assert!(
                guide.coverage.skills.contains(&entry.skill_id),
                "{} should be covered",
                entry.skill_id
            );
        }
        for entry in &job.behaviour_profile {
            assert!(guide.coverage.behaviours.contains(&entry.behaviour_id));
        }
    }

    #[test]
    fn presentation_order_is_priority_descending() {
        let job = job();
        let bank = abundant_bank();

        let guide = derive_interview_questions(
            &job,
            &bank,
            &MatchWeights::default(),
            &InterviewPlanConfig::default(),
        );

        for pair in guide.questions.windows(2) {
            assert!(pair[0].priority >= pair[1].priority);
        }
    }

    #[test]
    fn below_level_questions_rank_under_target_level_ones() {
        let job = job();
        let mut bank = abundant_bank();
        bank.questions.push(skill_question(
            "api-design-warmup",
            "api-design",
            SkillLevel::Practitioner,
            Some(5),
        ));

        let guide = derive_interview_questions(
            &job,
            &bank,
            &MatchWeights::default(),
            &InterviewPlanConfig::default(),
        );

        let warmup = guide
            .questions
            .iter()
            .find(|q| q.question_id == "api-design-warmup");
        if let Some(warmup) = warmup {
            let target = guide
                .questions
                .iter()
                .find(|q| q.question_id == "api-design-0")
                .expect("target-level question selected");
            assert!(warmup.priority < target.priority);
        }
    }

    #[test]
    fn missing_durations_use_the_configured_default() {
        let job = job();
        let bank = QuestionBank::new(vec![skill_question(
            "api-design-open",
            "api-design",
            SkillLevel::Proficient,
            None,
        )]);
        let config = InterviewPlanConfig::default();

        let guide =
            derive_interview_questions(&job, &bank, &MatchWeights::default(), &config);

        assert_eq!(guide.questions.len(), 1);
        assert_eq!(
            guide.questions[0].duration_minutes,
            config.default_question_minutes
        );
    }

    #[test]
    fn empty_bank_degrades_to_an_empty_guide() {
        let job = job();
        let guide = derive_interview_questions(
            &job,
            &QuestionBank::default(),
            &MatchWeights::default(),
            &InterviewPlanConfig::default(),
        );

        assert!(guide.questions.is_empty());
        assert_eq!(guide.total_minutes, 0);
        assert!(guide.coverage.skills.is_empty());
    }

    #[test]
    fn mission_fit_selects_skills_only() {
        let job = job();
        let bank = abundant_bank();

        let guide = derive_mission_fit_interview(
            &job,
            &bank,
            &MatchWeights::default(),
            &InterviewPlanConfig::default(),
        );

        assert!(!guide.questions.is_empty());
        assert!(guide
            .questions
            .iter()
            .all(|q| matches!(q.target, QuestionTarget::Skill { .. })));
        assert!(guide.coverage.behaviours.is_empty());
    }

    #[test]
    fn stakeholder_variant_tilts_time_towards_behaviours() {
        let job = job();
        let bank = abundant_bank();
        let config = InterviewPlanConfig::default();

        let guide =
            derive_stakeholder_interview(&job, &bank, &MatchWeights::default(), &config);

        let behaviour_minutes: u32 = guide
            .questions
            .iter()
            .filter(|q| matches!(q.target, QuestionTarget::Behaviour { .. }))
            .map(|q| q.duration_minutes)
            .sum();
        let skill_minutes: u32 = guide
            .questions
            .iter()
            .filter(|q| matches!(q.target, QuestionTarget::Skill { .. }))
            .map(|q| q.duration_minutes)
            .sum();

        assert!(behaviour_minutes >= skill_minutes);
        assert!(guide.total_minutes <= config.target_minutes + config.tolerance_minutes);
    }

    #[test]
    fn decomposition_targets_the_max_level_per_capability() {
        let job = job();
        let bank = QuestionBank::new(vec![
            capability_question("delivery-deep", "delivery", SkillLevel::Proficient),
            // Below the capability's max level; must not be picked up.
            capability_question("delivery-shallow", "delivery", SkillLevel::Working),
            capability_question("scale-deep", "scale", SkillLevel::Proficient),
        ]);
        let config = InterviewPlanConfig::default();

        let guide =
            derive_decomposition_interview(&job, &bank, &MatchWeights::default(), &config);

        let ids: Vec<&str> = guide
            .questions
            .iter()
            .map(|q| q.question_id.as_str())
            .collect();
        assert!(ids.contains(&"delivery-deep"));
        assert!(ids.contains(&"scale-deep"));
        assert!(!ids.contains(&"delivery-shallow"));
        assert!(guide
            .questions
            .iter()
            .all(|q| q.duration_minutes == config.default_capability_minutes));
        assert_eq!(guide.coverage.capabilities.len(), 2);
    }

    #[test]
    fn guides_are_deterministic() {
        let job = job();
        let bank = abundant_bank();

        let first = derive_interview_questions(
            &job,
            &bank,
            &MatchWeights::default(),
            &InterviewPlanConfig::default(),
        );
        let second = derive_interview_questions(
            &job,
            &bank,
            &MatchWeights::default(),
            &InterviewPlanConfig::default(),
        );

        assert_eq!(first, second);
    }
}
