use serde::{Deserialize, Serialize};

use crate::catalog::{BehaviourId, CapabilityId, SkillId};
use crate::levels::{MaturityLevel, SkillLevel};

/// Where a bank question aims and the level it probes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionTarget {
    Skill { id: SkillId, level: SkillLevel },
    Behaviour { id: BehaviourId, maturity: MaturityLevel },
    Capability { id: CapabilityId, level: SkillLevel },
}

/// Level-free target identity, used for one-question-per-target coverage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetId {
    Skill(SkillId),
    Behaviour(BehaviourId),
    Capability(CapabilityId),
}

impl QuestionTarget {
    pub fn id(&self) -> TargetId {
        match self {
            QuestionTarget::Skill { id, .. } => TargetId::Skill(id.clone()),
            QuestionTarget::Behaviour { id, .. } => TargetId::Behaviour(id.clone()),
            QuestionTarget::Capability { id, .. } => TargetId::Capability(id.clone()),
        }
    }
}

/// One reusable interview question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub target: QuestionTarget,
    /// Expected minutes. Questions without one fall back to the configured
    /// default for their target kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
}

/// The full question bank, keyed by target × level through the lookup
/// helpers. Missing entries degrade to empty iterators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn skill_questions<'a>(
        &'a self,
        skill: &SkillId,
        level: SkillLevel,
    ) -> impl Iterator<Item = &'a Question> + 'a {
        let skill = skill.clone();
        self.questions.iter().filter(move |question| {
            matches!(
                &question.target,
                QuestionTarget::Skill { id, level: l } if *id == skill && *l == level
            )
        })
    }

    pub fn behaviour_questions<'a>(
        &'a self,
        behaviour: &BehaviourId,
        maturity: MaturityLevel,
    ) -> impl Iterator<Item = &'a Question> + 'a {
        let behaviour = behaviour.clone();
        self.questions.iter().filter(move |question| {
            matches!(
                &question.target,
                QuestionTarget::Behaviour { id, maturity: m } if *id == behaviour && *m == maturity
            )
        })
    }

    pub fn capability_questions<'a>(
        &'a self,
        capability: &CapabilityId,
        level: SkillLevel,
    ) -> impl Iterator<Item = &'a Question> + 'a {
        let capability = capability.clone();
        self.questions.iter().filter(move |question| {
            matches!(
                &question.target,
                QuestionTarget::Capability { id, level: l } if *id == capability && *l == level
            )
        })
    }
}
