use serde::{Deserialize, Serialize};

/// Tunables for interview assembly. Durations are whole minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewPlanConfig {
    /// Total interview time to fill.
    pub target_minutes: u32,
    /// Share of the budget reserved for skill questions; behaviours take
    /// the rest.
    pub skill_time_share: f32,
    /// Fixed overshoot allowance per guide.
    pub tolerance_minutes: u32,
    /// Fallback duration for skill and behaviour questions.
    pub default_question_minutes: u32,
    /// Fallback duration for capability-decomposition questions.
    pub default_capability_minutes: u32,
    /// Also consider questions one level below the target, at a priority
    /// penalty, so interviewers can warm a topic up.
    pub include_below_level: bool,
    pub below_level_penalty: f32,
}

impl Default for InterviewPlanConfig {
    fn default() -> Self {
        Self {
            target_minutes: 60,
            skill_time_share: 0.6,
            tolerance_minutes: 5,
            default_question_minutes: 5,
            default_capability_minutes: 15,
            include_below_level: true,
            below_level_penalty: 1.5,
        }
    }
}

impl InterviewPlanConfig {
    pub fn behaviour_time_share(&self) -> f32 {
        1.0 - self.skill_time_share
    }

    /// Minutes reserved for skill questions before tolerance.
    pub fn skill_budget(&self) -> u32 {
        (self.target_minutes as f32 * self.skill_time_share).round() as u32
    }

    /// Minutes reserved for behaviour questions before tolerance.
    pub fn behaviour_budget(&self) -> u32 {
        self.target_minutes.saturating_sub(self.skill_budget())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budgets_split_the_target() {
        let config = InterviewPlanConfig::default();
        assert_eq!(config.skill_budget(), 36);
        assert_eq!(config.behaviour_budget(), 24);
        assert_eq!(
            config.skill_budget() + config.behaviour_budget(),
            config.target_minutes
        );
    }
}
