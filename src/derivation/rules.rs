use std::collections::HashSet;

use crate::catalog::{Discipline, FrameworkLibrary, Grade, Skill, Track};
use crate::levels::{MaturityLevel, SkillLevel};

use super::job::{BehaviourProfileEntry, Job, SkillMatrixEntry, SkillType};

/// Base level plus summed modifiers, clamped into the canonical range.
pub fn derive_skill_level(base: SkillLevel, modifier: i32) -> SkillLevel {
    base.apply_modifier(modifier)
}

/// Base maturity plus summed modifiers, clamped into the canonical range.
pub fn derive_behaviour_maturity(base: MaturityLevel, modifier: i32) -> MaturityLevel {
    base.apply_modifier(modifier)
}

/// Derive the full job definition for a discipline/grade/track combination.
///
/// Fails closed: an invalid combination (track not listed in the
/// discipline's `valid_tracks`) returns `None` rather than erroring, since
/// callers routinely probe speculative combinations. A `None` track means
/// "generalist" and is itself subject to validation, never defaulted away.
pub fn derive_job(
    discipline: &Discipline,
    grade: &Grade,
    track: Option<&Track>,
    library: &FrameworkLibrary,
) -> Option<Job> {
    if !discipline.allows_track(track.map(|t| &t.id)) {
        return None;
    }

    Some(Job {
        title: compose_title(discipline, grade, track),
        discipline: discipline.id.clone(),
        grade: grade.id.clone(),
        track: track.map(|t| t.id.clone()),
        skill_matrix: derive_skill_matrix(discipline, grade, track, library),
        behaviour_profile: derive_behaviour_profile(discipline, grade, track, library),
        responsibilities: derive_responsibilities(discipline, grade),
    })
}

/// Build the skill matrix for a combination.
///
/// Lists are walked primary → secondary → broad; a skill appearing in an
/// earlier list keeps that type even if a later list repeats it. Ids the
/// catalogue does not resolve are skipped, so partial catalogues (e.g. the
/// agent view) degrade instead of failing. Track capability boosts that
/// reach skills on none of the discipline's lists append those skills
/// afterwards with type `Track`.
pub fn derive_skill_matrix(
    discipline: &Discipline,
    grade: &Grade,
    track: Option<&Track>,
    library: &FrameworkLibrary,
) -> Vec<SkillMatrixEntry> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    let lists = [
        (SkillType::Primary, &discipline.primary_skills),
        (SkillType::Secondary, &discipline.secondary_skills),
        (SkillType::Broad, &discipline.broad_skills),
    ];

    for (skill_type, ids) in lists {
        for id in ids {
            if seen.contains(id) {
                continue;
            }
            let Some(skill) = library.skill(id) else {
                continue;
            };
            seen.insert(id.clone());
            let modifier = track
                .map(|t| t.capability_modifier(&skill.capability))
                .unwrap_or(0);
            let level = derive_skill_level(base_level(grade, skill_type), modifier);
            entries.push(matrix_entry(skill, skill_type, level));
        }
    }

    if let Some(track) = track {
        for (capability, modifier) in &track.capability_modifiers {
            // Only positive boosts introduce new skills.
            if *modifier <= 0 {
                continue;
            }
            for skill in library.skills_in_capability(capability) {
                if seen.contains(&skill.id) {
                    continue;
                }
                seen.insert(skill.id.clone());
                let level = derive_skill_level(base_level(grade, SkillType::Track), *modifier);
                entries.push(matrix_entry(skill, SkillType::Track, level));
            }
        }
    }

    entries
}

/// Build the behaviour profile over the full behaviour catalogue, applying
/// discipline and track modifiers to the grade's base maturity.
pub fn derive_behaviour_profile(
    discipline: &Discipline,
    grade: &Grade,
    track: Option<&Track>,
    library: &FrameworkLibrary,
) -> Vec<BehaviourProfileEntry> {
    library
        .behaviours()
        .iter()
        .map(|behaviour| {
            let modifier = discipline
                .behaviour_modifiers
                .get(&behaviour.id)
                .copied()
                .unwrap_or(0)
                + track.map(|t| t.behaviour_modifier(&behaviour.id)).unwrap_or(0);
            let maturity = derive_behaviour_maturity(grade.base_maturity, modifier);
            BehaviourProfileEntry {
                behaviour_id: behaviour.id.clone(),
                name: behaviour.name.clone(),
                maturity,
                description: behaviour.maturity_descriptions.get(&maturity).cloned(),
            }
        })
        .collect()
}

fn derive_responsibilities(discipline: &Discipline, grade: &Grade) -> Vec<String> {
    let mut responsibilities = grade.expectations.clone();
    if discipline.management {
        responsibilities.push(format!(
            "Grow the {} group through hiring, coaching, and performance feedback.",
            discipline.name
        ));
    }
    responsibilities
}

fn compose_title(discipline: &Discipline, grade: &Grade, track: Option<&Track>) -> String {
    match track {
        Some(track) => format!("{} {} ({})", grade.name, discipline.name, track.name),
        None => format!("{} {}", grade.name, discipline.name),
    }
}

fn base_level(grade: &Grade, skill_type: SkillType) -> SkillLevel {
    match skill_type {
        SkillType::Primary => grade.base_levels.primary,
        SkillType::Secondary => grade.base_levels.secondary,
        // Track-introduced skills start from the broad baseline.
        SkillType::Broad | SkillType::Track => grade.base_levels.broad,
    }
}

fn matrix_entry(skill: &Skill, skill_type: SkillType, level: SkillLevel) -> SkillMatrixEntry {
    SkillMatrixEntry {
        skill_id: skill.id.clone(),
        name: skill.name.clone(),
        capability: skill.capability.clone(),
        skill_type,
        level,
        description: skill.level_descriptions.get(&level).cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{
        BehaviourId, CapabilityId, DisciplineId, GradeBaseLevels, GradeId, SkillId, TrackId,
    };
    use crate::catalog::{Behaviour, Grade, Skill, Track};
    use std::collections::BTreeMap;

    fn skill(id: &str, capability: &str) -> Skill {
        let mut level_descriptions = BTreeMap::new();
        for level in SkillLevel::ALL {
            level_descriptions.insert(level, format!("{id} at {level}"));
        }
        Skill {
            id: SkillId::from(id),
            name: id.to_string(),
            capability: CapabilityId::from(capability),
            level_descriptions,
            human_only: false,
        }
    }

    fn behaviour(id: &str) -> Behaviour {
        Behaviour {
            id: BehaviourId::from(id),
            name: id.to_string(),
            maturity_descriptions: BTreeMap::new(),
        }
    }

    fn discipline() -> Discipline {
        Discipline {
            id: DisciplineId::from("backend"),
            name: "Backend Engineer".to_string(),
            primary_skills: vec![
                SkillId::from("api-design"),
                SkillId::from("distributed-systems"),
                SkillId::from("incident-response"),
            ],
            secondary_skills: vec![
                SkillId::from("observability"),
                // Repeats a primary id; the primary type must win.
                SkillId::from("api-design"),
            ],
            broad_skills: vec![SkillId::from("code-review")],
            behaviour_modifiers: BTreeMap::from([(BehaviourId::from("ownership"), 1)]),
            management: false,
            valid_tracks: vec![None, Some(TrackId::from("platform"))],
        }
    }

    fn track() -> Track {
        Track {
            id: TrackId::from("platform"),
            name: "Platform".to_string(),
            capability_modifiers: BTreeMap::from([(CapabilityId::from("scale"), 1)]),
            behaviour_modifiers: BTreeMap::new(),
        }
    }

    fn grade() -> Grade {
        Grade {
            id: GradeId::from("senior"),
            name: "Senior".to_string(),
            rank: 3,
            base_levels: GradeBaseLevels {
                primary: SkillLevel::Proficient,
                secondary: SkillLevel::Practitioner,
                broad: SkillLevel::Working,
            },
            base_maturity: MaturityLevel::Practicing,
            expectations: vec!["Own a service end to end".to_string()],
        }
    }

    fn library() -> FrameworkLibrary {
        FrameworkLibrary::new(
            vec![
                skill("api-design", "delivery"),
                skill("distributed-systems", "scale"),
                skill("incident-response", "reliability"),
                skill("observability", "reliability"),
                skill("code-review", "delivery"),
                skill("capacity-planning", "scale"),
            ],
            vec![behaviour("ownership"), behaviour("collaboration")],
            vec![discipline()],
            vec![track()],
            vec![grade()],
        )
    }

    #[test]
    fn track_modifier_lifts_only_its_capability() {
        let library = library();
        let job = derive_job(&discipline(), &grade(), Some(&track()), &library)
            .expect("valid combination");

        let lifted = job
            .skill_entry(&SkillId::from("distributed-systems"))
            .expect("scale skill present");
        assert_eq!(lifted.level, SkillLevel::Expert);

        let untouched = job
            .skill_entry(&SkillId::from("api-design"))
            .expect("delivery skill present");
        assert_eq!(untouched.level, SkillLevel::Proficient);

        let secondary = job
            .skill_entry(&SkillId::from("observability"))
            .expect("secondary skill present");
        assert_eq!(secondary.level, SkillLevel::Practitioner);
    }

    #[test]
    fn earlier_list_keeps_the_type_on_duplicates() {
        let library = library();
        let matrix = derive_skill_matrix(&discipline(), &grade(), None, &library);

        let api = matrix
            .iter()
            .find(|entry| entry.skill_id == SkillId::from("api-design"))
            .expect("api-design present");
        assert_eq!(api.skill_type, SkillType::Primary);
        assert_eq!(
            matrix
                .iter()
                .filter(|entry| entry.skill_id == SkillId::from("api-design"))
                .count(),
            1
        );
    }

    #[test]
    fn track_boost_appends_capability_skills_not_listed() {
        let library = library();
        let matrix = derive_skill_matrix(&discipline(), &grade(), Some(&track()), &library);

        let appended = matrix
            .iter()
            .find(|entry| entry.skill_id == SkillId::from("capacity-planning"))
            .expect("track-introduced skill present");
        assert_eq!(appended.skill_type, SkillType::Track);
        assert_eq!(appended.level, SkillLevel::Practitioner);
    }

    #[test]
    fn unresolvable_skill_ids_are_skipped() {
        let mut discipline = discipline();
        discipline.primary_skills.push(SkillId::from("quantum-ops"));
        let library = library();

        let matrix = derive_skill_matrix(&discipline, &grade(), None, &library);
        assert!(matrix
            .iter()
            .all(|entry| entry.skill_id != SkillId::from("quantum-ops")));
    }

    #[test]
    fn invalid_track_combination_fails_closed() {
        let library = library();
        let rogue = Track {
            id: TrackId::from("sre"),
            name: "SRE".to_string(),
            capability_modifiers: BTreeMap::new(),
            behaviour_modifiers: BTreeMap::new(),
        };
        assert!(derive_job(&discipline(), &grade(), Some(&rogue), &library).is_none());
    }

    #[test]
    fn levels_stay_in_bounds_under_extreme_modifiers() {
        let mut extreme = track();
        extreme
            .capability_modifiers
            .insert(CapabilityId::from("scale"), 100);
        extreme
            .capability_modifiers
            .insert(CapabilityId::from("delivery"), -100);
        let mut discipline = discipline();
        discipline.valid_tracks = vec![Some(TrackId::from("platform"))];
        let library = library();

        let matrix = derive_skill_matrix(&discipline, &grade(), Some(&extreme), &library);
        for entry in &matrix {
            assert!(entry.level.rank() <= 4);
        }
        let floored = matrix
            .iter()
            .find(|entry| entry.skill_id == SkillId::from("api-design"))
            .expect("delivery skill present");
        assert_eq!(floored.level, SkillLevel::Awareness);
    }

    #[test]
    fn behaviour_profile_covers_catalogue_and_applies_modifiers() {
        let library = library();
        let profile = derive_behaviour_profile(&discipline(), &grade(), None, &library);

        assert_eq!(profile.len(), 2);
        let ownership = profile
            .iter()
            .find(|entry| entry.behaviour_id == BehaviourId::from("ownership"))
            .expect("ownership present");
        assert_eq!(ownership.maturity, MaturityLevel::Influencing);
        let collaboration = profile
            .iter()
            .find(|entry| entry.behaviour_id == BehaviourId::from("collaboration"))
            .expect("collaboration present");
        assert_eq!(collaboration.maturity, MaturityLevel::Practicing);
    }

    #[test]
    fn titles_mention_grade_discipline_and_track() {
        let library = library();
        let generalist =
            derive_job(&discipline(), &grade(), None, &library).expect("generalist valid");
        assert_eq!(generalist.title, "Senior Backend Engineer");

        let tracked = derive_job(&discipline(), &grade(), Some(&track()), &library)
            .expect("tracked valid");
        assert_eq!(tracked.title, "Senior Backend Engineer (Platform)");
    }

    #[test]
    fn management_disciplines_extend_responsibilities() {
        let mut discipline = discipline();
        discipline.management = true;
        let library = library();

        let job = derive_job(&discipline, &grade(), None, &library).expect("valid combination");
        assert_eq!(job.responsibilities.len(), 2);
        assert!(job.responsibilities[1].contains("hiring"));
    }
}
