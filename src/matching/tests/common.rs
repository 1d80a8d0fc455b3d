use std::collections::BTreeMap;

use crate::catalog::{
    Behaviour, BehaviourId, CapabilityId, Discipline, DisciplineId, FrameworkLibrary, Grade,
    GradeBaseLevels, GradeId, Skill, SkillId, Track, TrackId,
};
use crate::derivation::{derive_job, Job};
use crate::levels::{MaturityLevel, SkillLevel};
use crate::matching::CandidateProfile;

fn skill(id: &str, capability: &str) -> Skill {
    Skill {
        id: SkillId::from(id),
        name: id.to_string(),
        capability: CapabilityId::from(capability),
        level_descriptions: BTreeMap::new(),
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

fn grade(id: &str, name: &str, rank: u8, base: [SkillLevel; 3], maturity: MaturityLevel) -> Grade {
    Grade {
        id: GradeId::from(id),
        name: name.to_string(),
        rank,
        base_levels: GradeBaseLevels {
            primary: base[0],
            secondary: base[1],
            broad: base[2],
        },
        base_maturity: maturity,
        expectations: Vec::new(),
    }
}

pub(super) fn library() -> FrameworkLibrary {
    FrameworkLibrary::new(
        vec![
            skill("api-design", "delivery"),
            skill("distributed-systems", "scale"),
            skill("incident-response", "reliability"),
            skill("observability", "reliability"),
            skill("capacity-planning", "scale"),
            skill("code-review", "delivery"),
        ],
        vec![behaviour("ownership"), behaviour("collaboration")],
        vec![Discipline {
            id: DisciplineId::from("backend"),
            name: "Backend Engineer".to_string(),
            primary_skills: vec![
                SkillId::from("api-design"),
                SkillId::from("distributed-systems"),
                SkillId::from("incident-response"),
            ],
            secondary_skills: vec![
                SkillId::from("observability"),
                SkillId::from("capacity-planning"),
            ],
            broad_skills: vec![SkillId::from("code-review")],
            behaviour_modifiers: BTreeMap::from([(BehaviourId::from("ownership"), 1)]),
            management: false,
            valid_tracks: vec![None, Some(TrackId::from("platform"))],
        }],
        vec![Track {
            id: TrackId::from("platform"),
            name: "Platform".to_string(),
            capability_modifiers: BTreeMap::from([(CapabilityId::from("scale"), 1)]),
            behaviour_modifiers: BTreeMap::new(),
        }],
        vec![
            grade(
                "mid",
                "Engineer",
                2,
                [
                    SkillLevel::Practitioner,
                    SkillLevel::Working,
                    SkillLevel::Awareness,
                ],
                MaturityLevel::Developing,
            ),
            grade(
                "senior",
                "Senior",
                3,
                [
                    SkillLevel::Proficient,
                    SkillLevel::Practitioner,
                    SkillLevel::Working,
                ],
                MaturityLevel::Practicing,
            ),
            grade(
                "staff",
                "Staff",
                4,
                [
                    SkillLevel::Expert,
                    SkillLevel::Proficient,
                    SkillLevel::Practitioner,
                ],
                MaturityLevel::Influencing,
            ),
        ],
    )
}

pub(super) fn job_for(library: &FrameworkLibrary, grade_id: &str, track_id: Option<&str>) -> Job {
    let discipline = library
        .discipline(&DisciplineId::from("backend"))
        .expect("discipline present");
    let grade = library
        .grade(&GradeId::from(grade_id))
        .expect("grade present");
    let track = track_id.map(|id| library.track(&TrackId::from(id)).expect("track present"));
    derive_job(discipline, grade, track, library).expect("valid combination")
}

pub(super) fn perfect_candidate(job: &Job) -> CandidateProfile {
    CandidateProfile::from_job(job)
}
