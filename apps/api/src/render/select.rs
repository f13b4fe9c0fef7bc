//! Data selection shared by all templates.
//!
//! Templates only style what `Selection` hands them, which is what keeps the
//! sections and entries of a record identical across templates.

use crate::models::{Education, Experience, PersonalDetails, Project, Record, Skill, SkillCategory};
use crate::render::format::{non_blank, non_blank_opt};

/// Shown in the header while the record has no name.
pub const NAME_PLACEHOLDER: &str = "Your Name";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Email,
    Phone,
    Location,
    Profile,
    Portfolio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactItem<'a> {
    pub kind: ContactKind,
    pub value: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillGroup<'a> {
    pub category: SkillCategory,
    pub skills: Vec<&'a Skill>,
}

#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub name: &'a str,
    pub contacts: Vec<ContactItem<'a>>,
    pub summary: Option<&'a str>,
    pub experience: &'a [Experience],
    pub education: &'a [Education],
    pub skill_groups: Vec<SkillGroup<'a>>,
    pub projects: &'a [Project],
}

impl<'a> Selection<'a> {
    pub fn from_record(record: &'a Record) -> Self {
        let personal = &record.personal_details;
        Selection {
            name: non_blank(&personal.full_name).unwrap_or(NAME_PLACEHOLDER),
            contacts: contact_items(personal),
            summary: non_blank(&personal.summary),
            experience: &record.experience,
            education: &record.education,
            skill_groups: group_skills(&record.skills),
            projects: &record.projects,
        }
    }
}

/// Non-blank contact details in display order.
pub fn contact_items(personal: &PersonalDetails) -> Vec<ContactItem<'_>> {
    [
        (ContactKind::Email, non_blank(&personal.email)),
        (ContactKind::Phone, non_blank(&personal.phone)),
        (ContactKind::Location, non_blank(&personal.location)),
        (ContactKind::Profile, non_blank_opt(&personal.linkedin)),
        (ContactKind::Portfolio, non_blank_opt(&personal.portfolio)),
    ]
    .into_iter()
    .filter_map(|(kind, value)| value.map(|value| ContactItem { kind, value }))
    .collect()
}

/// Groups skills by the fixed category order. Empty groups are dropped and
/// members keep their position from the record.
pub fn group_skills(skills: &[Skill]) -> Vec<SkillGroup<'_>> {
    SkillCategory::ALL
        .iter()
        .map(|&category| SkillGroup {
            category,
            skills: skills.iter().filter(|s| s.category == category).collect(),
        })
        .filter(|group| !group.skills.is_empty())
        .collect()
}
