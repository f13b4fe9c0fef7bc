//! Typed record changes.
//!
//! Every mutation of a session's record is described by a `RecordChange` and
//! applied with `RecordChange::apply_to`, which returns a new `Record` and never
//! touches the previous one. Field edits are a closed set of per-entity
//! variants, so an editor cannot address a field that does not exist.
//!
//! Changes that do not match anything (unknown id, edit aimed at the wrong
//! section, duplicate id on add) leave the record as it was.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{
    Education, Entry, EntryId, EntrySection, Experience, Identified, PersonalDetails, Project,
    Record, Skill, SkillCategory, SkillLevel,
};

// ────────────────────────────────────────────────────────────────────────────
// Whole-slice replacement (the section editor contract)
// ────────────────────────────────────────────────────────────────────────────

/// Replaces one entire slice of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "value", rename_all = "snake_case")]
pub enum SectionUpdate {
    PersonalDetails(PersonalDetails),
    Experience(Vec<Experience>),
    Education(Vec<Education>),
    Skills(Vec<Skill>),
    Projects(Vec<Project>),
}

impl SectionUpdate {
    /// Ids that occur more than once in the replacement sequence.
    pub fn duplicate_ids(&self) -> Vec<EntryId> {
        match self {
            SectionUpdate::PersonalDetails(_) => Vec::new(),
            SectionUpdate::Experience(items) => duplicates(items),
            SectionUpdate::Education(items) => duplicates(items),
            SectionUpdate::Skills(items) => duplicates(items),
            SectionUpdate::Projects(items) => duplicates(items),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field edits
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum PersonalEdit {
    FullName(String),
    Email(String),
    Phone(String),
    Location(String),
    Summary(String),
    Linkedin(Option<String>),
    Portfolio(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ExperienceEdit {
    JobTitle(String),
    Company(String),
    Location(String),
    StartDate(String),
    EndDate(String),
    Current(bool),
    Description(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum EducationEdit {
    Degree(String),
    Institution(String),
    Location(String),
    StartDate(String),
    EndDate(String),
    Gpa(Option<String>),
    Description(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum SkillEdit {
    Name(String),
    Level(SkillLevel),
    Category(SkillCategory),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ProjectEdit {
    Name(String),
    Description(String),
    /// Raw comma-delimited input; parsed into an ordered label list.
    Technologies(String),
    Link(Option<String>),
    StartDate(String),
    EndDate(String),
}

/// A field edit addressed to one entry type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", content = "change", rename_all = "snake_case")]
pub enum EntryEdit {
    Experience(ExperienceEdit),
    Education(EducationEdit),
    Skills(SkillEdit),
    Projects(ProjectEdit),
}

// ────────────────────────────────────────────────────────────────────────────
// RecordChange
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RecordChange {
    ReplaceSection { update: SectionUpdate },
    EditPersonal { edit: PersonalEdit },
    AddEntry { entry: Entry },
    EditEntry { id: EntryId, edit: EntryEdit },
    RemoveEntry { section: EntrySection, id: EntryId },
}

impl RecordChange {
    /// Produces the record that results from applying this change to `record`.
    pub fn apply_to(&self, record: &Record) -> Record {
        let mut next = record.clone();
        match self {
            RecordChange::ReplaceSection { update } => match update {
                SectionUpdate::PersonalDetails(p) => next.personal_details = p.clone(),
                SectionUpdate::Experience(items) => next.experience = unique_by_id(items),
                SectionUpdate::Education(items) => next.education = unique_by_id(items),
                SectionUpdate::Skills(items) => next.skills = unique_by_id(items),
                SectionUpdate::Projects(items) => next.projects = unique_by_id(items),
            },
            RecordChange::EditPersonal { edit } => {
                next.personal_details = edit_personal(&record.personal_details, edit);
            }
            RecordChange::AddEntry { entry } => match entry {
                Entry::Experience(e) => push_unique(&mut next.experience, e),
                Entry::Education(e) => push_unique(&mut next.education, e),
                Entry::Skills(e) => push_unique(&mut next.skills, e),
                Entry::Projects(e) => push_unique(&mut next.projects, e),
            },
            RecordChange::EditEntry { id, edit } => match edit {
                EntryEdit::Experience(change) => {
                    next.experience = replace_by_id(&record.experience, id, |e| edit_experience(e, change));
                }
                EntryEdit::Education(change) => {
                    next.education = replace_by_id(&record.education, id, |e| edit_education(e, change));
                }
                EntryEdit::Skills(change) => {
                    next.skills = replace_by_id(&record.skills, id, |e| edit_skill(e, change));
                }
                EntryEdit::Projects(change) => {
                    next.projects = replace_by_id(&record.projects, id, |e| edit_project(e, change));
                }
            },
            RecordChange::RemoveEntry { section, id } => match section {
                EntrySection::Experience => next.experience.retain(|e| e.id() != id),
                EntrySection::Education => next.education.retain(|e| e.id() != id),
                EntrySection::Skills => next.skills.retain(|e| e.id() != id),
                EntrySection::Projects => next.projects.retain(|e| e.id() != id),
            },
        }
        next
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Per-entity edits
// ────────────────────────────────────────────────────────────────────────────

fn edit_personal(current: &PersonalDetails, edit: &PersonalEdit) -> PersonalDetails {
    let mut p = current.clone();
    match edit {
        PersonalEdit::FullName(v) => p.full_name = v.clone(),
        PersonalEdit::Email(v) => p.email = v.clone(),
        PersonalEdit::Phone(v) => p.phone = v.clone(),
        PersonalEdit::Location(v) => p.location = v.clone(),
        PersonalEdit::Summary(v) => p.summary = v.clone(),
        PersonalEdit::Linkedin(v) => p.linkedin = v.clone(),
        PersonalEdit::Portfolio(v) => p.portfolio = v.clone(),
    }
    p
}

fn edit_experience(current: &Experience, edit: &ExperienceEdit) -> Experience {
    let mut e = current.clone();
    match edit {
        ExperienceEdit::JobTitle(v) => e.job_title = v.clone(),
        ExperienceEdit::Company(v) => e.company = v.clone(),
        ExperienceEdit::Location(v) => e.location = v.clone(),
        ExperienceEdit::StartDate(v) => e.start_date = v.clone(),
        ExperienceEdit::EndDate(v) => e.end_date = v.clone(),
        ExperienceEdit::Current(v) => e.current = *v,
        ExperienceEdit::Description(v) => e.description = v.clone(),
    }
    e
}

fn edit_education(current: &Education, edit: &EducationEdit) -> Education {
    let mut e = current.clone();
    match edit {
        EducationEdit::Degree(v) => e.degree = v.clone(),
        EducationEdit::Institution(v) => e.institution = v.clone(),
        EducationEdit::Location(v) => e.location = v.clone(),
        EducationEdit::StartDate(v) => e.start_date = v.clone(),
        EducationEdit::EndDate(v) => e.end_date = v.clone(),
        EducationEdit::Gpa(v) => e.gpa = v.clone(),
        EducationEdit::Description(v) => e.description = v.clone(),
    }
    e
}

fn edit_skill(current: &Skill, edit: &SkillEdit) -> Skill {
    let mut s = current.clone();
    match edit {
        SkillEdit::Name(v) => s.name = v.clone(),
        SkillEdit::Level(v) => s.level = *v,
        SkillEdit::Category(v) => s.category = *v,
    }
    s
}

fn edit_project(current: &Project, edit: &ProjectEdit) -> Project {
    let mut p = current.clone();
    match edit {
        ProjectEdit::Name(v) => p.name = v.clone(),
        ProjectEdit::Description(v) => p.description = v.clone(),
        ProjectEdit::Technologies(raw) => p.technologies = Project::parse_technologies(raw),
        ProjectEdit::Link(v) => p.link = v.clone(),
        ProjectEdit::StartDate(v) => p.start_date = v.clone(),
        ProjectEdit::EndDate(v) => p.end_date = v.clone(),
    }
    p
}

// ────────────────────────────────────────────────────────────────────────────
// Sequence helpers
// ────────────────────────────────────────────────────────────────────────────

fn replace_by_id<T, F>(items: &[T], id: &EntryId, edit: F) -> Vec<T>
where
    T: Identified + Clone,
    F: Fn(&T) -> T,
{
    if !items.iter().any(|item| item.id() == id) {
        warn!("Edit targets unknown entry {id}; ignoring");
    }
    items
        .iter()
        .map(|item| if item.id() == id { edit(item) } else { item.clone() })
        .collect()
}

fn push_unique<T: Identified + Clone>(items: &mut Vec<T>, entry: &T) {
    if items.iter().any(|item| item.id() == entry.id()) {
        warn!("Entry {} already exists; add ignored", entry.id());
        return;
    }
    items.push(entry.clone());
}

/// Keeps the first occurrence of every id.
fn unique_by_id<T: Identified + Clone>(items: &[T]) -> Vec<T> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| seen.insert(item.id().clone()))
        .cloned()
        .collect()
}

fn duplicates<T: Identified>(items: &[T]) -> Vec<EntryId> {
    let mut seen = HashSet::new();
    let mut dupes = Vec::new();
    for item in items {
        if !seen.insert(item.id()) && !dupes.contains(item.id()) {
            dupes.push(item.id().clone());
        }
    }
    dupes
}
