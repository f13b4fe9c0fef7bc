use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Entry identity
// ────────────────────────────────────────────────────────────────────────────

/// Opaque entry identifier. Only used to match entries on edit/removal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn generate() -> Self {
        EntryId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A defaulted id is a freshly generated one, so `Entry::default()` yields a
/// placeholder entry that already satisfies the uniqueness invariant.
impl Default for EntryId {
    fn default() -> Self {
        EntryId::generate()
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        EntryId(value.to_string())
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        EntryId(value)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Implemented by every repeatable entry type.
pub trait Identified {
    fn id(&self) -> &EntryId;
}

// ────────────────────────────────────────────────────────────────────────────
// Closed enumerations
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    #[serde(alias = "Beginner")]
    Beginner,
    #[default]
    #[serde(alias = "Intermediate")]
    Intermediate,
    #[serde(alias = "Advanced")]
    Advanced,
    #[serde(alias = "Expert")]
    Expert,
}

impl SkillLevel {
    pub fn label(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Expert => "Expert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    #[default]
    #[serde(alias = "Technical")]
    Technical,
    #[serde(alias = "Soft Skills")]
    SoftSkills,
    #[serde(alias = "Languages")]
    Languages,
    #[serde(alias = "Tools")]
    Tools,
}

impl SkillCategory {
    /// Display order of skill groups.
    pub const ALL: [SkillCategory; 4] = [
        SkillCategory::Technical,
        SkillCategory::SoftSkills,
        SkillCategory::Languages,
        SkillCategory::Tools,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::Technical => "Technical",
            SkillCategory::SoftSkills => "Soft Skills",
            SkillCategory::Languages => "Languages",
            SkillCategory::Tools => "Tools",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Record
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub summary: String,
    /// Professional network profile.
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub id: EntryId,
    pub job_title: String,
    pub company: String,
    pub location: String,
    /// `YYYY-MM` or empty.
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    pub description: String,
}

impl Experience {
    /// End date as it should be displayed; a current position has none.
    pub fn displayed_end_date(&self) -> Option<&str> {
        if self.current {
            None
        } else {
            Some(&self.end_date)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub id: EntryId,
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub gpa: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub id: EntryId,
    pub name: String,
    pub level: SkillLevel,
    pub category: SkillCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub id: EntryId,
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub link: Option<String>,
    pub start_date: String,
    pub end_date: String,
}

impl Project {
    /// Splits a comma-delimited input into trimmed, non-empty labels, keeping order.
    pub fn parse_technologies(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

macro_rules! impl_identified {
    ($($ty:ty),+) => {
        $(impl Identified for $ty {
            fn id(&self) -> &EntryId {
                &self.id
            }
        })+
    };
}

impl_identified!(Experience, Education, Skill, Project);

/// The complete document a session edits and renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    pub personal_details: PersonalDetails,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
}

/// The repeatable sections of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySection {
    Experience,
    Education,
    Skills,
    Projects,
}

/// One entry of any section, tagged by section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum Entry {
    Experience(Experience),
    Education(Education),
    Skills(Skill),
    Projects(Project),
}

impl Entry {
    /// A placeholder entry with blank fields and a fresh identifier.
    pub fn blank(section: EntrySection) -> Self {
        match section {
            EntrySection::Experience => Entry::Experience(Experience::default()),
            EntrySection::Education => Entry::Education(Education::default()),
            EntrySection::Skills => Entry::Skills(Skill::default()),
            EntrySection::Projects => Entry::Projects(Project::default()),
        }
    }

    pub fn section(&self) -> EntrySection {
        match self {
            Entry::Experience(_) => EntrySection::Experience,
            Entry::Education(_) => EntrySection::Education,
            Entry::Skills(_) => EntrySection::Skills,
            Entry::Projects(_) => EntrySection::Projects,
        }
    }

    pub fn id(&self) -> &EntryId {
        match self {
            Entry::Experience(e) => e.id(),
            Entry::Education(e) => e.id(),
            Entry::Skills(e) => e.id(),
            Entry::Projects(e) => e.id(),
        }
    }
}
