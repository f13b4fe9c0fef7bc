pub mod record;

pub use record::{
    Education, Entry, EntryId, EntrySection, Experience, Identified, PersonalDetails, Project,
    Record, Skill, SkillCategory, SkillLevel,
};
