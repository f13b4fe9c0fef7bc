// Template renderer: Record + template id -> visual tree.
// Pure and deterministic; the export pipeline relies on re-rendering giving
// exactly what the preview showed.

mod classic;
pub mod format;
mod minimal;
mod modern;
pub mod palette;
pub mod select;
pub mod tree;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Education, Experience, Project, Record};
use format::{DateRange, MonthStyle};
use select::{ContactItem, Selection, SkillGroup};

pub use tree::{Node, Role, SectionKind, Style, VisualTree};

// ────────────────────────────────────────────────────────────────────────────
// Template ids
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    #[default]
    Modern,
    Classic,
    Minimal,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [TemplateId::Modern, TemplateId::Classic, TemplateId::Minimal];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::Modern => "modern",
            TemplateId::Classic => "classic",
            TemplateId::Minimal => "minimal",
        }
    }

    /// Exact (case-insensitive, trimmed) match against the known ids.
    pub fn parse(selection: &str) -> Option<Self> {
        let selection = selection.trim();
        TemplateId::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(selection))
    }

    /// Total resolution of a free-form selection: unknown ids render as the
    /// default template.
    pub fn resolve(selection: &str) -> Self {
        TemplateId::parse(selection).unwrap_or_default()
    }

    pub fn descriptor(self) -> TemplateDescriptor {
        let (name, description) = match self {
            TemplateId::Modern => ("Modern", "Clean and contemporary design with gradient accents"),
            TemplateId::Classic => ("Classic", "Traditional professional layout with serif typography"),
            TemplateId::Minimal => ("Minimal", "Simple and elegant with focus on content"),
        };
        TemplateDescriptor {
            id: self,
            name,
            description,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateDescriptor {
    pub id: TemplateId,
    pub name: &'static str,
    pub description: &'static str,
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering
// ────────────────────────────────────────────────────────────────────────────

/// Presentation of one template. Implementations style what they are given and
/// never decide which sections or entries appear.
pub(crate) trait Theme {
    fn months(&self) -> MonthStyle;
    fn document(&self, children: Vec<Node>) -> Node;
    fn header(&self, name: &str, contacts: &[ContactItem<'_>]) -> Node;
    fn summary(&self, text: &str) -> Node;
    fn experience(&self, entries: &[Experience]) -> Node;
    fn education(&self, entries: &[Education]) -> Node;
    fn skills(&self, groups: &[SkillGroup<'_>]) -> Node;
    fn projects(&self, entries: &[Project]) -> Node;
}

/// Renders `record` with `template`.
pub fn render(record: &Record, template: TemplateId) -> VisualTree {
    let selection = Selection::from_record(record);
    let root = match template {
        TemplateId::Modern => compose(&modern::Modern, &selection),
        TemplateId::Classic => compose(&classic::Classic, &selection),
        TemplateId::Minimal => compose(&minimal::Minimal, &selection),
    };
    VisualTree { template, root }
}

fn compose(theme: &dyn Theme, selection: &Selection<'_>) -> Node {
    let mut children = vec![theme.header(selection.name, &selection.contacts)];
    if let Some(summary) = selection.summary {
        children.push(theme.summary(summary));
    }
    if !selection.experience.is_empty() {
        children.push(theme.experience(selection.experience));
    }
    if !selection.education.is_empty() {
        children.push(theme.education(selection.education));
    }
    if !selection.skill_groups.is_empty() {
        children.push(theme.skills(&selection.skill_groups));
    }
    if !selection.projects.is_empty() {
        children.push(theme.projects(selection.projects));
    }
    theme.document(children)
}

// Helpers shared by the themes.

pub(crate) fn experience_dates(entry: &Experience, months: MonthStyle) -> DateRange {
    DateRange::new(&entry.start_date, entry.displayed_end_date(), entry.current, months)
}

pub(crate) fn plain_dates(start: &str, end: &str, months: MonthStyle) -> DateRange {
    DateRange::new(start, Some(end), false, months)
}

/// A dates node, or nothing when both sides are blank.
pub(crate) fn dates_node(range: &DateRange, style: Style) -> Option<Node> {
    (!range.is_blank()).then(|| Node::text(Role::Dates, style, range.label()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EntryId, PersonalDetails, Skill, SkillCategory, SkillLevel};

    fn experience(id: &str, start: &str, end: &str, current: bool) -> Experience {
        Experience {
            id: EntryId::from(id),
            job_title: format!("Role {id}"),
            company: "Acme".to_string(),
            location: "Berlin".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            current,
            description: "Built things\nShipped things".to_string(),
        }
    }

    fn skill(id: &str, name: &str, category: SkillCategory) -> Skill {
        Skill {
            id: EntryId::from(id),
            name: name.to_string(),
            level: SkillLevel::Expert,
            category,
        }
    }

    fn full_record() -> Record {
        Record {
            personal_details: PersonalDetails {
                full_name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone: "+49 30 1234".to_string(),
                location: "Berlin".to_string(),
                summary: "Backend engineer.".to_string(),
                linkedin: Some("linkedin.com/in/jane".to_string()),
                portfolio: Some("jane.dev".to_string()),
            },
            experience: vec![
                experience("a", "2020-01", "2024-01", true),
                experience("b", "2018-03", "2022-06", false),
            ],
            education: vec![Education {
                id: EntryId::from("e1"),
                degree: "BSc Computer Science".to_string(),
                institution: "TU Berlin".to_string(),
                start_date: "2014-10".to_string(),
                end_date: "2018-02".to_string(),
                gpa: Some("1.3".to_string()),
                ..Default::default()
            }],
            skills: vec![
                skill("s1", "Go", SkillCategory::Technical),
                skill("s2", "Spanish", SkillCategory::Languages),
                skill("s3", "Python", SkillCategory::Technical),
            ],
            projects: vec![Project {
                id: EntryId::from("p1"),
                name: "Vitae".to_string(),
                description: "CV builder\nwith export".to_string(),
                technologies: vec!["Rust".to_string(), "axum".to_string(), "lopdf".to_string()],
                link: Some("github.com/jane/vitae".to_string()),
                start_date: "2023-01".to_string(),
                end_date: "".to_string(),
            }],
        }
    }

    // ── template ids ────────────────────────────────────────────────────────

    #[test]
    fn test_resolve_known_and_unknown_ids() {
        assert_eq!(TemplateId::resolve("classic"), TemplateId::Classic);
        assert_eq!(TemplateId::resolve(" Minimal "), TemplateId::Minimal);
        assert_eq!(TemplateId::resolve("fancy"), TemplateId::Modern);
        assert_eq!(TemplateId::resolve(""), TemplateId::Modern);
        assert_eq!(TemplateId::parse("fancy"), None);
    }

    #[test]
    fn test_unknown_template_renders_as_modern() {
        let record = full_record();
        assert_eq!(
            render(&record, TemplateId::resolve("unknown")),
            render(&record, TemplateId::Modern)
        );
    }

    // ── determinism ─────────────────────────────────────────────────────────

    #[test]
    fn test_render_is_idempotent() {
        let record = full_record();
        for template in TemplateId::ALL {
            assert_eq!(render(&record, template), render(&record, template));
        }
    }

    // ── omission ────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_record_renders_header_only() {
        for template in TemplateId::ALL {
            let tree = render(&Record::default(), template);
            assert!(tree.sections().is_empty(), "{template}: {:?}", tree.sections());
            let name = tree.root.find(&Role::Name).and_then(|n| n.text.as_deref());
            assert_eq!(name, Some(select::NAME_PLACEHOLDER));
            assert!(tree.root.find(&Role::ContactItem).is_none());
        }
    }

    #[test]
    fn test_each_empty_section_is_omitted() {
        let full = full_record();
        let cases: Vec<(SectionKind, Record)> = vec![
            (SectionKind::Summary, Record {
                personal_details: PersonalDetails {
                    summary: "   ".to_string(),
                    ..full.personal_details.clone()
                },
                ..full.clone()
            }),
            (SectionKind::Experience, Record { experience: vec![], ..full.clone() }),
            (SectionKind::Education, Record { education: vec![], ..full.clone() }),
            (SectionKind::Skills, Record { skills: vec![], ..full.clone() }),
            (SectionKind::Projects, Record { projects: vec![], ..full.clone() }),
        ];

        for (kind, record) in cases {
            for template in TemplateId::ALL {
                let tree = render(&record, template);
                assert!(tree.section(kind).is_none(), "{template} still renders {kind:?}");
                assert_eq!(tree.sections().len(), 4, "{template} dropped more than {kind:?}");
            }
        }
    }

    // ── cross-template parity ───────────────────────────────────────────────

    #[test]
    fn test_templates_select_same_sections_and_entries() {
        let record = full_record();
        let modern = render(&record, TemplateId::Modern);
        let classic = render(&record, TemplateId::Classic);
        let minimal = render(&record, TemplateId::Minimal);

        assert_eq!(modern.selection(), classic.selection());
        assert_eq!(modern.selection(), minimal.selection());
        assert_eq!(
            modern.entry_ids(SectionKind::Experience),
            vec![EntryId::from("a"), EntryId::from("b")]
        );
        assert_ne!(modern.root, classic.root);
    }

    #[test]
    fn test_present_and_formatted_end_labels() {
        let record = full_record();
        let a = EntryId::from("a");
        let b = EntryId::from("b");

        for template in TemplateId::ALL {
            let tree = render(&record, template);
            let a_dates = tree.dates_of(&a).unwrap();
            let b_dates = tree.dates_of(&b).unwrap();
            assert!(a_dates.ends_with(" - Present"), "{template}: {a_dates}");
            assert!(!a_dates.contains("2024"), "{template}: stored end leaked: {a_dates}");
            assert!(b_dates.ends_with("2022"), "{template}: {b_dates}");
        }

        let classic = render(&record, TemplateId::Classic);
        assert_eq!(classic.dates_of(&b), Some("March 2018 - June 2022"));
        let modern = render(&record, TemplateId::Modern);
        assert_eq!(modern.dates_of(&b), Some("Mar 2018 - Jun 2022"));
    }

    // ── skills ──────────────────────────────────────────────────────────────

    #[test]
    fn test_skill_grouping_in_every_template() {
        let record = full_record();
        for template in TemplateId::ALL {
            let groups = render(&record, template).skill_groups();
            assert_eq!(
                groups,
                vec![
                    (SkillCategory::Technical, vec!["Go".to_string(), "Python".to_string()]),
                    (SkillCategory::Languages, vec!["Spanish".to_string()]),
                ],
                "{template}"
            );
        }
    }

    // ── projects & descriptions ─────────────────────────────────────────────

    #[test]
    fn test_technologies_in_order_and_suppressed_when_empty() {
        let mut record = full_record();
        for template in TemplateId::ALL {
            let tree = render(&record, template);
            let techs = tree.root.find(&Role::Technologies).unwrap().plain_text();
            let rust = techs.find("Rust").unwrap();
            let axum = techs.find("axum").unwrap();
            let lopdf = techs.find("lopdf").unwrap();
            assert!(rust < axum && axum < lopdf, "{template}: {techs}");
        }

        record.projects[0].technologies.clear();
        for template in TemplateId::ALL {
            let tree = render(&record, template);
            assert!(tree.root.find(&Role::Technologies).is_none(), "{template}");
            assert_eq!(tree.entry_ids(SectionKind::Projects), vec![EntryId::from("p1")]);
        }
    }

    #[test]
    fn test_descriptions_preserve_line_breaks() {
        let record = full_record();
        for template in TemplateId::ALL {
            let tree = render(&record, template);
            let entry = tree.entry(&EntryId::from("b")).unwrap();
            let desc = entry.find(&Role::Description).unwrap();
            assert_eq!(desc.text.as_deref(), Some("Built things\nShipped things"));
            assert!(desc.style.pre_line, "{template}");

            let project = tree.entry(&EntryId::from("p1")).unwrap();
            let desc = project.find(&Role::Description).unwrap();
            assert!(desc.text.as_deref().unwrap().contains('\n'));
            assert!(desc.style.pre_line, "{template}");
        }
    }

    #[test]
    fn test_blank_dates_render_no_dates_node() {
        let mut record = full_record();
        record.experience[1].start_date.clear();
        record.experience[1].end_date.clear();
        for template in TemplateId::ALL {
            let tree = render(&record, template);
            assert_eq!(tree.dates_of(&EntryId::from("b")), None, "{template}");
        }
    }

    #[test]
    fn test_contact_details_same_in_every_template() {
        let record = full_record();
        for template in TemplateId::ALL {
            let tree = render(&record, template);
            let items = tree.root.find_all(&Role::ContactItem);
            assert_eq!(items.len(), 5, "{template}");
            let text = tree.root.find(&Role::Header).unwrap().plain_text();
            assert!(text.contains("jane.dev"), "{template}");
            assert!(text.contains("Jane Doe"), "{template}");
        }
    }

    #[test]
    fn test_gpa_rendered_when_present() {
        let record = full_record();
        for template in TemplateId::ALL {
            let tree = render(&record, template);
            let gpa = tree.root.find(&Role::Gpa).and_then(|n| n.text.as_deref());
            assert_eq!(gpa, Some("GPA: 1.3"), "{template}");
        }
    }

    #[test]
    fn test_template_descriptors() {
        let d = TemplateId::Classic.descriptor();
        assert_eq!(d.name, "Classic");
        assert!(d.description.contains("serif"));
        let json = serde_json::to_value(TemplateId::Minimal.descriptor()).unwrap();
        assert_eq!(json["id"], "minimal");
    }
}
