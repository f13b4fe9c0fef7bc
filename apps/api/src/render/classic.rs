//! Classic: centred serif header, ruled uppercase headings, long month names.

use crate::layout::font_metrics::{Typeface, Weight};
use crate::models::{Education, Experience, Project};
use crate::render::format::{join_labels, non_blank, non_blank_opt, with_location, MonthStyle};
use crate::render::palette::*;
use crate::render::select::{ContactItem, SkillGroup};
use crate::render::tree::{Align, Insets, Node, Paint, Role, SectionKind, Side, Style};
use crate::render::{dates_node, experience_dates, plain_dates, Theme};

const FACE: Typeface = Typeface::Serif;

pub(crate) struct Classic;

fn section(kind: SectionKind, heading: &str, body: Vec<Node>) -> Node {
    let mut children = vec![Node::text(
        Role::Heading,
        Style::text(FACE, 17.0)
            .weight(Weight::Bold)
            .uppercase()
            .color(GRAY_900)
            .border(Side::Bottom, 1.0, GRAY_400)
            .padding(Insets::bottom(4.0)),
        heading,
    )];
    children.extend(body);
    Node::stack(
        Role::Section(kind),
        Style::default().gap(10.0).margin_bottom(20.0),
        children,
    )
}

fn entry(role: Role, children: Vec<Node>) -> Node {
    Node::stack(role, Style::default().gap(3.0).margin_bottom(6.0), children)
}

fn title_row(title: &str, dates: Option<Node>) -> Node {
    let mut children = vec![Node::text(
        Role::Title,
        Style::text(FACE, 15.0).weight(Weight::Bold).color(GRAY_900),
        title,
    )];
    children.extend(dates);
    Node::row(Role::Group, Style::default().gap(12.0), children)
}

fn dates_style() -> Style {
    Style::text(FACE, 13.0).italic().color(GRAY_600)
}

fn subtitle(text: String) -> Node {
    Node::text(Role::Subtitle, Style::text(FACE, 14.0).italic().color(GRAY_700), text)
}

fn body_text(role: Role, text: &str) -> Option<Node> {
    non_blank(text).map(|_| Node::text(role, Style::text(FACE, 13.5).color(GRAY_800).pre_line(), text))
}

impl Theme for Classic {
    fn months(&self) -> MonthStyle {
        MonthStyle::Long
    }

    fn document(&self, children: Vec<Node>) -> Node {
        Node::stack(
            Role::Document,
            Style::default()
                .background(Paint::Solid { color: WHITE })
                .padding(Insets::xy(48.0, 40.0)),
            children,
        )
    }

    fn header(&self, name: &str, contacts: &[ContactItem<'_>]) -> Node {
        let mut children = vec![Node::text(
            Role::Name,
            Style::text(FACE, 30.0)
                .weight(Weight::Bold)
                .color(GRAY_900)
                .align(Align::Center),
            name,
        )];
        if !contacts.is_empty() {
            let mut items = Vec::with_capacity(contacts.len() * 2);
            for (i, item) in contacts.iter().enumerate() {
                if i > 0 {
                    items.push(Node::text(Role::Marker, Style::text(FACE, 13.0).color(GRAY_400), "|"));
                }
                items.push(Node::text(
                    Role::ContactItem,
                    Style::text(FACE, 13.0).color(GRAY_700),
                    item.value,
                ));
            }
            children.push(Node::flow(
                Role::Contact,
                Style::default().gap(8.0).align(Align::Center),
                items,
            ));
        }
        Node::stack(
            Role::Header,
            Style::default()
                .border(Side::Bottom, 2.0, GRAY_800)
                .padding(Insets::bottom(16.0))
                .gap(8.0)
                .margin_bottom(24.0),
            children,
        )
    }

    fn summary(&self, text: &str) -> Node {
        section(
            SectionKind::Summary,
            "Professional Summary",
            body_text(Role::Summary, text).into_iter().collect(),
        )
    }

    fn experience(&self, entries: &[Experience]) -> Node {
        let items = entries
            .iter()
            .map(|e| {
                let dates = dates_node(&experience_dates(e, self.months()), dates_style());
                let mut children = vec![
                    title_row(&e.job_title, dates),
                    subtitle(with_location(&e.company, &e.location)),
                ];
                children.extend(body_text(Role::Description, &e.description));
                entry(Role::Entry(e.id.clone()), children)
            })
            .collect();
        section(SectionKind::Experience, "Professional Experience", items)
    }

    fn education(&self, entries: &[Education]) -> Node {
        let items = entries
            .iter()
            .map(|e| {
                let range = plain_dates(&e.start_date, &e.end_date, self.months());
                let mut children = vec![
                    title_row(&e.degree, dates_node(&range, dates_style())),
                    subtitle(with_location(&e.institution, &e.location)),
                ];
                if let Some(gpa) = non_blank_opt(&e.gpa) {
                    children.push(Node::text(
                        Role::Gpa,
                        Style::text(FACE, 13.0).color(GRAY_700),
                        format!("GPA: {gpa}"),
                    ));
                }
                if let Some(desc) = e.description.as_deref() {
                    children.extend(body_text(Role::Description, desc));
                }
                entry(Role::Entry(e.id.clone()), children)
            })
            .collect();
        section(SectionKind::Education, "Education", items)
    }

    fn skills(&self, groups: &[SkillGroup<'_>]) -> Node {
        let groups = groups
            .iter()
            .map(|group| {
                let mut children = vec![Node::text(
                    Role::Heading,
                    Style::text(FACE, 14.0).weight(Weight::Bold).color(GRAY_800),
                    format!("{}:", group.category.label()),
                )];
                children.extend(group.skills.iter().map(|skill| {
                    Node::flow(
                        Role::Entry(skill.id.clone()),
                        Style::default().gap(6.0).padding(Insets::left(12.0)),
                        vec![
                            Node::text(Role::Marker, Style::text(FACE, 13.0).color(GRAY_600), "•"),
                            Node::text(Role::Title, Style::text(FACE, 13.0).color(GRAY_800), &skill.name),
                            Node::text(
                                Role::Level,
                                Style::text(FACE, 12.0).italic().color(GRAY_500),
                                format!("({})", skill.level.label()),
                            ),
                        ],
                    )
                }));
                Node::stack(Role::SkillGroup(group.category), Style::default().gap(3.0), children)
            })
            .collect();
        section(SectionKind::Skills, "Skills & Competencies", groups)
    }

    fn projects(&self, entries: &[Project]) -> Node {
        let items = entries
            .iter()
            .map(|p| {
                let range = plain_dates(&p.start_date, &p.end_date, self.months());
                let mut children = vec![title_row(&p.name, dates_node(&range, dates_style()))];
                children.extend(body_text(Role::Description, &p.description));
                if let Some(techs) = join_labels(&p.technologies, ", ") {
                    children.push(Node::text(
                        Role::Technologies,
                        Style::text(FACE, 13.0).italic().color(GRAY_700),
                        format!("Technologies: {techs}"),
                    ));
                }
                if let Some(link) = non_blank_opt(&p.link) {
                    children.push(Node::text(
                        Role::Link,
                        Style::text(FACE, 13.0).color(GRAY_700),
                        format!("Link: {link}"),
                    ));
                }
                entry(Role::Entry(p.id.clone()), children)
            })
            .collect();
        section(SectionKind::Projects, "Notable Projects", items)
    }
}
