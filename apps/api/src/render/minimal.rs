//! Minimal: light type, small-caps headings, left-ruled entries.

use crate::layout::font_metrics::{Typeface, Weight};
use crate::models::{Education, Experience, Project};
use crate::render::format::{join_labels, non_blank, non_blank_opt, with_location, MonthStyle};
use crate::render::palette::*;
use crate::render::select::{ContactItem, SkillGroup};
use crate::render::tree::{Insets, Node, Paint, Role, SectionKind, Side, Style};
use crate::render::{dates_node, experience_dates, plain_dates, Theme};

const FACE: Typeface = Typeface::Light;

pub(crate) struct Minimal;

fn section(kind: SectionKind, heading: Option<&str>, body: Vec<Node>) -> Node {
    let mut children: Vec<Node> = heading
        .map(|h| {
            Node::text(
                Role::Heading,
                Style::text(FACE, 12.0)
                    .weight(Weight::Medium)
                    .uppercase()
                    .color(GRAY_500),
                h,
            )
        })
        .into_iter()
        .collect();
    children.extend(body);
    Node::stack(
        Role::Section(kind),
        Style::default().gap(14.0).margin_bottom(32.0),
        children,
    )
}

fn entry(role: Role, children: Vec<Node>) -> Node {
    Node::stack(
        role,
        Style::default()
            .border(Side::Left, 2.0, GRAY_200)
            .padding(Insets::left(14.0))
            .gap(3.0),
        children,
    )
}

fn title(text: &str) -> Node {
    Node::text(
        Role::Title,
        Style::text(FACE, 16.0).weight(Weight::Medium).color(GRAY_900),
        text,
    )
}

fn dates_style() -> Style {
    Style::text(FACE, 12.0).color(GRAY_400)
}

fn subtitle(text: String) -> Node {
    Node::text(Role::Subtitle, Style::text(FACE, 14.0).color(GRAY_600), text)
}

fn description(text: &str) -> Option<Node> {
    non_blank(text).map(|_| {
        Node::text(
            Role::Description,
            Style::text(FACE, 13.0).color(GRAY_700).pre_line(),
            text,
        )
    })
}

impl Theme for Minimal {
    fn months(&self) -> MonthStyle {
        MonthStyle::Short
    }

    fn document(&self, children: Vec<Node>) -> Node {
        Node::stack(
            Role::Document,
            Style::default()
                .background(Paint::Solid { color: WHITE })
                .padding(Insets::xy(56.0, 48.0)),
            children,
        )
    }

    fn header(&self, name: &str, contacts: &[ContactItem<'_>]) -> Node {
        let mut children = vec![Node::text(
            Role::Name,
            Style::text(FACE, 36.0).weight(Weight::Light).color(GRAY_900),
            name,
        )];
        if !contacts.is_empty() {
            let items = contacts
                .iter()
                .map(|item| Node::text(Role::ContactItem, Style::text(FACE, 13.0).color(GRAY_500), item.value))
                .collect();
            children.push(Node::flow(Role::Contact, Style::default().gap(16.0), items));
        }
        Node::stack(
            Role::Header,
            Style::default().gap(10.0).margin_bottom(40.0),
            children,
        )
    }

    fn summary(&self, text: &str) -> Node {
        section(
            SectionKind::Summary,
            None,
            vec![Node::text(
                Role::Summary,
                Style::text(FACE, 15.0).color(GRAY_700).pre_line(),
                text,
            )],
        )
    }

    fn experience(&self, entries: &[Experience]) -> Node {
        let items = entries
            .iter()
            .map(|e| {
                let mut children = vec![title(&e.job_title), subtitle(with_location(&e.company, &e.location))];
                children.extend(dates_node(&experience_dates(e, self.months()), dates_style()));
                children.extend(description(&e.description));
                entry(Role::Entry(e.id.clone()), children)
            })
            .collect();
        section(SectionKind::Experience, Some("Experience"), items)
    }

    fn education(&self, entries: &[Education]) -> Node {
        let items = entries
            .iter()
            .map(|e| {
                let range = plain_dates(&e.start_date, &e.end_date, self.months());
                let mut children = vec![title(&e.degree), subtitle(with_location(&e.institution, &e.location))];
                children.extend(dates_node(&range, dates_style()));
                if let Some(gpa) = non_blank_opt(&e.gpa) {
                    children.push(Node::text(
                        Role::Gpa,
                        Style::text(FACE, 12.0).color(GRAY_500),
                        format!("GPA: {gpa}"),
                    ));
                }
                if let Some(desc) = e.description.as_deref() {
                    children.extend(description(desc));
                }
                entry(Role::Entry(e.id.clone()), children)
            })
            .collect();
        section(SectionKind::Education, Some("Education"), items)
    }

    fn skills(&self, groups: &[SkillGroup<'_>]) -> Node {
        let groups = groups
            .iter()
            .map(|group| {
                let label = Node::text(
                    Role::Heading,
                    Style::text(FACE, 13.0).weight(Weight::Medium).color(GRAY_600),
                    group.category.label(),
                );
                let items = group
                    .skills
                    .iter()
                    .map(|skill| {
                        Node::flow(
                            Role::Entry(skill.id.clone()),
                            Style::default().gap(4.0),
                            vec![
                                Node::text(Role::Title, Style::text(FACE, 13.0).color(GRAY_800), &skill.name),
                                Node::text(
                                    Role::Level,
                                    Style::text(FACE, 11.0).color(GRAY_400),
                                    skill.level.label(),
                                ),
                            ],
                        )
                    })
                    .collect();
                Node::stack(
                    Role::SkillGroup(group.category),
                    Style::default().gap(6.0),
                    vec![label, Node::flow(Role::Group, Style::default().gap(14.0), items)],
                )
            })
            .collect();
        section(SectionKind::Skills, Some("Skills"), groups)
    }

    fn projects(&self, entries: &[Project]) -> Node {
        let items = entries
            .iter()
            .map(|p| {
                let range = plain_dates(&p.start_date, &p.end_date, self.months());
                let mut children = vec![title(&p.name)];
                children.extend(dates_node(&range, dates_style()));
                children.extend(description(&p.description));
                if let Some(techs) = join_labels(&p.technologies, " • ") {
                    children.push(Node::text(
                        Role::Technologies,
                        Style::text(FACE, 12.0).color(GRAY_500),
                        techs,
                    ));
                }
                if let Some(link) = non_blank_opt(&p.link) {
                    children.push(Node::text(Role::Link, Style::text(FACE, 12.0).color(GRAY_600), link));
                }
                entry(Role::Entry(p.id.clone()), children)
            })
            .collect();
        section(SectionKind::Projects, Some("Projects"), items)
    }
}
