//! Modern: gradient header, card entries, chip-style technologies.

use crate::layout::font_metrics::{Typeface, Weight};
use crate::models::{Education, Experience, Project};
use crate::render::format::{non_blank, non_blank_opt, with_location, MonthStyle};
use crate::render::palette::*;
use crate::render::select::{ContactItem, ContactKind, SkillGroup};
use crate::render::tree::{Insets, Node, Paint, Role, SectionKind, Side, Style};
use crate::render::{dates_node, experience_dates, plain_dates, Theme};

const FACE: Typeface = Typeface::Sans;

pub(crate) struct Modern;

fn icon(kind: ContactKind) -> &'static str {
    match kind {
        ContactKind::Email => "✉",
        ContactKind::Phone => "☎",
        ContactKind::Location => "⌂",
        ContactKind::Profile => "in",
        ContactKind::Portfolio => "🔗",
    }
}

fn section(kind: SectionKind, heading: &str, body: Vec<Node>) -> Node {
    let mut children = vec![Node::text(
        Role::Heading,
        Style::text(FACE, 20.0)
            .weight(Weight::Bold)
            .color(BLUE_600)
            .border(Side::Bottom, 2.0, BLUE_100)
            .padding(Insets::bottom(6.0)),
        heading,
    )];
    children.extend(body);
    Node::stack(
        Role::Section(kind),
        Style::default().gap(12.0).margin_bottom(24.0),
        children,
    )
}

fn card(role: Role, children: Vec<Node>) -> Node {
    Node::stack(
        role,
        Style::default()
            .background(Paint::Solid { color: GRAY_50 })
            .padding(Insets::all(14.0))
            .gap(4.0),
        children,
    )
}

fn title_row(title: &str, dates: Option<Node>) -> Node {
    let mut children = vec![Node::text(
        Role::Title,
        Style::text(FACE, 16.0).weight(Weight::Semibold).color(GRAY_900),
        title,
    )];
    children.extend(dates);
    Node::row(Role::Group, Style::default().gap(12.0), children)
}

fn dates_style() -> Style {
    Style::text(FACE, 12.0).color(GRAY_500)
}

fn subtitle(text: String) -> Node {
    Node::text(
        Role::Subtitle,
        Style::text(FACE, 14.0).weight(Weight::Medium).color(BLUE_600),
        text,
    )
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

impl Theme for Modern {
    fn months(&self) -> MonthStyle {
        MonthStyle::Short
    }

    fn document(&self, children: Vec<Node>) -> Node {
        // The header spans the full width; everything after it is inset.
        let mut children = children.into_iter();
        let header = children.next();
        let body = Node::stack(
            Role::Group,
            Style::default().padding(Insets::xy(40.0, 32.0)),
            children.collect(),
        );
        Node::stack(
            Role::Document,
            Style::default().background(Paint::Solid { color: WHITE }),
            header.into_iter().chain(std::iter::once(body)).collect(),
        )
    }

    fn header(&self, name: &str, contacts: &[ContactItem<'_>]) -> Node {
        let mut children = vec![Node::text(
            Role::Name,
            Style::text(FACE, 34.0).weight(Weight::Bold).color(WHITE),
            name,
        )];
        if !contacts.is_empty() {
            let items = contacts
                .iter()
                .map(|item| {
                    Node::flow(
                        Role::ContactItem,
                        Style::default().gap(6.0),
                        vec![
                            Node::text(Role::Marker, Style::text(FACE, 13.0).color(WHITE), icon(item.kind)),
                            Node::text(Role::Group, Style::text(FACE, 13.0).color(WHITE), item.value),
                        ],
                    )
                })
                .collect();
            children.push(Node::grid(Role::Contact, Style::default().gap(6.0), 2, items));
        }
        Node::stack(
            Role::Header,
            Style::default()
                .background(Paint::Gradient { from: BLUE_600, to: PURPLE_600 })
                .padding(Insets::xy(40.0, 32.0))
                .gap(14.0),
            children,
        )
    }

    fn summary(&self, text: &str) -> Node {
        section(
            SectionKind::Summary,
            "Professional Summary",
            vec![Node::text(
                Role::Summary,
                Style::text(FACE, 14.0).color(GRAY_700).pre_line(),
                text,
            )],
        )
    }

    fn experience(&self, entries: &[Experience]) -> Node {
        let cards = entries
            .iter()
            .map(|e| {
                let dates = dates_node(&experience_dates(e, self.months()), dates_style());
                let mut children = vec![
                    title_row(&e.job_title, dates),
                    subtitle(with_location(&e.company, &e.location)),
                ];
                children.extend(description(&e.description));
                card(Role::Entry(e.id.clone()), children)
            })
            .collect();
        section(SectionKind::Experience, "Work Experience", cards)
    }

    fn education(&self, entries: &[Education]) -> Node {
        let cards = entries
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
                        Style::text(FACE, 13.0).color(GRAY_600),
                        format!("GPA: {gpa}"),
                    ));
                }
                if let Some(desc) = e.description.as_deref() {
                    children.extend(description(desc));
                }
                card(Role::Entry(e.id.clone()), children)
            })
            .collect();
        section(SectionKind::Education, "Education", cards)
    }

    fn skills(&self, groups: &[SkillGroup<'_>]) -> Node {
        let groups = groups
            .iter()
            .map(|group| {
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
                                    Style::text(FACE, 12.0).color(GRAY_500),
                                    format!("({})", skill.level.label()),
                                ),
                            ],
                        )
                    })
                    .collect::<Vec<_>>();
                let mut children = vec![Node::text(
                    Role::Heading,
                    Style::text(FACE, 15.0).weight(Weight::Semibold).color(GRAY_800),
                    group.category.label(),
                )];
                children.push(Node::stack(Role::Group, Style::default().gap(4.0), items));
                card(Role::SkillGroup(group.category), children)
            })
            .collect();
        section(
            SectionKind::Skills,
            "Skills",
            vec![Node::grid(Role::Group, Style::default().gap(12.0), 2, groups)],
        )
    }

    fn projects(&self, entries: &[Project]) -> Node {
        let cards = entries
            .iter()
            .map(|p| {
                let range = plain_dates(&p.start_date, &p.end_date, self.months());
                let mut children = vec![title_row(&p.name, dates_node(&range, dates_style()))];
                children.extend(description(&p.description));
                if !p.technologies.is_empty() {
                    let chips = p
                        .technologies
                        .iter()
                        .map(|tech| {
                            Node::text(
                                Role::Technology,
                                Style::text(FACE, 12.0)
                                    .weight(Weight::Medium)
                                    .color(BLUE_800)
                                    .background(Paint::Solid { color: BLUE_TINT })
                                    .padding(Insets::xy(8.0, 2.0)),
                                tech,
                            )
                        })
                        .collect();
                    children.push(Node::flow(Role::Technologies, Style::default().gap(6.0), chips));
                }
                if let Some(link) = non_blank_opt(&p.link) {
                    children.push(Node::text(
                        Role::Link,
                        Style::text(FACE, 12.0).color(BLUE_600),
                        format!("🔗 {link}"),
                    ));
                }
                card(Role::Entry(p.id.clone()), children)
            })
            .collect();
        section(SectionKind::Projects, "Projects", cards)
    }
}
