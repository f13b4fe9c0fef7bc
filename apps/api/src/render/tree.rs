//! Visual tree produced by the template renderer.
//!
//! A tree describes what to display and how it is styled, independent of final
//! pixel layout. Every node carries a `Role` naming the piece of the record it
//! shows, so clients and tests can query a tree without knowing which template
//! produced it.

use serde::Serialize;

use crate::layout::font_metrics::{Typeface, Weight};
use crate::models::{EntryId, SkillCategory};
use crate::render::TemplateId;

// ────────────────────────────────────────────────────────────────────────────
// Roles
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "key", rename_all = "snake_case")]
pub enum Role {
    Document,
    Header,
    Name,
    Contact,
    ContactItem,
    Section(SectionKind),
    Heading,
    Entry(EntryId),
    Title,
    Subtitle,
    Dates,
    Gpa,
    Description,
    Summary,
    SkillGroup(SkillCategory),
    Level,
    Technologies,
    Technology,
    Link,
    /// Decorative glyph such as a bullet.
    Marker,
    /// Structural wrapper with no meaning of its own.
    Group,
}

// ────────────────────────────────────────────────────────────────────────────
// Style
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Paint {
    Solid { color: Color },
    /// Left-to-right linear gradient.
    Gradient { from: Color, to: Color },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Bottom,
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Border {
    pub side: Side,
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    pub const fn all(v: f32) -> Self {
        Insets { top: v, right: v, bottom: v, left: v }
    }

    pub const fn xy(x: f32, y: f32) -> Self {
        Insets { top: y, right: x, bottom: y, left: x }
    }

    pub const fn left(v: f32) -> Self {
        Insets { top: 0.0, right: 0.0, bottom: 0.0, left: v }
    }

    pub const fn bottom(v: f32) -> Self {
        Insets { top: 0.0, right: 0.0, bottom: v, left: 0.0 }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Start,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Style {
    pub typeface: Typeface,
    pub size: f32,
    pub weight: Weight,
    pub italic: bool,
    pub uppercase: bool,
    pub color: Color,
    pub line_height: f32,
    /// Keep embedded line breaks instead of collapsing whitespace.
    pub pre_line: bool,
    pub align: Align,
    pub background: Option<Paint>,
    pub border: Option<Border>,
    pub padding: Insets,
    /// Space between children.
    pub gap: f32,
    pub margin_bottom: f32,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            typeface: Typeface::Sans,
            size: 14.0,
            weight: Weight::Regular,
            italic: false,
            uppercase: false,
            color: Color::rgb(17, 24, 39),
            line_height: 1.45,
            pre_line: false,
            align: Align::Start,
            background: None,
            border: None,
            padding: Insets::default(),
            gap: 0.0,
            margin_bottom: 0.0,
        }
    }
}

impl Style {
    pub fn text(typeface: Typeface, size: f32) -> Self {
        Style {
            typeface,
            size,
            ..Style::default()
        }
    }

    pub fn weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn uppercase(mut self) -> Self {
        self.uppercase = true;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn pre_line(mut self) -> Self {
        self.pre_line = true;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn background(mut self, paint: Paint) -> Self {
        self.background = Some(paint);
        self
    }

    pub fn border(mut self, side: Side, width: f32, color: Color) -> Self {
        self.border = Some(Border { side, width, color });
        self
    }

    pub fn padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    pub fn margin_bottom(mut self, margin: f32) -> Self {
        self.margin_bottom = margin;
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Nodes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layout {
    /// Children stacked vertically.
    #[default]
    Stack,
    /// First child takes the remaining width, the others sit at the right edge.
    Row,
    /// Children placed inline, wrapping onto new rows.
    Flow,
    Grid { columns: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub role: Role,
    pub layout: Layout,
    pub style: Style,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn text(role: Role, style: Style, content: impl Into<String>) -> Self {
        Node {
            role,
            layout: Layout::Stack,
            style,
            text: Some(content.into()),
            children: Vec::new(),
        }
    }

    pub fn container(role: Role, layout: Layout, style: Style, children: Vec<Node>) -> Self {
        Node {
            role,
            layout,
            style,
            text: None,
            children,
        }
    }

    pub fn stack(role: Role, style: Style, children: Vec<Node>) -> Self {
        Node::container(role, Layout::Stack, style, children)
    }

    pub fn row(role: Role, style: Style, children: Vec<Node>) -> Self {
        Node::container(role, Layout::Row, style, children)
    }

    pub fn flow(role: Role, style: Style, children: Vec<Node>) -> Self {
        Node::container(role, Layout::Flow, style, children)
    }

    pub fn grid(role: Role, style: Style, columns: u8, children: Vec<Node>) -> Self {
        Node::container(role, Layout::Grid { columns }, style, children)
    }

    /// This node and all of its descendants, depth first.
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            out.push(node);
            pending.extend(node.children.iter().rev());
        }
        out
    }

    /// First node (depth first, self included) with the given role.
    pub fn find(&self, role: &Role) -> Option<&Node> {
        self.descendants().into_iter().find(|n| &n.role == role)
    }

    pub fn find_all(&self, role: &Role) -> Vec<&Node> {
        self.descendants()
            .into_iter()
            .filter(|n| &n.role == role)
            .collect()
    }

    /// All text content below this node, joined with single spaces.
    pub fn plain_text(&self) -> String {
        self.descendants()
            .into_iter()
            .filter_map(|n| n.text.as_deref())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tree
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualTree {
    pub template: TemplateId,
    pub root: Node,
}

impl VisualTree {
    pub fn section(&self, kind: SectionKind) -> Option<&Node> {
        self.root.find(&Role::Section(kind))
    }

    /// Sections present in the tree, in display order.
    pub fn sections(&self) -> Vec<SectionKind> {
        self.root
            .descendants()
            .into_iter()
            .filter_map(|n| match n.role {
                Role::Section(kind) => Some(kind),
                _ => None,
            })
            .collect()
    }

    /// Entry ids rendered in a section, in display order.
    pub fn entry_ids(&self, kind: SectionKind) -> Vec<EntryId> {
        self.section(kind)
            .map(|section| {
                section
                    .descendants()
                    .into_iter()
                    .filter_map(|n| match &n.role {
                        Role::Entry(id) => Some(id.clone()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn entry(&self, id: &EntryId) -> Option<&Node> {
        self.root.find(&Role::Entry(id.clone()))
    }

    /// The date-range label rendered for an entry.
    pub fn dates_of(&self, id: &EntryId) -> Option<&str> {
        self.entry(id)?.find(&Role::Dates)?.text.as_deref()
    }

    /// Skill groups in display order with the names of their members.
    pub fn skill_groups(&self) -> Vec<(SkillCategory, Vec<String>)> {
        self.root
            .descendants()
            .into_iter()
            .filter_map(|n| match n.role {
                Role::SkillGroup(category) => Some((category, n)),
                _ => None,
            })
            .map(|(category, group)| {
                let names = group
                    .descendants()
                    .into_iter()
                    .filter(|n| matches!(n.role, Role::Entry(_)))
                    .filter_map(|item| item.find(&Role::Title)?.text.clone())
                    .collect();
                (category, names)
            })
            .collect()
    }

    /// Template-independent projection of what the tree selected: each section
    /// with the ids of its entries (skills in group order).
    pub fn selection(&self) -> Vec<(SectionKind, Vec<EntryId>)> {
        self.sections()
            .into_iter()
            .map(|kind| (kind, self.entry_ids(kind)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::stack(
            Role::Document,
            Style::default(),
            vec![
                Node::text(Role::Name, Style::default(), "Jane"),
                Node::stack(
                    Role::Section(SectionKind::Experience),
                    Style::default(),
                    vec![
                        Node::text(Role::Heading, Style::default(), "Experience"),
                        Node::stack(
                            Role::Entry(EntryId::from("a")),
                            Style::default(),
                            vec![Node::text(Role::Dates, Style::default(), "Jan 2020 - Present")],
                        ),
                    ],
                ),
            ],
        )
    }

    #[test]
    fn test_descendants_are_depth_first_in_order() {
        let root = sample();
        let roles: Vec<&Role> = root.descendants().iter().map(|n| &n.role).collect();
        assert_eq!(roles[0], &Role::Document);
        assert_eq!(roles[1], &Role::Name);
        assert_eq!(roles[2], &Role::Section(SectionKind::Experience));
        assert_eq!(roles[3], &Role::Heading);
    }

    #[test]
    fn test_queries() {
        let tree = VisualTree {
            template: TemplateId::Modern,
            root: sample(),
        };
        assert_eq!(tree.sections(), vec![SectionKind::Experience]);
        assert_eq!(tree.entry_ids(SectionKind::Experience), vec![EntryId::from("a")]);
        assert_eq!(tree.dates_of(&EntryId::from("a")), Some("Jan 2020 - Present"));
        assert!(tree.section(SectionKind::Skills).is_none());
        assert_eq!(tree.root.plain_text(), "Jane Experience Jan 2020 - Present");
    }

    #[test]
    fn test_style_builder() {
        let style = Style::text(Typeface::Serif, 20.0)
            .weight(Weight::Bold)
            .uppercase()
            .border(Side::Bottom, 1.0, Color::rgb(0, 0, 0));
        assert_eq!(style.typeface, Typeface::Serif);
        assert_eq!(style.size, 20.0);
        assert!(style.uppercase);
        assert!(!style.italic);
        assert_eq!(style.border.map(|b| b.side), Some(Side::Bottom));
    }
}
