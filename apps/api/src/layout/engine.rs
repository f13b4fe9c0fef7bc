//! Box layout of a visual tree at a fixed width.
//!
//! The result is a flat list of paint operations in document coordinates
//! (pixels, origin top-left) plus the total content height. Text is laid out
//! with the static font metrics and emitted as one ink box per word, which is
//! what the rasterizer draws.

use serde::Serialize;

use crate::layout::font_metrics::get_metrics;
use crate::layout::wrap::{natural_width, wrap_text, TextMeasure};
use crate::render::tree::{Align, Color, Layout, Node, Paint, Side};

/// Share of a row's width the trailing children may claim.
const ROW_TRAILING_MAX: f32 = 0.45;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PaintOp {
    /// Box background or border.
    Fill { rect: Rect, paint: Paint },
    /// One run of glyphs.
    Ink { rect: Rect, color: Color },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaidOut {
    pub height: f32,
    pub ops: Vec<PaintOp>,
}

/// Lays `root` out at `width` pixels.
pub fn layout_tree(root: &Node, width: f32) -> LaidOut {
    let mut ops = Vec::new();
    let height = place(root, 0.0, 0.0, width, &mut ops);
    LaidOut {
        height: height.ceil(),
        ops,
    }
}

/// Lays out `node` with its top-left corner at (`x`, `y`) and returns the
/// vertical space it consumes, bottom margin included.
fn place(node: &Node, x: f32, y: f32, width: f32, ops: &mut Vec<PaintOp>) -> f32 {
    let style = &node.style;
    let pad = style.padding;
    let inner_x = x + pad.left;
    let inner_y = y + pad.top;
    let inner_w = (width - pad.horizontal()).max(0.0);

    let mut inner = Vec::new();
    let content_h = match &node.text {
        Some(text) => place_text(node, text, inner_x, inner_y, inner_w, &mut inner),
        None => match node.layout {
            Layout::Stack => place_stack(node, inner_x, inner_y, inner_w, &mut inner),
            Layout::Row => place_row(node, inner_x, inner_y, inner_w, &mut inner),
            Layout::Flow => place_flow(node, inner_x, inner_y, inner_w, &mut inner),
            Layout::Grid { columns } => place_grid(node, columns, inner_x, inner_y, inner_w, &mut inner),
        },
    };

    let box_h = if content_h > 0.0 || !node.children.is_empty() || node.text.is_some() {
        content_h + pad.vertical()
    } else {
        0.0
    };

    if box_h > 0.0 {
        let rect = Rect { x, y, w: width, h: box_h };
        if let Some(paint) = style.background {
            ops.push(PaintOp::Fill { rect, paint });
        }
        if let Some(border) = style.border {
            let edge = match border.side {
                Side::Bottom => Rect {
                    x,
                    y: rect.bottom() - border.width,
                    w: width,
                    h: border.width,
                },
                Side::Left => Rect { x, y, w: border.width, h: box_h },
            };
            ops.push(PaintOp::Fill {
                rect: edge,
                paint: Paint::Solid { color: border.color },
            });
        }
    }
    ops.extend(inner);

    box_h + style.margin_bottom
}

fn measure_for(node: &Node) -> TextMeasure<'static> {
    TextMeasure {
        metrics: get_metrics(node.style.typeface),
        size_px: node.style.size,
        weight: node.style.weight,
    }
}

fn display_text(node: &Node, text: &str) -> String {
    if node.style.uppercase {
        text.to_uppercase()
    } else {
        text.to_string()
    }
}

fn place_text(node: &Node, text: &str, x: f32, y: f32, width: f32, ops: &mut Vec<PaintOp>) -> f32 {
    let style = &node.style;
    let measure = measure_for(node);
    let text = display_text(node, text);
    let lines = wrap_text(&text, measure, width, style.pre_line);

    let line_h = style.size * style.line_height;
    let ink_h = style.size * measure.metrics.x_height;
    let ink_offset = (line_h - ink_h) / 2.0;

    for (i, line) in lines.iter().enumerate() {
        let shift = match style.align {
            Align::Start => 0.0,
            Align::Center => ((width - line.width) / 2.0).max(0.0),
        };
        let top = y + i as f32 * line_h + ink_offset;
        for word in &line.words {
            ops.push(PaintOp::Ink {
                rect: Rect {
                    x: x + shift + word.x,
                    y: top,
                    w: word.width,
                    h: ink_h,
                },
                color: style.color,
            });
        }
    }
    lines.len() as f32 * line_h
}

fn place_stack(node: &Node, x: f32, y: f32, width: f32, ops: &mut Vec<PaintOp>) -> f32 {
    let mut cursor = 0.0;
    let mut placed = 0;
    for child in &node.children {
        let gap = if placed > 0 { node.style.gap } else { 0.0 };
        let h = place(child, x, y + cursor + gap, width, ops);
        if h > 0.0 {
            cursor += gap + h;
            placed += 1;
        }
    }
    cursor
}

fn place_row(node: &Node, x: f32, y: f32, width: f32, ops: &mut Vec<PaintOp>) -> f32 {
    let Some((lead, trailing)) = node.children.split_first() else {
        return 0.0;
    };
    let gap = node.style.gap;
    let cap = width * ROW_TRAILING_MAX;

    let trailing_widths: Vec<f32> = trailing.iter().map(|c| intrinsic_width(c).min(cap)).collect();
    let trailing_total: f32 =
        trailing_widths.iter().sum::<f32>() + gap * trailing_widths.len() as f32;
    let lead_w = (width - trailing_total).max(0.0);

    let mut height = place(lead, x, y, lead_w, ops);
    let mut cursor = x + width;
    for (child, w) in trailing.iter().zip(&trailing_widths).rev() {
        cursor -= w;
        height = height.max(place(child, cursor, y, *w, ops));
        cursor -= gap;
    }
    height
}

fn place_flow(node: &Node, x: f32, y: f32, width: f32, ops: &mut Vec<PaintOp>) -> f32 {
    let gap = node.style.gap;

    // Group children into rows by their intrinsic widths.
    let mut rows: Vec<Vec<(&Node, f32)>> = Vec::new();
    let mut row_w = 0.0;
    for child in &node.children {
        let w = intrinsic_width(child).min(width);
        match rows.last_mut() {
            Some(row) if row_w + gap + w <= width => {
                row_w += gap + w;
                row.push((child, w));
            }
            _ => {
                rows.push(vec![(child, w)]);
                row_w = w;
            }
        }
    }

    let mut cursor_y = 0.0;
    for (i, row) in rows.iter().enumerate() {
        let used: f32 = row.iter().map(|(_, w)| w).sum::<f32>() + gap * (row.len() - 1) as f32;
        let mut cursor_x = x + match node.style.align {
            Align::Start => 0.0,
            Align::Center => ((width - used) / 2.0).max(0.0),
        };
        if i > 0 {
            cursor_y += gap;
        }
        let mut row_h: f32 = 0.0;
        for (child, w) in row {
            row_h = row_h.max(place(child, cursor_x, y + cursor_y, *w, ops));
            cursor_x += w + gap;
        }
        cursor_y += row_h;
    }
    cursor_y
}

fn place_grid(node: &Node, columns: u8, x: f32, y: f32, width: f32, ops: &mut Vec<PaintOp>) -> f32 {
    let columns = usize::from(columns.max(1));
    let gap = node.style.gap;
    let col_w = ((width - gap * (columns - 1) as f32) / columns as f32).max(0.0);

    let mut cursor_y = 0.0;
    for (i, row) in node.children.chunks(columns).enumerate() {
        if i > 0 {
            cursor_y += gap;
        }
        let mut row_h: f32 = 0.0;
        for (col, child) in row.iter().enumerate() {
            let cx = x + col as f32 * (col_w + gap);
            row_h = row_h.max(place(child, cx, y + cursor_y, col_w, ops));
        }
        cursor_y += row_h;
    }
    cursor_y
}

/// Width a node would take if nothing wrapped.
fn intrinsic_width(node: &Node) -> f32 {
    let style = &node.style;
    let content = match &node.text {
        Some(text) => natural_width(&display_text(node, text), measure_for(node), style.pre_line),
        None => {
            let widths = node.children.iter().map(intrinsic_width);
            match node.layout {
                Layout::Stack => widths.fold(0.0, f32::max),
                Layout::Row | Layout::Flow => {
                    let n = node.children.len();
                    widths.sum::<f32>() + style.gap * n.saturating_sub(1) as f32
                }
                Layout::Grid { columns } => {
                    let columns = f32::from(columns.max(1));
                    widths.fold(0.0, f32::max) * columns + style.gap * (columns - 1.0)
                }
            }
        }
    };
    // Rounding up avoids a sub-pixel shortfall wrapping the last word.
    (content + style.padding.horizontal()).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::Typeface;
    use crate::render::tree::{Insets, Role, Style};

    fn para(text: &str) -> Node {
        Node::text(Role::Description, Style::text(Typeface::Sans, 14.0), text)
    }

    fn inks(laid: &LaidOut) -> Vec<Rect> {
        laid.ops
            .iter()
            .filter_map(|op| match op {
                PaintOp::Ink { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_empty_tree_has_no_height() {
        let root = Node::stack(Role::Document, Style::default(), vec![]);
        let laid = layout_tree(&root, 800.0);
        assert_eq!(laid.height, 0.0);
        assert!(laid.ops.is_empty());
    }

    #[test]
    fn test_stack_height_grows_with_children() {
        let one = Node::stack(Role::Document, Style::default().gap(8.0), vec![para("One line")]);
        let two = Node::stack(
            Role::Document,
            Style::default().gap(8.0),
            vec![para("One line"), para("Another line")],
        );
        let h1 = layout_tree(&one, 800.0).height;
        let h2 = layout_tree(&two, 800.0).height;
        assert!(h2 > h1 + 8.0);
    }

    #[test]
    fn test_narrow_width_wraps_taller() {
        let root = Node::stack(Role::Document, Style::default(), vec![para(&"lorem ipsum ".repeat(40))]);
        let wide = layout_tree(&root, 800.0);
        let narrow = layout_tree(&root, 300.0);
        assert!(narrow.height > wide.height);
        for rect in inks(&narrow) {
            assert!(rect.right() <= 300.0 + 1e-3, "{rect:?}");
        }
    }

    #[test]
    fn test_background_painted_before_content() {
        let root = Node::stack(
            Role::Document,
            Style::default()
                .background(Paint::Solid { color: Color::rgb(1, 2, 3) })
                .padding(Insets::all(10.0)),
            vec![para("Hello world")],
        );
        let laid = layout_tree(&root, 400.0);
        match &laid.ops[0] {
            PaintOp::Fill { rect, .. } => {
                assert_eq!(rect.w, 400.0);
                assert!((rect.h - laid.height).abs() <= 1.0);
            }
            other => panic!("expected background first, got {other:?}"),
        }
        let first_ink = inks(&laid)[0];
        assert!(first_ink.x >= 10.0);
    }

    #[test]
    fn test_row_pins_trailing_child_right() {
        let row = Node::row(
            Role::Group,
            Style::default(),
            vec![para("Senior Engineer"), para("Jan 2020 - Present")],
        );
        let laid = layout_tree(&row, 600.0);
        let rightmost = inks(&laid).iter().map(|r| r.right()).fold(0.0, f32::max);
        assert!(rightmost > 590.0 && rightmost <= 600.0 + 1e-3, "{rightmost}");
    }

    #[test]
    fn test_centered_text_is_centered() {
        let node = Node::text(
            Role::Name,
            Style::text(Typeface::Serif, 20.0).align(Align::Center),
            "Jane",
        );
        let laid = layout_tree(&node, 400.0);
        let ink = inks(&laid)[0];
        let left = ink.x;
        let right = 400.0 - ink.right();
        assert!((left - right).abs() < 1.0);
    }

    #[test]
    fn test_grid_places_columns_side_by_side() {
        let grid = Node::grid(Role::Group, Style::default().gap(10.0), 2, vec![para("left"), para("right")]);
        let laid = layout_tree(&grid, 410.0);
        let rects = inks(&laid);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].y, rects[1].y);
        assert!((rects[1].x - 210.0).abs() < 1e-3);
    }

    #[test]
    fn test_preserved_breaks_add_lines() {
        let mut node = para("first\nsecond");
        let collapsed = layout_tree(&node, 800.0).height;
        node.style = node.style.pre_line();
        let kept = layout_tree(&node, 800.0).height;
        assert!(kept > collapsed);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let root = Node::flow(
            Role::Technologies,
            Style::default().gap(6.0),
            vec![para("Rust"), para("Tokio"), para("axum")],
        );
        assert_eq!(layout_tree(&root, 120.0), layout_tree(&root, 120.0));
    }
}
