//! Greedy word wrap.
//!
//! Words are placed on the current line until the next one (plus its leading
//! space) would exceed the available width. A word wider than the whole line
//! still gets a line of its own and overflows it.

use crate::layout::font_metrics::{FontMetrics, Weight};

/// Horizontal extent of one word on a line, relative to the line start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordRun {
    pub x: f32,
    pub width: f32,
}

/// One printed line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineRun {
    pub width: f32,
    pub words: Vec<WordRun>,
}

/// Text measuring parameters.
#[derive(Clone, Copy)]
pub struct TextMeasure<'a> {
    pub metrics: &'a FontMetrics,
    pub size_px: f32,
    pub weight: Weight,
}

impl TextMeasure<'_> {
    pub fn width(&self, s: &str) -> f32 {
        self.metrics.measure(s, self.size_px, self.weight)
    }
}

/// Wraps `text` into lines no wider than `max_width`.
///
/// With `preserve_breaks`, every embedded `\n` starts a new line and blank
/// paragraphs keep an empty line. Otherwise all whitespace collapses. Empty
/// text yields no lines.
pub fn wrap_text(text: &str, measure: TextMeasure<'_>, max_width: f32, preserve_breaks: bool) -> Vec<LineRun> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    if !preserve_breaks {
        return wrap_paragraph(text, measure, max_width);
    }

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let wrapped = wrap_paragraph(paragraph, measure, max_width);
        if wrapped.is_empty() {
            lines.push(LineRun::default());
        } else {
            lines.extend(wrapped);
        }
    }
    lines
}

fn wrap_paragraph(text: &str, measure: TextMeasure<'_>, max_width: f32) -> Vec<LineRun> {
    let space_w = measure.metrics.space(measure.size_px, measure.weight);
    let mut lines: Vec<LineRun> = Vec::new();
    let mut current = LineRun::default();

    for word in text.split_whitespace() {
        let word_w = measure.width(word);
        if current.words.is_empty() {
            current.words.push(WordRun { x: 0.0, width: word_w });
            current.width = word_w;
        } else if current.width + space_w + word_w > max_width {
            // Line is full; the word opens the next one.
            lines.push(std::mem::take(&mut current));
            current.words.push(WordRun { x: 0.0, width: word_w });
            current.width = word_w;
        } else {
            let x = current.width + space_w;
            current.words.push(WordRun { x, width: word_w });
            current.width = x + word_w;
        }
    }

    if !current.words.is_empty() {
        lines.push(current);
    }
    lines
}

/// Width of the widest paragraph of `text` when nothing wraps.
pub fn natural_width(text: &str, measure: TextMeasure<'_>, preserve_breaks: bool) -> f32 {
    if preserve_breaks {
        text.lines()
            .map(|line| collapsed_width(line, measure))
            .fold(0.0, f32::max)
    } else {
        collapsed_width(text, measure)
    }
}

fn collapsed_width(text: &str, measure: TextMeasure<'_>) -> f32 {
    let space_w = measure.metrics.space(measure.size_px, measure.weight);
    let mut width = 0.0;
    for (i, word) in text.split_whitespace().enumerate() {
        if i > 0 {
            width += space_w;
        }
        width += measure.width(word);
    }
    width
}
