//! Static font metrics for the three template typefaces.
//!
//! Widths are in em units and grouped by character class rather than per glyph.
//! This is an approximation of real glyph advances, but close enough to decide
//! where lines break and how tall a rendered CV becomes, which is all the
//! rasterizer needs. Non-ASCII characters (accents, symbols, emoji) use a
//! per-face fallback width.

use serde::{Deserialize, Serialize};

/// Typefaces used by the templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Typeface {
    /// Modern template: humanist sans-serif.
    #[default]
    Sans,
    /// Classic template: old-style serif, noticeably narrower.
    Serif,
    /// Minimal template: light geometric sans.
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weight {
    Light,
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
}

impl Weight {
    /// Advance-width multiplier relative to the regular cut.
    fn width_factor(self) -> f32 {
        match self {
            Weight::Light => 0.97,
            Weight::Regular => 1.0,
            Weight::Medium => 1.02,
            Weight::Semibold => 1.04,
            Weight::Bold => 1.06,
        }
    }
}

/// Character-class width table for one typeface, in em.
pub struct FontMetrics {
    pub typeface: Typeface,
    /// i j l I ! . , : ; ' | and friends.
    narrow: f32,
    /// Remaining lowercase letters and ASCII punctuation.
    regular: f32,
    /// m w M W @ %.
    wide: f32,
    upper: f32,
    digit: f32,
    pub space_width: f32,
    /// Fallback for codepoints above 0x7E.
    pub average_char_width: f32,
    /// Height of lowercase letters relative to the font size; used for glyph runs.
    pub x_height: f32,
}

impl FontMetrics {
    /// Width of a single character in em at regular weight.
    pub fn char_width(&self, c: char) -> f32 {
        match c {
            ' ' => self.space_width,
            'i' | 'j' | 'l' | 'I' | '!' | '.' | ',' | ':' | ';' | '\'' | '|' | '`' | 't' | 'f'
            | 'r' => self.narrow,
            'm' | 'w' | 'M' | 'W' | '@' | '%' => self.wide,
            'A'..='Z' => self.upper,
            '0'..='9' => self.digit,
            c if c.is_ascii_graphic() => self.regular,
            _ => self.average_char_width,
        }
    }

    /// Rendered width of `s` in pixels at the given size and weight.
    pub fn measure(&self, s: &str, size_px: f32, weight: Weight) -> f32 {
        let em: f32 = s.chars().map(|c| self.char_width(c)).sum();
        em * size_px * weight.width_factor()
    }

    pub fn space(&self, size_px: f32, weight: Weight) -> f32 {
        self.space_width * size_px * weight.width_factor()
    }
}

static SANS: FontMetrics = FontMetrics {
    typeface: Typeface::Sans,
    narrow: 0.27,
    regular: 0.55,
    wide: 0.83,
    upper: 0.66,
    digit: 0.56,
    space_width: 0.25,
    average_char_width: 0.60,
    x_height: 0.53,
};

static SERIF: FontMetrics = FontMetrics {
    typeface: Typeface::Serif,
    narrow: 0.24,
    regular: 0.47,
    wide: 0.72,
    upper: 0.60,
    digit: 0.48,
    space_width: 0.22,
    average_char_width: 0.52,
    x_height: 0.45,
};

static LIGHT: FontMetrics = FontMetrics {
    typeface: Typeface::Light,
    narrow: 0.24,
    regular: 0.52,
    wide: 0.80,
    upper: 0.62,
    digit: 0.54,
    space_width: 0.26,
    average_char_width: 0.58,
    x_height: 0.50,
};

/// Returns the metric table for `typeface`.
pub fn get_metrics(typeface: Typeface) -> &'static FontMetrics {
    match typeface {
        Typeface::Sans => &SANS,
        Typeface::Serif => &SERIF,
        Typeface::Light => &LIGHT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_has_zero_width() {
        assert_eq!(get_metrics(Typeface::Sans).measure("", 14.0, Weight::Regular), 0.0);
    }

    #[test]
    fn test_width_scales_with_size() {
        let m = get_metrics(Typeface::Sans);
        let small = m.measure("Experience", 10.0, Weight::Regular);
        let large = m.measure("Experience", 20.0, Weight::Regular);
        assert!((large - 2.0 * small).abs() < 1e-3);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let m = get_metrics(Typeface::Serif);
        assert!(m.measure("Jane Doe", 16.0, Weight::Bold) > m.measure("Jane Doe", 16.0, Weight::Regular));
    }

    #[test]
    fn test_wide_glyphs_wider_than_narrow() {
        let m = get_metrics(Typeface::Light);
        assert!(m.char_width('m') > m.char_width('i'));
        assert!(m.char_width('W') > m.char_width('I'));
    }

    #[test]
    fn test_serif_narrower_than_sans() {
        let text = "Senior Software Engineer";
        let sans = get_metrics(Typeface::Sans).measure(text, 14.0, Weight::Regular);
        let serif = get_metrics(Typeface::Serif).measure(text, 14.0, Weight::Regular);
        assert!(serif < sans);
    }

    #[test]
    fn test_non_ascii_uses_fallback() {
        let m = get_metrics(Typeface::Sans);
        assert_eq!(m.char_width('é'), m.average_char_width);
        assert_eq!(m.char_width('•'), m.average_char_width);
    }
}
