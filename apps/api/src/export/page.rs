//! Page formats and bitmap placement.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// PostScript points per millimetre.
const PT_PER_MM: f32 = 72.0 / 25.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    #[default]
    A4,
    Letter,
}

impl PageFormat {
    /// Page width and height in points, portrait.
    pub fn size_pt(self) -> (f32, f32) {
        match self {
            PageFormat::A4 => (210.0 * PT_PER_MM, 297.0 * PT_PER_MM),
            PageFormat::Letter => (612.0, 792.0),
        }
    }
}

impl fmt::Display for PageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PageFormat::A4 => "a4",
            PageFormat::Letter => "letter",
        })
    }
}

#[derive(Debug, Error)]
#[error("unknown page format '{0}' (expected 'a4' or 'letter')")]
pub struct UnknownPageFormat(String);

impl FromStr for PageFormat {
    type Err = UnknownPageFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(PageFormat::A4),
            "letter" => Ok(PageFormat::Letter),
            _ => Err(UnknownPageFormat(s.to_string())),
        }
    }
}

/// Where a bitmap lands on the page, in points from the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Uniformly scales a `px_w` x `px_h` bitmap to fit the page, centred
/// horizontally and aligned to the top edge.
///
/// Content taller than the page is shrunk rather than split; there is no
/// pagination.
pub fn fit_to_page(px_w: u32, px_h: u32, page: PageFormat) -> Placement {
    let (page_w, page_h) = page.size_pt();
    let (img_w, img_h) = (px_w.max(1) as f32, px_h.max(1) as f32);
    let ratio = (page_w / img_w).min(page_h / img_h);
    let width = img_w * ratio;
    let height = img_h * ratio;
    Placement {
        x: (page_w - width) / 2.0,
        y: page_h - height,
        width,
        height,
    }
}
