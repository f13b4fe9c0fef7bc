// Export pipeline: visual tree -> off-screen copy -> bitmap -> one-page PDF.
// Rasterization runs on the blocking pool; everything else is synchronous.

pub mod document;
pub mod handlers;
pub mod page;
pub mod pipeline;
pub mod raster;
pub mod surface;

use thiserror::Error;

pub use page::PageFormat;
pub use pipeline::ExportPipeline;

/// Failure of any export step. Surfaced to clients as one generic notice.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No rendered preview to export")]
    MissingSource,

    #[error("Rasterization failed: {0}")]
    Rasterize(String),

    #[error("Document composition failed: {0}")]
    Compose(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportSettings {
    /// Width of the detached copy, independent of any client viewport.
    pub reference_width_px: u32,
    /// Device pixels per layout pixel.
    pub upscale: f32,
    pub page: PageFormat,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            reference_width_px: 800,
            upscale: 2.0,
            page: PageFormat::A4,
        }
    }
}
