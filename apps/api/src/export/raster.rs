//! Rasterization of a detached tree into an opaque RGB bitmap.

use std::io::Cursor;

use async_trait::async_trait;
use image::{ImageFormat, Rgb, RgbImage};
use tracing::debug;

use crate::export::surface::DetachedView;
use crate::export::ExportError;
use crate::layout::{layout_tree, PaintOp, Rect};
use crate::render::tree::{Color, Paint};
use crate::render::Node;

/// Largest bitmap the default rasterizer will allocate, in pixels.
pub const DEFAULT_MAX_PIXELS: u64 = 40_000_000;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// An opaque bitmap. The format has no alpha channel; translucent paint has
/// already been composited over white.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pub image: RgbImage,
}

impl Bitmap {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn to_png(&self) -> Result<Vec<u8>, ExportError> {
        let mut buf = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| ExportError::Rasterize(format!("PNG encoding failed: {e}")))?;
        Ok(buf.into_inner())
    }
}

/// Turns a detached copy into pixels at `upscale` device pixels per layout pixel.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, view: &DetachedView, upscale: f32) -> Result<Bitmap, ExportError>;
}

/// Lays the tree out with the static font metrics and paints backgrounds,
/// borders and glyph runs as filled boxes.
#[derive(Debug, Clone)]
pub struct MetricRasterizer {
    pub max_pixels: u64,
}

impl Default for MetricRasterizer {
    fn default() -> Self {
        MetricRasterizer {
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }
}

#[async_trait]
impl Rasterizer for MetricRasterizer {
    async fn rasterize(&self, view: &DetachedView, upscale: f32) -> Result<Bitmap, ExportError> {
        let root = view.tree.root.clone();
        let width_px = view.width_px;
        let max_pixels = self.max_pixels;

        tokio::task::spawn_blocking(move || paint_tree(&root, width_px, upscale, max_pixels))
            .await
            .map_err(|e| ExportError::Rasterize(format!("rasterizer task failed: {e}")))?
    }
}

fn paint_tree(root: &Node, width_px: u32, upscale: f32, max_pixels: u64) -> Result<Bitmap, ExportError> {
    if !upscale.is_finite() || upscale <= 0.0 {
        return Err(ExportError::Rasterize(format!("invalid upscale factor {upscale}")));
    }
    if width_px == 0 {
        return Err(ExportError::Rasterize("reference width is zero".to_string()));
    }

    let laid = layout_tree(root, width_px as f32);
    let w = (width_px as f32 * upscale).round().max(1.0) as u32;
    let h = (laid.height * upscale).ceil().max(1.0) as u32;

    let pixels = u64::from(w) * u64::from(h);
    if pixels > max_pixels {
        return Err(ExportError::Rasterize(format!(
            "bitmap {w}x{h} exceeds the {max_pixels} pixel budget"
        )));
    }

    let mut image = RgbImage::from_pixel(w, h, WHITE);
    for op in &laid.ops {
        match op {
            PaintOp::Fill { rect, paint } => fill(&mut image, rect, paint, upscale),
            PaintOp::Ink { rect, color } => {
                fill(&mut image, rect, &Paint::Solid { color: *color }, upscale)
            }
        }
    }

    debug!(width = w, height = h, ops = laid.ops.len(), "Rasterized tree");
    Ok(Bitmap { image })
}

fn fill(image: &mut RgbImage, rect: &Rect, paint: &Paint, scale: f32) {
    let (w, h) = image.dimensions();
    let x0 = ((rect.x * scale).floor().max(0.0) as u32).min(w);
    let y0 = ((rect.y * scale).floor().max(0.0) as u32).min(h);
    let x1 = ((rect.right() * scale).ceil().max(0.0) as u32).min(w);
    let y1 = ((rect.bottom() * scale).ceil().max(0.0) as u32).min(h);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let span = (x1 - x0).max(1) as f32;
    for x in x0..x1 {
        let color = match paint {
            Paint::Solid { color } => *color,
            Paint::Gradient { from, to } => lerp(*from, *to, (x - x0) as f32 / span),
        };
        for y in y0..y1 {
            let px = image.get_pixel_mut(x, y);
            *px = over(color, *px);
        }
    }
}

fn lerp(from: Color, to: Color, t: f32) -> Color {
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color::rgba(mix(from.r, to.r), mix(from.g, to.g), mix(from.b, to.b), mix(from.a, to.a))
}

/// Source-over compositing onto an opaque pixel.
fn over(src: Color, dst: Rgb<u8>) -> Rgb<u8> {
    if src.a == 255 {
        return Rgb([src.r, src.g, src.b]);
    }
    let a = src.a as f32 / 255.0;
    let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * (1.0 - a)).round() as u8;
    Rgb([mix(src.r, dst[0]), mix(src.g, dst[1]), mix(src.b, dst[2])])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::surface::OffscreenSurface;
    use crate::models::{PersonalDetails, Record};
    use crate::render::{render, TemplateId};

    fn record() -> Record {
        Record {
            personal_details: PersonalDetails {
                full_name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                summary: "Backend engineer with a taste for typed APIs.".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_over_composites_on_white() {
        let half = Color::rgba(0, 0, 0, 128);
        let out = over(half, WHITE);
        assert!(out[0] > 120 && out[0] < 135);
        assert_eq!(over(Color::rgb(1, 2, 3), WHITE), Rgb([1, 2, 3]));
        assert_eq!(over(Color::rgba(0, 0, 0, 0), WHITE), WHITE);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color::rgb(0, 0, 0);
        let b = Color::rgb(200, 100, 50);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
    }

    #[tokio::test]
    async fn test_rasterize_scales_by_upscale() {
        let surface = OffscreenSurface::new();
        let view = surface.detach(&render(&record(), TemplateId::Classic), 800);
        let rasterizer = MetricRasterizer::default();

        let one = rasterizer.rasterize(&view, 1.0).await.unwrap();
        let two = rasterizer.rasterize(&view, 2.0).await.unwrap();
        assert_eq!(one.width(), 800);
        assert_eq!(two.width(), 1600);
        assert!(two.height() >= one.height() * 2 - 2);
    }

    #[tokio::test]
    async fn test_modern_header_gradient_is_painted() {
        let surface = OffscreenSurface::new();
        let view = surface.detach(&render(&record(), TemplateId::Modern), 800);
        let bitmap = MetricRasterizer::default().rasterize(&view, 1.0).await.unwrap();

        let left = bitmap.image.get_pixel(0, 0);
        let right = bitmap.image.get_pixel(799, 0);
        // blue-600 on the left edge, purple-600 on the right
        assert!(left[2] > 200 && left[0] < 60, "{left:?}");
        assert!(right[0] > 130, "{right:?}");
    }

    #[tokio::test]
    async fn test_pixel_budget_enforced() {
        let surface = OffscreenSurface::new();
        let view = surface.detach(&render(&record(), TemplateId::Minimal), 800);
        let rasterizer = MetricRasterizer { max_pixels: 10_000 };
        let err = rasterizer.rasterize(&view, 2.0).await.unwrap_err();
        assert!(matches!(err, ExportError::Rasterize(_)));
    }

    #[tokio::test]
    async fn test_invalid_upscale_rejected() {
        let surface = OffscreenSurface::new();
        let view = surface.detach(&render(&record(), TemplateId::Minimal), 800);
        let err = MetricRasterizer::default().rasterize(&view, 0.0).await.unwrap_err();
        assert!(matches!(err, ExportError::Rasterize(_)));
    }

    #[tokio::test]
    async fn test_png_encoding() {
        let surface = OffscreenSurface::new();
        let view = surface.detach(&render(&record(), TemplateId::Classic), 800);
        let bitmap = MetricRasterizer::default().rasterize(&view, 1.0).await.unwrap();
        let png = bitmap.to_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
