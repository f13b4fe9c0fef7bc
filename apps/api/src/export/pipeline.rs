//! Export orchestration.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use crate::export::document::{DocumentComposer, PdfComposer};
use crate::export::raster::{Bitmap, MetricRasterizer, Rasterizer};
use crate::export::surface::OffscreenSurface;
use crate::export::{ExportError, ExportSettings};
use crate::render::format::non_blank;
use crate::render::VisualTree;

/// Base file name used when the record has no name.
pub const FALLBACK_FILE_STEM: &str = "CV";

#[derive(Debug, Clone)]
pub struct DocumentArtifact {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Bytes,
}

#[derive(Clone)]
pub struct ExportPipeline {
    pub surface: OffscreenSurface,
    pub rasterizer: Arc<dyn Rasterizer>,
    pub composer: Arc<dyn DocumentComposer>,
    pub settings: ExportSettings,
}

impl ExportPipeline {
    pub fn new(settings: ExportSettings) -> Self {
        Self::with_backends(settings, Arc::new(MetricRasterizer::default()), Arc::new(PdfComposer))
    }

    pub fn with_backends(
        settings: ExportSettings,
        rasterizer: Arc<dyn Rasterizer>,
        composer: Arc<dyn DocumentComposer>,
    ) -> Self {
        ExportPipeline {
            surface: OffscreenSurface::new(),
            rasterizer,
            composer,
            settings,
        }
    }

    /// Captures `rendered` into a paginated document named after `suggested_name`.
    ///
    /// The detached copy is released before this returns, on every path.
    pub async fn export_document(
        &self,
        rendered: Option<&VisualTree>,
        suggested_name: &str,
    ) -> Result<DocumentArtifact, ExportError> {
        let bitmap = self.capture(rendered).await?;
        let file_name = artifact_file_name(suggested_name, self.composer.extension());

        let composer = Arc::clone(&self.composer);
        let page = self.settings.page;
        let title = file_stem(suggested_name).to_string();
        let (width, height) = (bitmap.width(), bitmap.height());
        let bytes = tokio::task::spawn_blocking(move || composer.compose(&bitmap, page, &title))
            .await
            .map_err(|e| ExportError::Compose(format!("composer task failed: {e}")))??;

        info!(
            file_name = %file_name,
            width,
            height,
            page = %page,
            size_bytes = bytes.len(),
            "Document exported"
        );
        Ok(DocumentArtifact {
            file_name,
            media_type: self.composer.media_type(),
            bytes: Bytes::from(bytes),
        })
    }

    /// The bitmap export would embed, encoded as PNG.
    pub async fn preview_png(&self, rendered: &VisualTree) -> Result<Bytes, ExportError> {
        let bitmap = self.capture(Some(rendered)).await?;
        tokio::task::spawn_blocking(move || bitmap.to_png())
            .await
            .map_err(|e| ExportError::Rasterize(format!("PNG task failed: {e}")))?
            .map(Bytes::from)
    }

    async fn capture(&self, rendered: Option<&VisualTree>) -> Result<Bitmap, ExportError> {
        let tree = rendered.ok_or(ExportError::MissingSource)?;
        let view = self.surface.detach(tree, self.settings.reference_width_px);
        self.rasterizer.rasterize(&view, self.settings.upscale).await
    }
}

fn file_stem(suggested_name: &str) -> &str {
    non_blank(suggested_name).unwrap_or(FALLBACK_FILE_STEM)
}

/// `<name>.<ext>`, or `CV.<ext>` when the name is blank. Characters that cannot
/// appear in a file name are replaced.
pub fn artifact_file_name(suggested_name: &str, extension: &str) -> String {
    let stem: String = file_stem(suggested_name)
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{stem}.{extension}")
}
