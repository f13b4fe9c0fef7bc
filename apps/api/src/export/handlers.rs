use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::ExportError;
use crate::state::AppState;

/// POST /api/v1/sessions/:id/export
/// Captures the current preview as a one-page PDF attachment.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (guard, tree, name) = state.sessions.read(id, |s| {
        s.try_begin_export()
            .map(|guard| (guard, s.preview(), s.record().personal_details.full_name.clone()))
    })?
    .ok_or_else(|| AppError::Conflict(format!("An export is already running for session {id}")))?;

    info!(session = %id, template = %tree.template, "Export started");
    let result = state.exporter.export_document(Some(&tree), &name).await;
    // The busy flag clears here on success and failure alike.
    drop(guard);

    let artifact = result.map_err(|e| {
        error!(session = %id, "Export failed: {e}");
        AppError::Export(e)
    })?;

    let disposition = content_disposition(&artifact.file_name)
        .map_err(|e| AppError::Export(ExportError::Compose(format!("invalid file name header: {e}"))))?;
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(artifact.media_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}

/// GET /api/v1/sessions/:id/preview.png
/// The bitmap an export of the current preview would embed.
pub async fn handle_preview_png(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let tree = state.sessions.read(id, |s| s.preview())?;
    let png = state.exporter.preview_png(&tree).await?;
    Ok(([(header::CONTENT_TYPE, HeaderValue::from_static("image/png"))], png).into_response())
}

/// `attachment` with an ASCII fallback name plus the RFC 5987 UTF-8 form.
fn content_disposition(file_name: &str) -> Result<HeaderValue, header::InvalidHeaderValue> {
    let ascii: String = file_name
        .chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() && c != '"' { c } else { '_' })
        .collect();
    let encoded: String = file_name
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'-' | b'_' | b'~' => (b as char).to_string(),
            _ => format!("%{b:02X}"),
        })
        .collect();
    HeaderValue::from_str(&format!(
        "attachment; filename=\"{ascii}\"; filename*=UTF-8''{encoded}"
    ))
}
