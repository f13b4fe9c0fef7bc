use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Entry, EntryId, EntrySection, Record};
use crate::render::{SectionKind, TemplateDescriptor, TemplateId, VisualTree};
use crate::session::changes::{RecordChange, SectionUpdate};
use crate::session::Session;
use crate::state::AppState;

/// Session snapshot returned by every editing endpoint.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub record: Record,
    /// The selection exactly as the client sent it.
    pub template: String,
    /// The template actually used for rendering.
    pub resolved_template: TemplateId,
    pub can_undo: bool,
    pub can_redo: bool,
    pub export_in_progress: bool,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        SessionView {
            id: session.id,
            created_at: session.created_at,
            record: session.record().clone(),
            template: session.template_selection().to_string(),
            resolved_template: session.template(),
            can_undo: session.can_undo(),
            can_redo: session.can_redo(),
            export_in_progress: session.export_in_progress(),
        }
    }
}

/// Rendered preview plus the sections and entry ids it shows.
#[derive(Debug, Serialize)]
pub struct PreviewView {
    #[serde(flatten)]
    pub tree: VisualTree,
    pub outline: Vec<(SectionKind, Vec<EntryId>)>,
}

impl From<VisualTree> for PreviewView {
    fn from(tree: VisualTree) -> Self {
        PreviewView {
            outline: tree.selection(),
            tree,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewEntryRequest {
    pub section: EntrySection,
}

#[derive(Debug, Deserialize)]
pub struct TemplateSelection {
    pub template: String,
}

fn reject_duplicates(update: &SectionUpdate) -> Result<(), AppError> {
    let duplicates = update.duplicate_ids();
    if duplicates.is_empty() {
        return Ok(());
    }
    let ids: Vec<&str> = duplicates.iter().map(|id| id.as_str()).collect();
    warn!("Rejected section replacement with duplicate ids: {ids:?}");
    Err(AppError::Validation(format!(
        "Duplicate entry ids in section: {}",
        ids.join(", ")
    )))
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let session = state.sessions.create()?;
    Ok((StatusCode::CREATED, Json(SessionView::from(&session))))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    state.sessions.read(id, |s| Json(SessionView::from(s)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/sections
/// Replaces one whole slice of the record.
pub async fn handle_replace_section(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<SectionUpdate>,
) -> Result<Json<SessionView>, AppError> {
    reject_duplicates(&update)?;
    let change = RecordChange::ReplaceSection { update };
    state.sessions.update(id, |s| {
        s.apply(&change);
        Json(SessionView::from(&*s))
    })
}

/// POST /api/v1/sessions/:id/changes
pub async fn handle_apply_change(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(change): Json<RecordChange>,
) -> Result<Json<SessionView>, AppError> {
    if let RecordChange::ReplaceSection { update } = &change {
        reject_duplicates(update)?;
    }
    state.sessions.update(id, |s| {
        s.apply(&change);
        Json(SessionView::from(&*s))
    })
}

/// POST /api/v1/sessions/:id/entries
/// Appends a placeholder entry with a fresh id and returns it.
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NewEntryRequest>,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    let entry = Entry::blank(req.section);
    let change = RecordChange::AddEntry {
        entry: entry.clone(),
    };
    state.sessions.update(id, |s| s.apply(&change))?;
    info!(session = %id, section = ?entry.section(), entry = %entry.id(), "Added placeholder entry");
    Ok((StatusCode::CREATED, Json(entry)))
}

/// POST /api/v1/sessions/:id/undo
pub async fn handle_undo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    state.sessions.update(id, |s| {
        if !s.undo() {
            info!("Nothing to undo in session {id}");
        }
        Json(SessionView::from(&*s))
    })
}

/// POST /api/v1/sessions/:id/redo
pub async fn handle_redo(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    state.sessions.update(id, |s| {
        if !s.redo() {
            info!("Nothing to redo in session {id}");
        }
        Json(SessionView::from(&*s))
    })
}

/// PUT /api/v1/sessions/:id/template
/// Any string is accepted; unknown ids render with the default template.
pub async fn handle_select_template(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TemplateSelection>,
) -> Result<Json<SessionView>, AppError> {
    state.sessions.update(id, |s| {
        s.select_template(req.template);
        Json(SessionView::from(&*s))
    })
}

/// GET /api/v1/sessions/:id/preview
pub async fn handle_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PreviewView>, AppError> {
    state.sessions.read(id, |s| Json(PreviewView::from(s.preview())))
}

/// GET /api/v1/templates
pub async fn handle_list_templates() -> Json<Vec<TemplateDescriptor>> {
    Json(TemplateId::ALL.iter().map(|t| t.descriptor()).collect())
}
