pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::export::handlers as export;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(session::handle_list_templates))
        // Sessions
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(session::handle_get_session).delete(session::handle_delete_session),
        )
        // Record editing
        .route(
            "/api/v1/sessions/:id/sections",
            put(session::handle_replace_section),
        )
        .route(
            "/api/v1/sessions/:id/changes",
            post(session::handle_apply_change),
        )
        .route("/api/v1/sessions/:id/entries", post(session::handle_add_entry))
        .route("/api/v1/sessions/:id/undo", post(session::handle_undo))
        .route("/api/v1/sessions/:id/redo", post(session::handle_redo))
        // Presentation
        .route(
            "/api/v1/sessions/:id/template",
            put(session::handle_select_template),
        )
        .route("/api/v1/sessions/:id/preview", get(session::handle_preview))
        .route(
            "/api/v1/sessions/:id/preview.png",
            get(export::handle_preview_png),
        )
        .route("/api/v1/sessions/:id/export", post(export::handle_export))
        .with_state(state)
}
