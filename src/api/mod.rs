mod handlers;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::session::SessionHandle;
use crate::snapshot::SnapshotFile;

/// Shared state for every handler.
#[derive(Clone)]
pub struct AppState {
    pub session: SessionHandle,
    /// Where `POST /save` writes. `None` disables saving.
    pub snapshot: Option<SnapshotFile>,
}

pub fn create_router(session: SessionHandle, snapshot: Option<SnapshotFile>) -> Router {
    let api = Router::new()
        // Project
        .route("/project", get(handlers::get_project))
        .route("/project", put(handlers::import_project))
        .route("/commands", post(handlers::dispatch_command))
        .route("/save", post(handlers::save_project))
        // Derived values
        .route("/totals", get(handlers::get_totals))
        .route(
            "/milestones/{milestone_id}/tasks/{task_id}/estimate",
            get(handlers::get_task_estimate),
        )
        // Exports
        .route("/export/json", get(handlers::export_json))
        .route("/export/csv", get(handlers::export_csv))
        .route("/export/report", get(handlers::export_report))
        // Health
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(AppState { session, snapshot })
}
