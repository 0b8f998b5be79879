use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use pert_core::aggregate::Totals;
use pert_core::export::{csv_filename, parse_snapshot, to_csv, to_json, ReportView};
use pert_core::export::json::SNAPSHOT_FILENAME;
use pert_core::pert::EstimateSummary;
use pert_core::{Command, Estimates, Project};

use super::AppState;
use crate::session::{Dispatched, SessionError};

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

fn session_error(e: SessionError) -> (StatusCode, String) {
    internal_error(e)
}

/// Rejected input, safe to echo back.
fn bad_request(e: impl std::fmt::Display) -> (StatusCode, String) {
    let msg = e.to_string();
    tracing::warn!("Validation error: {}", msg);
    (StatusCode::BAD_REQUEST, msg)
}

fn attachment(filename: &str) -> String {
    format!("attachment; filename=\"{}\"", filename.replace('"', ""))
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Project
// ============================================================

pub async fn get_project(
    State(state): State<AppState>,
) -> Result<Json<Project>, (StatusCode, String)> {
    state.session.snapshot().await.map(Json).map_err(session_error)
}

/// Replace the live project with an uploaded snapshot.
pub async fn import_project(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<Project>, (StatusCode, String)> {
    let project = parse_snapshot(&body).map_err(bad_request)?;
    tracing::info!("Importing snapshot for {:?}", project.project_name);

    state
        .session
        .load(project)
        .await
        .map(|d| Json(d.project))
        .map_err(session_error)
}

/// Checks the store leaves to its callers.
fn validate_command(command: &Command) -> Result<(), (StatusCode, String)> {
    match command {
        Command::LoadProject(_) => Err(bad_request(
            "LOAD_PROJECT is not accepted here; import snapshots with PUT /api/v1/project",
        )),
        Command::UpdateEstimate { which, value, .. } if !Estimates::is_valid_hours(*value) => {
            Err(bad_request(format!(
                "{} must be a non-negative number, got {}",
                which.as_str(),
                value
            )))
        }
        _ => Ok(()),
    }
}

pub async fn dispatch_command(
    State(state): State<AppState>,
    Json(command): Json<Command>,
) -> Result<Json<Dispatched>, (StatusCode, String)> {
    validate_command(&command)?;

    state
        .session
        .dispatch(command)
        .await
        .map(Json)
        .map_err(session_error)
}

pub async fn save_project(
    State(state): State<AppState>,
) -> Result<StatusCode, (StatusCode, String)> {
    let Some(file) = state.snapshot.as_ref() else {
        return Err(bad_request("No snapshot file configured"));
    };

    let project = state.session.snapshot().await.map_err(session_error)?;
    file.save(&project).map_err(internal_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================
// Derived values
// ============================================================

pub async fn get_totals(
    State(state): State<AppState>,
) -> Result<Json<Totals>, (StatusCode, String)> {
    let project = state.session.snapshot().await.map_err(session_error)?;
    Ok(Json(Totals::of(&project)))
}

pub async fn get_task_estimate(
    State(state): State<AppState>,
    Path((milestone_id, task_id)): Path<(String, String)>,
) -> Result<Json<EstimateSummary>, (StatusCode, String)> {
    let project = state.session.snapshot().await.map_err(session_error)?;
    project
        .task(&milestone_id, &task_id)
        .map(|t| Json(EstimateSummary::of(&t.estimates)))
        .ok_or((StatusCode::NOT_FOUND, "Task not found".to_string()))
}

// ============================================================
// Exports
// ============================================================

pub async fn export_json(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let project = state.session.snapshot().await.map_err(session_error)?;
    let body = to_json(&project).map_err(internal_error)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, attachment(SNAPSHOT_FILENAME)),
        ],
        body,
    ))
}

pub async fn export_csv(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let project = state.session.snapshot().await.map_err(session_error)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, attachment(&csv_filename(&project))),
        ],
        to_csv(&project),
    ))
}

pub async fn export_report(
    State(state): State<AppState>,
) -> Result<Json<ReportView>, (StatusCode, String)> {
    let project = state.session.snapshot().await.map_err(session_error)?;
    Ok(Json(ReportView::of(&project)))
}
