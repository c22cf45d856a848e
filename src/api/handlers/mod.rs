use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::AppState;
use crate::models::*;
use crate::parser::parse_response;
use crate::service::{ask, AskError};
use crate::store::StoreError;

// ============================================================
// Error Handling
// ============================================================

/// Shown for any gateway failure. The cause is logged, not returned.
const GATEWAY_FAILURE: &str = "Failed to get a response from the AI. Please try again.";
const NOTHING_GENERATED: &str = "The AI answered, but no usable steps could be read from it.";

/// Map an ask failure to a status the UI can tell apart.
///
/// Gateway failures are a retryable 502 with a generic message; an answer with
/// no tasks is a 422, so "try again" and "nothing usable" stay distinct.
fn ask_error(e: AskError) -> (StatusCode, String) {
    match e {
        AskError::EmptyQuestion => (StatusCode::BAD_REQUEST, e.to_string()),
        AskError::Gateway(inner) => {
            tracing::error!(retryable = inner.is_retryable(), "Gateway error: {}", inner);
            (StatusCode::BAD_GATEWAY, GATEWAY_FAILURE.to_string())
        }
        AskError::NothingGenerated => {
            tracing::warn!("Nothing usable generated");
            (StatusCode::UNPROCESSABLE_ENTITY, NOTHING_GENERATED.to_string())
        }
    }
}

fn store_error(e: StoreError) -> (StatusCode, String) {
    tracing::warn!("Validation error: {}", e);
    (StatusCode::BAD_REQUEST, e.to_string())
}

fn checklist_not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Checklist not found".to_string())
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Parsing
// ============================================================

/// Parse raw answer text without calling the gateway. Never fails.
pub async fn parse(Json(input): Json<ParseInput>) -> Json<Vec<Task>> {
    Json(parse_response(&input.text))
}

// ============================================================
// Checklists
// ============================================================

pub async fn list_checklists(State(state): State<AppState>) -> Json<Vec<ChecklistSummary>> {
    Json(state.store.list_checklists())
}

pub async fn create_checklist(
    State(state): State<AppState>,
    Json(input): Json<AskInput>,
) -> Result<(StatusCode, Json<Checklist>), (StatusCode, String)> {
    let tasks = ask(state.gateway.as_ref(), &input.question)
        .await
        .map_err(ask_error)?;

    let checklist = state.store.create_checklist(&input.question, tasks);
    Ok((StatusCode::CREATED, Json(checklist)))
}

pub async fn get_checklist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Checklist>, (StatusCode, String)> {
    state
        .store
        .get_checklist(id)
        .map(Json)
        .ok_or_else(checklist_not_found)
}

pub async fn delete_checklist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if state.store.delete_checklist(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(checklist_not_found())
    }
}

// ============================================================
// Tasks
// ============================================================

pub async fn add_task(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<AddTaskInput>,
) -> Result<(StatusCode, Json<Task>), (StatusCode, String)> {
    state
        .store
        .add_task(id, &input.text)
        .map_err(store_error)?
        .map(|t| (StatusCode::CREATED, Json(t)))
        .ok_or_else(checklist_not_found)
}

pub async fn toggle_task_expanded(
    State(state): State<AppState>,
    Path((id, task_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ExpandedState>, (StatusCode, String)> {
    state
        .store
        .toggle_expanded(id, task_id)
        .map(|expanded| Json(ExpandedState { task_id, expanded }))
        .ok_or((StatusCode::NOT_FOUND, "Task not found".to_string()))
}

// ============================================================
// Subtasks
// ============================================================

pub async fn toggle_subtask(
    State(state): State<AppState>,
    Path((id, task_id, subtask_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<Json<Subtask>, (StatusCode, String)> {
    state
        .store
        .toggle_subtask(id, task_id, subtask_id)
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "Subtask not found".to_string()))
}
