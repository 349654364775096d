// handlers/notes.rs - GET/POST/PUT /notes handlers

use axum::{body::Bytes, extract::State, Extension, Json};
use serde_json::Value;
use std::sync::Arc;

use crate::app::AppState;
use crate::auth::Claims;
use crate::database::NoteView;
use crate::error::ApiError;

/// GET /notes - the caller's notes, most recent first
pub async fn list_notes(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<NoteView>>, ApiError> {
    let notes = state.notes.list_notes(&claims.sub).await?;
    Ok(Json(notes))
}

/// POST|PUT /notes - add a note to the caller's notebook.
///
/// Expects `{"message": "note message."}`. The body is parsed regardless of
/// Content-Type so a missing field is reported as a 400 rather than a
/// framework rejection.
pub async fn add_note(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    body: Bytes,
) -> Result<&'static str, ApiError> {
    let message = parse_message(&body)?;

    state.notes.add_note(&claims, message).await?;
    tracing::info!("Added note for {}", claims.sub);

    Ok("OK")
}

fn parse_message(body: &[u8]) -> Result<String, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| ApiError::bad_request("Request body must be a JSON object"))?;

    match object.get("message") {
        None | Some(Value::Null) => Err(ApiError::bad_request("Missing required field: message")),
        Some(Value::String(message)) => Ok(message.clone()),
        Some(_) => Err(ApiError::bad_request("Field 'message' must be a string")),
    }
}
