use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::{json, Value};

use crate::auth::Claims;
use crate::error::ApiError;
use crate::middleware::simulated;
use crate::state::AppState;

use super::CATEGORIES;

/// GET /categories - the list of category names, public.
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let docs = state.store.get_all(CATEGORIES).await?;
    let names: Vec<Value> = docs
        .into_iter()
        .filter_map(|doc| doc.fields.get("nombre").cloned())
        .collect();
    Ok(Json(Value::Array(names)))
}

/// POST /categories - admin only. The uniqueness check is advisory: a plain
/// pre-insert query with no store constraint behind it, so two concurrent
/// creates with the same name can both land. The delete path compensates by
/// removing every match in one batch.
pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let nombre = body
        .get("nombre")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("The category name is required."))?
        .to_string();

    let existing = state
        .store
        .query_eq(CATEGORIES, "nombre", &json!(nombre))
        .await?;
    if !existing.is_empty() {
        return Err(ApiError::conflict("The category already exists."));
    }

    if state.write_gate.rehearses(&claims) {
        return Ok(simulated(
            StatusCode::CREATED,
            "Simulation mode: the category would have been created.",
            Some(json!({ "nombre": nombre })),
        ));
    }

    let id = state.store.add(CATEGORIES, json!({ "nombre": nombre })).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id, "nombre": nombre }))).into_response())
}

/// DELETE /categories/:name - admin only.
///
/// Name matching is exact and case-sensitive. Because creation-time
/// uniqueness is only advisory, the query can return more than one document;
/// all matches are deleted in a single atomic commit so a duplicate never
/// survives a delete.
pub async fn remove(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let matches = state
        .store
        .query_eq(CATEGORIES, "nombre", &json!(name))
        .await?;
    if matches.is_empty() {
        return Err(ApiError::not_found(format!(
            "No category named \"{name}\" to delete."
        )));
    }

    if state.write_gate.rehearses(&claims) {
        return Ok(simulated(
            StatusCode::OK,
            format!("Simulation mode: category \"{name}\" would have been deleted."),
            None,
        ));
    }

    let ids: Vec<String> = matches.into_iter().map(|doc| doc.id).collect();
    state.store.delete_batch(CATEGORIES, &ids).await?;

    Ok(Json(json!({ "message": format!("Category \"{name}\" deleted.") })).into_response())
}
