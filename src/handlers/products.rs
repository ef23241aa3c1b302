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
use crate::store::Document;

use super::PRODUCTS;

/// GET /products - full catalog, public. Products are schemaless; whatever
/// was stored comes back as `{id, ...fields}`.
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let docs = state.store.get_all(PRODUCTS).await?;
    let products: Vec<Value> = docs.into_iter().map(Document::into_value).collect();
    Ok(Json(Value::Array(products)))
}

/// POST /products - admin only, subject to the mutation guard.
pub async fn create(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    if state.write_gate.rehearses(&claims) {
        return Ok(simulated(
            StatusCode::CREATED,
            "Simulation mode: the product would have been created.",
            Some(body),
        ));
    }

    let id = state.store.add(PRODUCTS, body.clone()).await?;
    let product = Document { id, fields: body };
    Ok((StatusCode::CREATED, Json(product.into_value())).into_response())
}

/// PUT /products/:id - replace a product's fields.
pub async fn update(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    if state.write_gate.rehearses(&claims) {
        return Ok(simulated(
            StatusCode::OK,
            format!("Simulation mode: product {id} would have been updated."),
            Some(body),
        ));
    }

    state.store.update(PRODUCTS, &id, body.clone()).await?;
    let product = Document { id, fields: body };
    Ok(Json(product.into_value()).into_response())
}

/// DELETE /products/:id
pub async fn remove(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    if state.write_gate.rehearses(&claims) {
        return Ok(simulated(
            StatusCode::OK,
            format!("Simulation mode: product {id} would have been deleted."),
            None,
        ));
    }

    state.store.delete(PRODUCTS, &id).await?;
    Ok(Json(json!({ "message": format!("Product {id} deleted.") })).into_response())
}
