//! Callback Update Route
//!
//! Request/response path for callbacks, used when the WebSocket is down.
//!
//! - POST /api/v1/update - Run the callback for one output key

use axum::{extract::State, Json};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::dto::{FigureProps, UpdateRequest, UpdateResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// POST /api/v1/update
///
/// Run the callback whose outputs match `output` and return the new figures
/// keyed by graph id.
pub async fn update_component(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateRequest>,
) -> ApiResult<Json<UpdateResponse>> {
    if req.output.is_empty() {
        return Err(ApiError::Validation("output cannot be empty".to_string()));
    }

    let outputs = state
        .registry
        .dispatch(&state.data, &state.layout, &req.output, &req.inputs)?;

    tracing::debug!(output = %req.output, figures = outputs.len(), "Callback update");

    let response: BTreeMap<_, _> = outputs
        .into_iter()
        .map(|output| (output.target.id, FigureProps { figure: output.figure }))
        .collect();

    Ok(Json(UpdateResponse { response }))
}
