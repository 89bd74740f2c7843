//! Dashboard Routes
//!
//! - GET / - Rendered dashboard page
//! - GET /api/v1/layout - Component tree as JSON
//! - GET /api/v1/dependencies - Callback signatures
//! - GET /api/v1/figures - Initial figure for every graph

use axum::{extract::State, response::Html, Json};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::dto::{DependenciesResponse, FiguresResponse};
use crate::api::state::AppState;
use crate::layout::Component;

/// GET /
pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page.as_ref().clone())
}

/// GET /api/v1/layout
pub async fn get_layout(State(state): State<Arc<AppState>>) -> Json<Component> {
    Json(state.layout.as_ref().clone())
}

/// GET /api/v1/dependencies
pub async fn get_dependencies(State(state): State<Arc<AppState>>) -> Json<DependenciesResponse> {
    Json(DependenciesResponse {
        dependencies: state.registry.dependencies(),
    })
}

/// GET /api/v1/figures
///
/// Runs every callback with the layout's initial control values.
pub async fn initial_figures(State(state): State<Arc<AppState>>) -> Json<FiguresResponse> {
    let outputs = state.registry.initial_outputs(&state.data, &state.layout);

    let figures: BTreeMap<_, _> = outputs
        .into_iter()
        .map(|output| (output.target.id, output.figure))
        .collect();

    tracing::debug!(figures = figures.len(), "Served initial figures");

    Json(FiguresResponse { figures })
}
