//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::callbacks::{DependencySpec, InputValue};
use crate::figure::Figure;

// ============================================
// CALLBACK DTOs
// ============================================

/// Callback update request
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// Output key of the callback to run (e.g. "timeseries-graph1.figure")
    pub output: String,
    /// Current input values; missing inputs use layout defaults
    #[serde(default)]
    pub inputs: Vec<InputValue>,
}

/// Callback update response: component id → property → value
#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub response: BTreeMap<String, FigureProps>,
}

/// Properties written to a graph component
#[derive(Debug, Serialize)]
pub struct FigureProps {
    pub figure: Figure,
}

/// Callback dependency listing
#[derive(Debug, Serialize)]
pub struct DependenciesResponse {
    pub dependencies: Vec<DependencySpec>,
}

/// Initial figures for every graph
#[derive(Debug, Serialize)]
pub struct FiguresResponse {
    /// Graph id → figure
    pub figures: BTreeMap<String, Figure>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded
    pub status: String,
    /// Sample data status
    pub data: DataHealth,
    /// Number of registered callbacks
    pub callbacks: usize,
    /// Open WebSocket sessions
    pub ws_connections: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Application version
    pub version: String,
}

/// Row counts of the sample tables
#[derive(Debug, Serialize)]
pub struct DataHealth {
    pub seed: u64,
    pub timeseries_rows: usize,
    pub boxplot_rows: usize,
    pub bar_rows: usize,
}
