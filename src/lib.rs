//! # Graphboard
//!
//! An interactive analytics dashboard served from a single Rust process.
//! Six Plotly charts over in-memory sample data, two of them filtered by
//! date-range sliders through server-side callbacks.
//!
//! ## Features
//!
//! - **Deterministic data**: seeded sample tables, generated once at startup
//! - **Reactive callbacks**: slider changes recompute figures on the server
//! - **Real-time**: WebSocket push of recomputed figures, HTTP fallback
//! - **Declarative layout**: one component tree, served as JSON and HTML
//!
//! ## Modules
//!
//! - [`data`]: Sample tables and their generator
//! - [`figure`]: Plotly figure descriptions
//! - [`layout`]: Component tree, slider marks and page rendering
//! - [`callbacks`]: Callback trait, dashboard callbacks and registry
//! - [`api`]: HTTP server with Axum
//! - [`websocket`]: Push channel for control changes and figures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use graphboard::{AppState, CallbackRegistry, Config, SampleData};
//! use graphboard::layout::build_layout;
//!
//! let config = Config::default();
//! let data = SampleData::generate(&config.data);
//! let layout = build_layout(&data);
//!
//! // Every graph's figure before any interaction
//! let outputs = CallbackRegistry::dashboard().initial_outputs(&data, &layout);
//! println!("{} figures", outputs.len());
//!
//! // Or serve the whole thing
//! let state = AppState::new(&config);
//! # let _ = state;
//! ```

pub mod api;
pub mod callbacks;
pub mod config;
pub mod data;
pub mod figure;
pub mod layout;
pub mod websocket;

pub use api::{build_router, serve, ApiError, ApiResult, AppState};

pub use callbacks::{
    BarPlotCallback, BoxPlotCallback, Callback, CallbackError, CallbackRegistry, CallbackResult,
    Dependency, InputValue, Output, TimeSeriesCallback,
};

pub use config::{Config, ConfigError, DataConfig, LoggingConfig, ServerConfig};

pub use data::{
    BarColumn, BarTable, CategoryValueTable, SampleData, SliderRange, TimeSeriesRow,
    TimeSeriesTable, ValueColumn,
};

pub use figure::{Figure, Trace};

pub use layout::{build_layout, create_marks, Component, RangeSlider};

pub use websocket::{ClientMessage, ConnectionHub, HubConfig, HubError, ServerMessage};
