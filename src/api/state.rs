//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::callbacks::CallbackRegistry;
use crate::config::{Config, ServerConfig};
use crate::data::SampleData;
use crate::layout::{build_layout, render_page, Component};
use crate::websocket::{ConnectionHub, HubConfig};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Immutable sample tables
    pub data: Arc<SampleData>,
    /// Callbacks keyed by their outputs
    pub registry: Arc<CallbackRegistry>,
    /// Component tree served to the page
    pub layout: Arc<Component>,
    /// Rendered index page
    pub page: Arc<String>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
    /// WebSocket connection hub for figure pushes
    pub ws_hub: Arc<ConnectionHub>,
}

impl AppState {
    /// Generate the sample data and build everything derived from it
    pub fn new(config: &Config) -> Self {
        let data = SampleData::generate(&config.data);
        Self::with_data(data, config.server.clone())
    }

    /// Build state around already generated data
    pub fn with_data(data: SampleData, config: ServerConfig) -> Self {
        let layout = build_layout(&data);
        let page = render_page(&layout, config.debug);
        let hub_config = HubConfig {
            max_connections: config.max_connections,
        };

        Self {
            data: Arc::new(data),
            registry: Arc::new(CallbackRegistry::dashboard()),
            layout: Arc::new(layout),
            page: Arc::new(page),
            config: Arc::new(config),
            start_time: Instant::now(),
            ws_hub: Arc::new(ConnectionHub::new(hub_config)),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get WebSocket connection count
    pub async fn ws_connection_count(&self) -> usize {
        self.ws_hub.connection_count().await
    }
}
