//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between the
//! dashboard page and the server.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::figure::Figure;

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A control's property changed in the browser
    ControlChanged {
        /// Component id (e.g., "date-slider1")
        id: String,
        /// Changed property (e.g., "value")
        property: String,
        /// New property value
        value: Value,
    },
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A recomputed figure for one graph
    Figure {
        /// Graph component id
        id: String,
        /// New figure
        figure: Figure,
    },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
}
