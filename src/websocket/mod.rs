//! WebSocket Push Channel
//!
//! The dashboard page reports control changes over `/ws`; the server runs the
//! listening callbacks and pushes the recomputed figures back.
//!
//! ## Architecture
//!
//! - **ConnectionHub**: Tracks active sessions and their outbound channels
//! - **Handler**: Handles WebSocket upgrade and message processing
//! - **Messages**: Defines client and server message formats
//!
//! ## Example
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket('ws://localhost:8050/ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({
//!     type: 'control_changed', id: 'date-slider1', property: 'value', value: [0, 90]
//!   }));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'figure') Plotly.react(msg.id, msg.figure.data, msg.figure.layout);
//! };
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::{handle_client_message, websocket_handler};
pub use hub::{ConnectionHub, ConnectionId, HubConfig, HubError};
pub use messages::{ClientMessage, ServerMessage};
