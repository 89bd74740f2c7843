//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and manages the connection lifecycle.
//! Control changes from the page run the listening callbacks and the
//! resulting figures are pushed back on the same connection.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;

/// WebSocket upgrade handler
///
/// This is the entry point for WebSocket connections.
/// It upgrades the HTTP connection to WebSocket and starts message handling.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let hub = Arc::clone(&state.ws_hub);

    // Create channel for sending messages to this connection
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let connection_id = match hub.register(tx).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!(error = %e, "Failed to register WebSocket connection");
            let error_msg = ServerMessage::Error {
                message: e.to_string(),
            };
            if let Ok(text) = serde_json::to_string(&error_msg) {
                let _ = sender.send(Message::Text(text)).await;
            }
            return;
        }
    };

    let conn_id_for_send = connection_id.clone();

    // Task to forward messages from channel to WebSocket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(text) => {
                    if sender.send(Message::Text(text)).await.is_err() {
                        tracing::debug!(
                            connection_id = %conn_id_for_send,
                            "WebSocket send failed, closing connection"
                        );
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to serialize message");
                }
            }
        }
    });

    // Connected goes through the channel so it is ordered before any figure
    let connected = ServerMessage::Connected {
        connection_id: connection_id.clone(),
    };
    if hub.send_to(&connection_id, connected).await.is_err() {
        tracing::error!(connection_id = %connection_id, "Failed to send connected message");
        send_task.abort();
        hub.unregister(&connection_id).await;
        return;
    }

    let state_for_recv = Arc::clone(&state);
    let conn_id_for_recv = connection_id.clone();

    // Task to receive messages from WebSocket and handle them
    let mut recv_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(msg) => {
                    if !handle_ws_message(&state_for_recv, &conn_id_for_recv, msg).await {
                        break;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %conn_id_for_recv,
                        error = %e,
                        "WebSocket receive error"
                    );
                    break;
                }
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = &mut send_task => {
            recv_task.abort();
        }
        _ = &mut recv_task => {
            send_task.abort();
        }
    }

    hub.unregister(&connection_id).await;
}

/// Handle a received WebSocket message
///
/// Returns false if the connection should be closed.
async fn handle_ws_message(state: &AppState, connection_id: &str, message: Message) -> bool {
    match message {
        Message::Text(text) => {
            match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => {
                    for reply in handle_client_message(state, client_msg) {
                        let _ = state.ws_hub.send_to(connection_id, reply).await;
                    }
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %connection_id,
                        error = %e,
                        text = %text,
                        "Invalid client message"
                    );
                    // Keep the connection open
                    let error_msg = ServerMessage::Error {
                        message: format!("Invalid message format: {}", e),
                    };
                    let _ = state.ws_hub.send_to(connection_id, error_msg).await;
                }
            }
            true
        }
        Message::Binary(_) => {
            let error_msg = ServerMessage::Error {
                message: "Binary messages not supported".to_string(),
            };
            let _ = state.ws_hub.send_to(connection_id, error_msg).await;
            true
        }
        Message::Ping(_) | Message::Pong(_) => true,
        Message::Close(_) => {
            tracing::debug!(connection_id = %connection_id, "Client requested close");
            false
        }
    }
}

/// Compute the replies for a parsed client message
pub fn handle_client_message(state: &AppState, message: ClientMessage) -> Vec<ServerMessage> {
    match message {
        ClientMessage::ControlChanged {
            id,
            property,
            value,
        } => state
            .registry
            .on_change(&state.data, &state.layout, &id, &property, value)
            .into_iter()
            .flat_map(|result| match result {
                Ok(outputs) => outputs
                    .into_iter()
                    .map(|output| ServerMessage::Figure {
                        id: output.target.id,
                        figure: output.figure,
                    })
                    .collect(),
                Err(e) => {
                    tracing::warn!(control = %id, property = %property, error = %e, "Callback failed");
                    vec![ServerMessage::Error {
                        message: e.to_string(),
                    }]
                }
            })
            .collect(),
        ClientMessage::Ping => vec![ServerMessage::Pong],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn state() -> AppState {
        AppState::new(&Config::default())
    }

    #[test]
    fn test_control_change_pushes_figure() {
        let state = state();
        let replies = handle_client_message(
            &state,
            ClientMessage::ControlChanged {
                id: "date-slider2".into(),
                property: "value".into(),
                value: json!([5, 9]),
            },
        );

        assert_eq!(replies.len(), 1);
        match &replies[0] {
            ServerMessage::Figure { id, figure } => {
                assert_eq!(id, "timeseries-graph2");
                assert_eq!(figure.point_count(), 5);
            }
            other => panic!("Expected Figure, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_slider_value_reports_error() {
        let state = state();
        let replies = handle_client_message(
            &state,
            ClientMessage::ControlChanged {
                id: "date-slider1".into(),
                property: "value".into(),
                value: json!([0, 9999]),
            },
        );
        assert!(matches!(replies.as_slice(), [ServerMessage::Error { .. }]));
    }

    #[test]
    fn test_unwatched_control_is_silent() {
        let state = state();
        let replies = handle_client_message(
            &state,
            ClientMessage::ControlChanged {
                id: "boxplot1".into(),
                property: "value".into(),
                value: json!(null),
            },
        );
        assert!(replies.is_empty());
    }

    #[test]
    fn test_ping() {
        let replies = handle_client_message(&state(), ClientMessage::Ping);
        assert!(matches!(replies.as_slice(), [ServerMessage::Pong]));
    }
}
