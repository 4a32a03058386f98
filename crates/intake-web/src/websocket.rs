//! WebSocket handler for the real-time channel.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info, warn};

use crate::protocol::{ClientMessage, ServerMessage};
use crate::registry::ConnectionId;
use crate::state::AppState;

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle individual WebSocket connection.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    let conn_id = state.register(tx.clone());
    info!(conn_id, connections = state.connection_count(), "WebSocket client connected");

    // Forward queued outbound messages to this client.
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(e) => {
                    warn!(error = %e, "Failed to encode outbound message");
                    continue;
                }
            };
            debug!(message = %json, "Sending message to WebSocket client");
            if sender.send(Message::Text(json.into())).await.is_err() {
                debug!("WebSocket send failed, client disconnected");
                break;
            }
        }
    });

    // Handle incoming messages from this client.
    let recv_state = state.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    handle_client_message(&recv_state, conn_id, &tx, &text);
                }
                Message::Close(_) => {
                    debug!(conn_id, "WebSocket client sent close frame");
                    break;
                }
                _ => {}
            }
        }
    });

    // Wait for either task to complete
    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    state.unregister(conn_id);
    info!(conn_id, connections = state.connection_count(), "WebSocket client disconnected");
}

/// Decode one inbound frame and dispatch it. Anything the envelope cannot
/// decode gets a typed rejection on the sender's own channel; the channel
/// itself stays open.
fn handle_client_message(
    state: &AppState,
    conn_id: ConnectionId,
    tx: &UnboundedSender<ServerMessage>,
    text: &str,
) {
    let message: ClientMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(e) => {
            let err = intake_core::IntakeError::malformed(e.to_string());
            warn!(conn_id, error = %err, "Rejecting malformed message");
            let _ = tx.send(ServerMessage::SubmitRejected {
                reason: err.to_string(),
            });
            return;
        }
    };

    match message {
        ClientMessage::Submit(candidate) => match state.submit(candidate) {
            Ok(record) => {
                info!(conn_id, id = %record.id, "Patient record submitted");
            }
            Err(e) => {
                warn!(conn_id, error = %e, "Rejecting invalid submission");
                let _ = tx.send(ServerMessage::SubmitRejected {
                    reason: e.to_string(),
                });
            }
        },
    }
}
