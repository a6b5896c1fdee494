//! WebSocket signaling endpoint
//!
//! Exposes `GET /ws/room/{room_code}`. Each accepted socket registers with
//! the room registry, announces itself on its first hello, and is removed
//! (with a membership broadcast) when the socket closes for any reason,
//! mid-handshake or mid-session.

use crate::config::SignalingConfig;
use crate::errors::SignCallError;
use crate::signaling::messages::{ClientMessage, ServerMessage};
use crate::signaling::registry::{ConnectionId, RoomRegistry};
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Build the signaling router around a shared registry.
pub fn router(registry: Arc<RoomRegistry>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ws/room/:room_code", get(ws_room))
        .with_state(registry)
}

/// Bind and serve the signaling endpoint until the process exits.
pub async fn serve(
    config: &SignalingConfig,
    registry: Arc<RoomRegistry>,
) -> Result<(), SignCallError> {
    let address = format!("{}:{}", config.bind_address, config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| SignCallError::SignalingError(format!("Failed to bind {}: {}", address, e)))?;

    log::info!("Signaling server listening on {}", address);
    axum::serve(listener, router(registry))
        .await
        .map_err(|e| SignCallError::SignalingError(format!("Server error: {}", e)))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "ok": true,
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn ws_room(
    Path(room_code): Path<String>,
    State(registry): State<Arc<RoomRegistry>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, registry, room_code))
}

async fn handle_socket(socket: WebSocket, registry: Arc<RoomRegistry>, room_code: String) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    let connection = registry.connect(&room_code, tx).await;

    // Outbound half: forward registry broadcasts onto the socket. Kept
    // separate from the inbound loop so a slow client never delays
    // membership handling.
    let writer = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            let text = match serde_json::to_string(&message) {
                Ok(text) => text,
                Err(e) => {
                    log::warn!("Failed to serialize server message: {}", e);
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(message)) = ws_rx.next().await {
        match message {
            Message::Text(text) => {
                handle_client_text(&registry, &room_code, connection, &text).await;
            }
            Message::Close(_) => break,
            // Pings are answered by axum; binary frames are not part of
            // the signaling protocol
            _ => {}
        }
    }

    registry.disconnect(&room_code, connection).await;
    writer.abort();
}

/// Dispatch one inbound text frame. Unparseable or unknown message types
/// are ignored so protocol growth never breaks an old server.
async fn handle_client_text(
    registry: &RoomRegistry,
    room_code: &str,
    connection: ConnectionId,
    text: &str,
) {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(ClientMessage::Hello { peer_id, user_id }) => {
            log::debug!(
                "Hello from connection {} (user {}) in room {}",
                connection,
                user_id,
                room_code
            );
            registry.announce(room_code, connection, &peer_id).await;
        }
        Err(e) => {
            log::debug!("Ignoring unrecognized signaling message: {}", e);
        }
    }
}
