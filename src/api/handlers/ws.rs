//! WebSocket endpoint pushing QR codes to signed-in browsers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::infrastructure::ws::SessionRegistry;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WsParams {
    /// ID token, passed as a query parameter because browsers cannot set
    /// an `Authorization` header on WebSocket handshakes.
    pub token: String,
}

/// Upgrades to a WebSocket session for the authenticated user.
///
/// # Endpoint
///
/// `GET /ws?token={id_token}`
///
/// The server only pushes; QR codes arrive as text frames of the form
/// `{"type":"qr","key":...,"qr_svg":...}`. Frames sent by the client
/// are ignored.
pub async fn ws_handler(
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
    ws: WebSocketUpgrade,
) -> Result<Response, AppError> {
    let Some(verifier) = &state.auth else {
        return Err(AppError::unauthorized(
            "Sign-in is not enabled on this deployment",
            json!({}),
        ));
    };

    let identity = verifier.verify(&params.token).await?;
    let sessions = state.sessions.clone();

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, sessions, identity.id)))
}

async fn handle_socket(mut socket: WebSocket, sessions: Arc<SessionRegistry>, user_id: String) {
    let mut rx = sessions.register(&user_id);
    tracing::debug!(%user_id, "WebSocket session opened");

    loop {
        tokio::select! {
            outbound = rx.recv() => match outbound {
                Some(text) => {
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                // Sender gone: a newer session replaced this one.
                None => break,
            },
            inbound = socket.recv() => match inbound {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // Client frames carry nothing we act on.
                Some(Ok(_)) => {}
            },
        }
    }

    sessions.unregister(&user_id);
    tracing::debug!(%user_id, "WebSocket session closed");
}
