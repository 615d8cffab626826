use super::hub::Hub;
use crate::lobby::Lobby;
use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

pub async fn handle_socket(socket: WebSocket, lobby: Arc<Lobby>, hub: Arc<Hub>) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let connection_id = hub.register(tx);
    tracing::info!(%connection_id, "client connected");

    let send_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if sender.send(Message::Text(payload)).await.is_err() {
                break;
            }
        }
    });

    while let Some(result) = receiver.next().await {
        let Ok(message) = result else { break };
        match message {
            Message::Text(text) => {
                lobby.handle_text_message(&connection_id, &text).await;
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    lobby.disconnect(&connection_id).await;
    hub.unregister(&connection_id);
    send_task.abort();
    tracing::info!(%connection_id, "client disconnected");
}
