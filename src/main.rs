use axum::{
  extract::{State, WebSocketUpgrade},
  http::Method,
  response::IntoResponse,
  routing::get,
  Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod app;
mod error;
mod game;
mod lobby;
mod protocol;
mod shared;
mod transport;

use app::config::ServerConfig;
use lobby::Lobby;
use transport::hub::Hub;
use transport::ws_session::handle_socket;

#[derive(Clone)]
struct AppState {
  lobby: Arc<Lobby>,
  hub: Arc<Hub>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
  ok: bool,
  connections: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .init();

  let config = ServerConfig::from_env();
  let hub = Arc::new(Hub::new());
  let lobby = Arc::new(Lobby::new(hub.clone()));
  let state = Arc::new(AppState { lobby, hub });

  let cors = CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET])
    .allow_headers(Any);

  let app: Router = Router::new()
    .route("/api/health", get(health))
    .route("/api/ws", get(ws_handler))
    .layer(cors)
    .with_state(state);

  let address = config.address();
  tracing::info!("listening on {address}");

  let listener = tokio::net::TcpListener::bind(&address).await?;
  axum::serve(listener, app).await?;

  Ok(())
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(HealthResponse {
    ok: true,
    connections: state.hub.connection_count(),
  })
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let lobby = Arc::clone(&state.lobby);
  let hub = Arc::clone(&state.hub);
  ws.on_upgrade(move |socket| handle_socket(socket, lobby, hub))
}
