use crate::error::LobbyError;
use crate::game::room::RoomView;
use crate::game::types::{Direction, RoomId, RoomKind};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateRoomPayload {
  #[serde(default)]
  pub name: String,
  #[serde(rename = "type")]
  pub kind: RoomKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientMessage {
  Login(String),
  Logout,
  ListRoomsByType(RoomKind),
  CreateRoom(CreateRoomPayload),
  JoinRoom(#[serde(deserialize_with = "room_id_from_number_or_string")] RoomId),
  LeaveRoom,
  SetReady,
  Move(Direction),
  Pause,
  Unpause,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomListPayload {
  #[serde(rename = "type")]
  pub kind: RoomKind,
  pub rooms: Vec<RoomView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
  pub kind: &'static str,
  pub message: String,
}

impl From<&LobbyError> for ErrorPayload {
  fn from(error: &LobbyError) -> Self {
    Self {
      kind: error.kind(),
      message: error.to_string(),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerMessage {
  Login(bool),
  RoomList(RoomListPayload),
  JoinRoom(RoomView),
  LeaveRoom(bool),
  GameUpdate(RoomView),
  WinGame(RoomView),
  LoseGame(RoomView),
  Error(ErrorPayload),
}

pub fn decode_client_message(text: &str) -> Result<ClientMessage, LobbyError> {
  serde_json::from_str(text).map_err(|error| LobbyError::MalformedPayload(error.to_string()))
}

pub fn encode_server_message(message: &ServerMessage) -> Option<String> {
  match serde_json::to_string(message) {
    Ok(text) => Some(text),
    Err(error) => {
      tracing::error!(?error, "failed to encode server message");
      None
    }
  }
}

fn room_id_from_number_or_string<'de, D>(deserializer: D) -> Result<RoomId, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw {
    Number(RoomId),
    Text(String),
  }

  match Raw::deserialize(deserializer)? {
    Raw::Number(id) => Ok(id),
    Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
  }
}
