use crate::error::LobbyError;
use crate::game::room::{Room, RoomView};
use crate::game::types::{RoomId, RoomKind};
use crate::protocol::{encode_server_message, ErrorPayload, RoomListPayload, ServerMessage};
use crate::transport::Outbound;
use std::sync::Arc;

/// Formats lobby output and routes it through the transport.
#[derive(Clone)]
pub struct Dispatcher {
    outbound: Arc<dyn Outbound>,
}

pub fn group_name(room_id: RoomId) -> String {
    room_id.to_string()
}

impl Dispatcher {
    pub fn new(outbound: Arc<dyn Outbound>) -> Self {
        Self { outbound }
    }

    pub fn reply(&self, connection_id: &str, message: &ServerMessage) {
        if let Some(payload) = encode_server_message(message) {
            self.outbound.send_to(connection_id, payload);
        }
    }

    pub fn reply_error(&self, connection_id: &str, error: &LobbyError) {
        self.reply(connection_id, &ServerMessage::Error(ErrorPayload::from(error)));
    }

    pub fn room_list(&self, kind: RoomKind, rooms: Vec<RoomView>) {
        let message = ServerMessage::RoomList(RoomListPayload { kind, rooms });
        if let Some(payload) = encode_server_message(&message) {
            self.outbound.send_all(payload);
        }
    }

    pub fn game_update(&self, room: &Room) {
        self.to_room(room.id, &ServerMessage::GameUpdate(room.view()));
    }

    pub fn game_over(&self, room: &Room, won: bool) {
        let view = room.view();
        let message = if won {
            ServerMessage::WinGame(view)
        } else {
            ServerMessage::LoseGame(view)
        };
        self.to_room(room.id, &message);
    }

    pub fn join_group(&self, connection_id: &str, room_id: RoomId) {
        self.outbound.join_group(connection_id, &group_name(room_id));
    }

    pub fn leave_group(&self, connection_id: &str, room_id: RoomId) {
        self.outbound.leave_group(connection_id, &group_name(room_id));
    }

    fn to_room(&self, room_id: RoomId, message: &ServerMessage) {
        if let Some(payload) = encode_server_message(message) {
            self.outbound.send_group(&group_name(room_id), payload);
        }
    }
}
