pub mod dispatch;
pub mod game_loop;
pub mod rooms;
pub mod sessions;


use crate::error::LobbyError;
use crate::game::input::{arbitrate, Rejection};
use crate::game::movement::{step, StepOutcome};
use crate::game::room::{Room, RoomView};
use crate::game::types::{Direction, RoomId, RoomKind};
use crate::protocol::{self, ClientMessage, RoomListPayload, ServerMessage};
use crate::transport::Outbound;
use dispatch::Dispatcher;
use game_loop::{Tick, TimerTable};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rooms::{Departure, RoomRegistry};
use sessions::SessionRegistry;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Owns every session and room. All mutations run under one lock, so each event
/// and each timer firing is applied in isolation.
pub struct Lobby {
  state: Mutex<LobbyState>,
}

struct LobbyState {
  sessions: SessionRegistry,
  rooms: RoomRegistry,
  timers: TimerTable,
  dispatch: Dispatcher,
  rng: StdRng,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MoveOutcome {
  Rejected(Rejection),
  Applied(Option<Tick>),
}

impl Lobby {
  pub fn new(outbound: Arc<dyn Outbound>) -> Self {
    Self::with_rng(outbound, StdRng::from_entropy())
  }

  pub fn with_rng(outbound: Arc<dyn Outbound>, rng: StdRng) -> Self {
    Self {
      state: Mutex::new(LobbyState::new(Dispatcher::new(outbound), rng)),
    }
  }

  pub async fn handle_text_message(self: &Arc<Self>, connection_id: &str, text: &str) {
    match protocol::decode_client_message(text) {
      Ok(message) => self.handle_client_message(connection_id, message).await,
      Err(error) => {
        tracing::debug!(connection_id, %error, "rejected inbound frame");
        let state = self.state.lock().await;
        state.dispatch.reply_error(connection_id, &error);
      }
    }
  }

  pub async fn handle_client_message(self: &Arc<Self>, connection_id: &str, message: ClientMessage) {
    let mut state = self.state.lock().await;
    if let Err(error) = self.apply(&mut state, connection_id, message) {
      tracing::warn!(connection_id, kind = error.kind(), "request failed");
      state.dispatch.reply_error(connection_id, &error);
    }
  }

  /// Connection teardown. Same cascade as an explicit logout.
  pub async fn disconnect(self: &Arc<Self>, connection_id: &str) {
    let mut state = self.state.lock().await;
    if let Ok(Some(room_id)) = state.logout(connection_id) {
      state.dispatch.leave_group(connection_id, room_id);
    }
  }

  fn apply(
    self: &Arc<Self>,
    state: &mut LobbyState,
    connection_id: &str,
    message: ClientMessage,
  ) -> Result<(), LobbyError> {
    match message {
      ClientMessage::Login(nickname) => {
        let accepted = match state.login(connection_id, &nickname) {
          Ok(()) => true,
          Err(error) if error.is_login_refusal() => {
            tracing::debug!(connection_id, kind = error.kind(), "login refused");
            false
          }
          Err(error) => return Err(error),
        };
        state.dispatch.reply(connection_id, &ServerMessage::Login(accepted));
      }
      ClientMessage::Logout => {
        if let Some(room_id) = state.logout(connection_id)? {
          state.dispatch.leave_group(connection_id, room_id);
        }
      }
      ClientMessage::ListRoomsByType(kind) => {
        let rooms = state.list_rooms(kind);
        state
          .dispatch
          .reply(connection_id, &ServerMessage::RoomList(RoomListPayload { kind, rooms }));
      }
      ClientMessage::CreateRoom(payload) => {
        let view = state.create_room(connection_id, &payload.name, payload.kind)?;
        state.dispatch.join_group(connection_id, view.id);
        state.dispatch.reply(connection_id, &ServerMessage::JoinRoom(view));
      }
      ClientMessage::JoinRoom(room_id) => {
        let view = state.join_room(connection_id, room_id)?;
        state.dispatch.join_group(connection_id, view.id);
        state.dispatch.reply(connection_id, &ServerMessage::JoinRoom(view));
      }
      ClientMessage::LeaveRoom => {
        let room_id = state.leave_room(connection_id)?;
        state.dispatch.leave_group(connection_id, room_id);
        state.dispatch.reply(connection_id, &ServerMessage::LeaveRoom(true));
      }
      ClientMessage::SetReady => {
        if let Some(tick) = state.set_ready(connection_id)? {
          self.schedule(state, tick);
        }
      }
      ClientMessage::Move(direction) => {
        if let MoveOutcome::Applied(Some(tick)) = state.move_cobra(connection_id, direction)? {
          self.schedule(state, tick);
        }
      }
      ClientMessage::Pause => state.pause(connection_id)?,
      ClientMessage::Unpause => {
        if let Some(tick) = state.unpause(connection_id)? {
          self.schedule(state, tick);
        }
      }
    }
    Ok(())
  }

  fn schedule(self: &Arc<Self>, state: &mut LobbyState, tick: Tick) {
    let generation = state.timers.arm(tick.room_id);
    let lobby = Arc::clone(self);
    let handle = tokio::spawn(async move {
      tokio::time::sleep(tick.delay).await;
      lobby.fire(tick.room_id, generation).await;
    });
    state.timers.attach(tick.room_id, generation, handle);
  }

  async fn fire(self: &Arc<Self>, room_id: RoomId, generation: u64) {
    let mut state = self.state.lock().await;
    if let Some(next) = state.tick(room_id, generation) {
      self.schedule(&mut state, next);
    }
  }
}

impl LobbyState {
  fn new(dispatch: Dispatcher, rng: StdRng) -> Self {
    Self {
      sessions: SessionRegistry::new(),
      rooms: RoomRegistry::new(),
      timers: TimerTable::new(),
      dispatch,
      rng,
    }
  }

  fn login(&mut self, connection_id: &str, nickname: &str) -> Result<(), LobbyError> {
    let user = self.sessions.login(connection_id, nickname)?;
    tracing::info!(connection_id, nickname = %user.nickname, "user logged in");
    Ok(())
  }

  /// Removes the session and returns the room it affected, if any.
  fn logout(&mut self, connection_id: &str) -> Result<Option<RoomId>, LobbyError> {
    let user = self.sessions.remove(connection_id).ok_or(LobbyError::UserNotFound)?;
    tracing::info!(connection_id, nickname = %user.nickname, "user logged out");
    let Ok(departure) = self.rooms.depart(&user.id) else {
      return Ok(None);
    };
    Ok(Some(self.settle_departure(departure)))
  }

  fn list_rooms(&self, kind: RoomKind) -> Vec<RoomView> {
    self.rooms.list(kind).into_iter().map(Room::view).collect()
  }

  fn broadcast_room_list(&self, kind: RoomKind) {
    self.dispatch.room_list(kind, self.list_rooms(kind));
  }

  fn create_room(&mut self, connection_id: &str, name: &str, kind: RoomKind) -> Result<RoomView, LobbyError> {
    let user = self.sessions.get(connection_id)?;
    let view = self.rooms.create(name, kind, user)?.view();
    tracing::info!(room_id = view.id, ?kind, connection_id, "room created");
    self.broadcast_room_list(kind);
    Ok(view)
  }

  fn join_room(&mut self, connection_id: &str, room_id: RoomId) -> Result<RoomView, LobbyError> {
    let user = self.sessions.get(connection_id)?;
    let room = self.rooms.join(room_id, user)?;
    tracing::info!(room_id, connection_id, "second player seated");
    self.dispatch.game_update(room);
    Ok(room.view())
  }

  fn leave_room(&mut self, connection_id: &str) -> Result<RoomId, LobbyError> {
    self.sessions.get(connection_id)?;
    let departure = self.rooms.depart(connection_id)?;
    Ok(self.settle_departure(departure))
  }

  fn settle_departure(&mut self, departure: Departure) -> RoomId {
    let room_id = departure.room_id();
    self.timers.cancel(room_id);
    match departure {
      Departure::Dissolved { kind, .. } => {
        tracing::info!(room_id, "room dissolved");
        self.broadcast_room_list(kind);
      }
      Departure::Vacated { seat, .. } => {
        tracing::info!(room_id, ?seat, "seat vacated, room paused");
        if let Some(room) = self.rooms.get(room_id) {
          self.dispatch.game_update(room);
        }
      }
    }
    room_id
  }

  fn set_ready(&mut self, connection_id: &str) -> Result<Option<Tick>, LobbyError> {
    self.sessions.get(connection_id)?;
    let (room, seat) = self.rooms.seated_mut(connection_id)?;
    if let Some(occupant) = room.occupant_mut(seat) {
      occupant.ready = true;
    }
    let mut next = None;
    if !room.started && room.both_ready() {
      self.timers.cancel(room.id);
      room.start(&mut self.rng);
      tracing::info!(room_id = room.id, kind = ?room.kind, "game started");
      next = Some(Tick::after_ms(room.id, room.sim.delay_ms));
    }
    self.dispatch.game_update(room);
    Ok(next)
  }

  fn move_cobra(&mut self, connection_id: &str, direction: Direction) -> Result<MoveOutcome, LobbyError> {
    self.sessions.get(connection_id)?;
    let (room, seat) = self.rooms.seated_mut(connection_id)?;
    if let Err(rejection) = arbitrate(room, seat, direction) {
      tracing::debug!(room_id = room.id, ?seat, ?direction, ?rejection, "move rejected");
      return Ok(MoveOutcome::Rejected(rejection));
    }
    room.sim.cobra.facing = direction;
    if room.kind.uses_turns() {
      room.turn = seat.other();
    }
    self.timers.cancel(room.id);
    let outcome = step(&mut room.sim, direction, &mut self.rng);
    let next = conclude(&self.dispatch, room, outcome);
    self.dispatch.game_update(room);
    Ok(MoveOutcome::Applied(next))
  }

  fn pause(&mut self, connection_id: &str) -> Result<(), LobbyError> {
    self.sessions.get(connection_id)?;
    let (room, _) = self.rooms.seated_mut(connection_id)?;
    self.timers.cancel(room.id);
    room.paused = true;
    self.dispatch.game_update(room);
    Ok(())
  }

  fn unpause(&mut self, connection_id: &str) -> Result<Option<Tick>, LobbyError> {
    self.sessions.get(connection_id)?;
    let (room, _) = self.rooms.seated_mut(connection_id)?;
    if !room.is_full() {
      return Err(LobbyError::MissingOpponent);
    }
    self.timers.cancel(room.id);
    room.paused = false;
    let next = room
      .started
      .then(|| Tick::after_ms(room.id, room.sim.delay_ms));
    self.dispatch.game_update(room);
    Ok(next)
  }

  /// One autonomous step for a room whose timer fired.
  fn tick(&mut self, room_id: RoomId, generation: u64) -> Option<Tick> {
    if !self.timers.claim(room_id, generation) {
      tracing::debug!(room_id, generation, "stale timer ignored");
      return None;
    }
    let room = self.rooms.get_mut(room_id)?;
    if !room.is_running() {
      return None;
    }
    let facing = room.sim.cobra.facing;
    let outcome = step(&mut room.sim, facing, &mut self.rng);
    let next = conclude(&self.dispatch, room, outcome);
    self.dispatch.game_update(room);
    next
  }
}

// Applies a terminal outcome or asks for the next tick.
fn conclude(dispatch: &Dispatcher, room: &mut Room, outcome: StepOutcome) -> Option<Tick> {
  if !outcome.is_terminal() {
    return Some(Tick::after_ms(room.id, room.sim.delay_ms));
  }
  let won = outcome == StepOutcome::Won;
  room.finish();
  tracing::info!(room_id = room.id, won, points = room.sim.points, "game over");
  dispatch.game_over(room, won);
  None
}
