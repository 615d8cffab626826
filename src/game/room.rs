use super::constants::{INITIAL_DELAY_MS, LOBBY_DELAY_MS};
use super::geometry::random_free_cell;
use super::types::{Cobra, ConnectionId, Coordinate, RoomId, RoomKind, Seat, Simulation};
use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occupant {
  pub id: ConnectionId,
  pub nickname: String,
  pub ready: bool,
}

#[derive(Debug, Clone)]
pub struct Room {
  pub id: RoomId,
  pub name: String,
  pub kind: RoomKind,
  pub user_one: Occupant,
  pub user_two: Option<Occupant>,
  pub started: bool,
  pub paused: bool,
  pub turn: Seat,
  pub sim: Simulation,
}

/// Snapshot sent over the wire. Scheduling state lives in the lobby's timer table
/// and has no counterpart here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
  pub id: RoomId,
  pub name: String,
  #[serde(rename = "type")]
  pub kind: RoomKind,
  pub user_one: Occupant,
  pub user_two: Option<Occupant>,
  pub started: bool,
  pub paused: bool,
  pub turn: Seat,
  #[serde(flatten)]
  pub sim: Simulation,
}

impl Room {
  pub fn new(id: RoomId, name: String, kind: RoomKind, leader_id: &str, leader_nickname: &str) -> Self {
    Self {
      id,
      name,
      kind,
      user_one: Occupant {
        id: leader_id.to_string(),
        nickname: leader_nickname.to_string(),
        ready: false,
      },
      user_two: None,
      started: false,
      paused: true,
      turn: Seat::One,
      sim: Simulation {
        cobra: Cobra::hatchling(),
        food: Coordinate::new(0, 0),
        points: 0,
        delay_ms: LOBBY_DELAY_MS,
      },
    }
  }

  pub fn seat_of(&self, user_id: &str) -> Option<Seat> {
    if self.user_one.id == user_id {
      return Some(Seat::One);
    }
    match &self.user_two {
      Some(occupant) if occupant.id == user_id => Some(Seat::Two),
      _ => None,
    }
  }

  pub fn is_full(&self) -> bool {
    self.user_two.is_some()
  }

  pub fn is_running(&self) -> bool {
    self.started && !self.paused
  }

  pub fn occupant_mut(&mut self, seat: Seat) -> Option<&mut Occupant> {
    match seat {
      Seat::One => Some(&mut self.user_one),
      Seat::Two => self.user_two.as_mut(),
    }
  }

  pub fn both_ready(&self) -> bool {
    self.user_one.ready && self.user_two.as_ref().is_some_and(|occupant| occupant.ready)
  }

  /// Resets the board for a fresh game. The caller schedules the first tick.
  pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) {
    let cobra = Cobra::hatchling();
    let food = random_free_cell(rng, &cobra);
    self.sim = Simulation {
      cobra,
      food,
      points: 0,
      delay_ms: INITIAL_DELAY_MS,
    };
    self.paused = false;
    self.started = true;
    self.turn = Seat::One;
  }

  pub fn finish(&mut self) {
    self.started = false;
    self.user_one.ready = false;
    if let Some(occupant) = self.user_two.as_mut() {
      occupant.ready = false;
    }
  }

  /// Removes a seated user. Seat two moves into seat one when the leader leaves.
  pub fn vacate(&mut self, seat: Seat) {
    if seat == Seat::One {
      if let Some(promoted) = self.user_two.take() {
        self.user_one = promoted;
      }
    } else {
      self.user_two = None;
    }
    self.paused = true;
  }

  pub fn view(&self) -> RoomView {
    RoomView {
      id: self.id,
      name: self.name.clone(),
      kind: self.kind,
      user_one: self.user_one.clone(),
      user_two: self.user_two.clone(),
      started: self.started,
      paused: self.paused,
      turn: self.turn,
      sim: self.sim.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn two_seat_room() -> Room {
    let mut room = Room::new(1, "A".to_string(), RoomKind::Separate, "c1", "ann");
    room.user_two = Some(Occupant {
      id: "c2".to_string(),
      nickname: "bob".to_string(),
      ready: true,
    });
    room
  }

  #[test]
  fn new_room_uses_pre_game_defaults() {
    let room = Room::new(3, "Lobby".to_string(), RoomKind::Split, "c1", "ann");
    assert!(!room.started);
    assert!(room.paused);
    assert!(!room.user_one.ready);
    assert!(room.user_two.is_none());
    assert_eq!(room.sim.delay_ms, LOBBY_DELAY_MS);
    assert_eq!(room.seat_of("c1"), Some(Seat::One));
    assert_eq!(room.seat_of("c2"), None);
  }

  #[test]
  fn start_resets_board() {
    let mut room = two_seat_room();
    room.sim.points = 9;
    room.sim.delay_ms = 10;
    room.turn = Seat::Two;
    room.paused = true;

    room.start(&mut StdRng::seed_from_u64(1));

    assert!(room.started);
    assert!(!room.paused);
    assert_eq!(room.turn, Seat::One);
    assert_eq!(room.sim.points, 0);
    assert_eq!(room.sim.delay_ms, INITIAL_DELAY_MS);
    assert_eq!(room.sim.cobra, Cobra::hatchling());
    assert_ne!(room.sim.food, Coordinate::new(0, 0));
  }

  #[test]
  fn leader_leaving_promotes_second_seat() {
    let mut room = two_seat_room();
    room.vacate(Seat::One);
    assert_eq!(room.user_one.id, "c2");
    assert!(room.user_one.ready);
    assert!(room.user_two.is_none());
    assert!(room.paused);
  }

  #[test]
  fn view_serializes_wire_field_names() {
    let room = two_seat_room();
    let value = serde_json::to_value(room.view()).unwrap();
    assert_eq!(value["id"], 1);
    assert_eq!(value["type"], "separate");
    assert_eq!(value["userOne"]["nickname"], "ann");
    assert_eq!(value["userTwo"]["ready"], true);
    assert_eq!(value["turn"], "one");
    assert_eq!(value["cobra"]["facing"], "right");
    assert_eq!(value["delay"], LOBBY_DELAY_MS);
    assert!(value.get("sim").is_none());
    assert!(value.get("timer").is_none());
  }
}
