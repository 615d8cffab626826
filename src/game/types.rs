use serde::{Deserialize, Serialize};

pub type RoomId = u32;
pub type ConnectionId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
  pub x: i32,
  pub y: i32,
}

impl Coordinate {
  pub const fn new(x: i32, y: i32) -> Self {
    Self { x, y }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  Up,
  Down,
  Left,
  Right,
}

impl Direction {
  #[cfg(test)]
  pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

  pub fn opposite(self) -> Self {
    match self {
      Direction::Up => Direction::Down,
      Direction::Down => Direction::Up,
      Direction::Left => Direction::Right,
      Direction::Right => Direction::Left,
    }
  }

  pub fn is_vertical(self) -> bool {
    matches!(self, Direction::Up | Direction::Down)
  }
}

/// One of the two player slots of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
  One,
  Two,
}

impl Seat {
  pub fn other(self) -> Self {
    match self {
      Seat::One => Seat::Two,
      Seat::Two => Seat::One,
    }
  }
}

/// Game variant. `Separate` alternates turns between seats, `Split` gives each
/// seat one movement axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomKind {
  Separate,
  Split,
}

impl RoomKind {
  pub fn uses_turns(self) -> bool {
    matches!(self, RoomKind::Separate)
  }

  pub fn seat_controls(self, seat: Seat, direction: Direction) -> bool {
    match self {
      RoomKind::Separate => true,
      RoomKind::Split => match seat {
        Seat::One => direction.is_vertical(),
        Seat::Two => !direction.is_vertical(),
      },
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cobra {
  pub head: Coordinate,
  pub body: Vec<Coordinate>,
  pub facing: Direction,
}

impl Cobra {
  pub fn hatchling() -> Self {
    Self {
      head: Coordinate::new(0, 0),
      body: Vec::new(),
      facing: Direction::Right,
    }
  }

  pub fn occupies(&self, cell: Coordinate) -> bool {
    self.head == cell || self.body.contains(&cell)
  }
}

/// The part of a room the movement engine reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Simulation {
  pub cobra: Cobra,
  pub food: Coordinate,
  pub points: u32,
  #[serde(rename = "delay")]
  pub delay_ms: u64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn opposite_pairs_are_symmetric() {
    for direction in Direction::ALL {
      assert_ne!(direction, direction.opposite());
      assert_eq!(direction, direction.opposite().opposite());
    }
  }

  #[test]
  fn split_rooms_assign_one_axis_per_seat() {
    assert!(RoomKind::Split.seat_controls(Seat::One, Direction::Up));
    assert!(RoomKind::Split.seat_controls(Seat::One, Direction::Down));
    assert!(!RoomKind::Split.seat_controls(Seat::One, Direction::Left));
    assert!(RoomKind::Split.seat_controls(Seat::Two, Direction::Right));
    assert!(!RoomKind::Split.seat_controls(Seat::Two, Direction::Down));
    for direction in Direction::ALL {
      assert!(RoomKind::Separate.seat_controls(Seat::One, direction));
      assert!(RoomKind::Separate.seat_controls(Seat::Two, direction));
    }
  }

  #[test]
  fn kinds_serialize_lowercase() {
    assert_eq!(serde_json::to_string(&RoomKind::Split).unwrap(), "\"split\"");
    let parsed: Direction = serde_json::from_str("\"left\"").unwrap();
    assert_eq!(parsed, Direction::Left);
  }
}
