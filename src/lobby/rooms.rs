use super::sessions::User;
use crate::error::LobbyError;
use crate::game::room::{Occupant, Room};
use crate::game::types::{RoomId, RoomKind, Seat};
use crate::shared::names::sanitize_room_name;
use std::collections::BTreeMap;

/// What happened to a room when one of its occupants left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Departure {
    /// The sole occupant left and the room is gone.
    Dissolved { room_id: RoomId, kind: RoomKind },
    /// One seat remains; the room is paused.
    Vacated { room_id: RoomId, seat: Seat },
}

impl Departure {
    pub fn room_id(&self) -> RoomId {
        match self {
            Departure::Dissolved { room_id, .. } | Departure::Vacated { room_id, .. } => *room_id,
        }
    }
}

#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: BTreeMap<RoomId, Room>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_free_id(&self) -> RoomId {
        let mut id = 1;
        while self.rooms.contains_key(&id) {
            id += 1;
        }
        id
    }

    pub fn list(&self, kind: RoomKind) -> Vec<&Room> {
        self.rooms.values().filter(|room| room.kind == kind).collect()
    }

    pub fn get(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.get(&room_id)
    }

    pub fn get_mut(&mut self, room_id: RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(&room_id)
    }

    pub fn room_of(&self, user_id: &str) -> Option<RoomId> {
        self.rooms
            .values()
            .find(|room| room.seat_of(user_id).is_some())
            .map(|room| room.id)
    }

    /// The room and seat a user occupies.
    pub fn seated_mut(&mut self, user_id: &str) -> Result<(&mut Room, Seat), LobbyError> {
        self.rooms
            .values_mut()
            .find_map(|room| room.seat_of(user_id).map(|seat| (room, seat)))
            .ok_or(LobbyError::RoomNotFound)
    }

    pub fn create(&mut self, name: &str, kind: RoomKind, user: &User) -> Result<&Room, LobbyError> {
        if self.room_of(&user.id).is_some() {
            return Err(LobbyError::AlreadyInRoom);
        }
        let id = self.next_free_id();
        let name = sanitize_room_name(name, &format!("Room {id}"));
        let room = Room::new(id, name, kind, &user.id, &user.nickname);
        Ok(self.rooms.entry(id).or_insert(room))
    }

    pub fn join(&mut self, room_id: RoomId, user: &User) -> Result<&Room, LobbyError> {
        let full = self
            .rooms
            .get(&room_id)
            .ok_or(LobbyError::RoomNotFound)?
            .is_full();
        if full {
            return Err(LobbyError::RoomFull);
        }
        if self.room_of(&user.id).is_some() {
            return Err(LobbyError::AlreadyInRoom);
        }
        let room = self.rooms.get_mut(&room_id).ok_or(LobbyError::RoomNotFound)?;
        room.user_two = Some(Occupant {
            id: user.id.clone(),
            nickname: user.nickname.clone(),
            ready: false,
        });
        Ok(room)
    }

    /// Unseats a user. Shared by explicit leave and disconnect.
    pub fn depart(&mut self, user_id: &str) -> Result<Departure, LobbyError> {
        let (room, seat) = self.seated_mut(user_id)?;
        if !room.is_full() {
            let (room_id, kind) = (room.id, room.kind);
            self.rooms.remove(&room_id);
            return Ok(Departure::Dissolved { room_id, kind });
        }
        room.vacate(seat);
        Ok(Departure::Vacated {
            room_id: room.id,
            seat,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, nickname: &str) -> User {
        User {
            id: id.to_string(),
            nickname: nickname.to_string(),
        }
    }

    #[test]
    fn ids_fill_the_smallest_gap() {
        let mut rooms = RoomRegistry::new();
        let (a, b, c) = (user("c1", "a"), user("c2", "b"), user("c3", "c"));
        assert_eq!(rooms.create("A", RoomKind::Separate, &a).unwrap().id, 1);
        assert_eq!(rooms.create("B", RoomKind::Split, &b).unwrap().id, 2);
        rooms.depart("c1").unwrap();
        assert_eq!(rooms.create("C", RoomKind::Separate, &c).unwrap().id, 1);
        assert_eq!(rooms.create("A", RoomKind::Separate, &a).unwrap().id, 3);
    }

    #[test]
    fn listing_is_per_kind() {
        let mut rooms = RoomRegistry::new();
        rooms.create("A", RoomKind::Separate, &user("c1", "a")).unwrap();
        rooms.create("B", RoomKind::Split, &user("c2", "b")).unwrap();
        rooms.create("C", RoomKind::Separate, &user("c3", "c")).unwrap();

        let names: Vec<&str> = rooms
            .list(RoomKind::Separate)
            .iter()
            .map(|room| room.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(rooms.list(RoomKind::Split).len(), 1);
    }

    #[test]
    fn a_user_holds_at_most_one_seat() {
        let mut rooms = RoomRegistry::new();
        let a = user("c1", "a");
        let b = user("c2", "b");
        rooms.create("A", RoomKind::Separate, &a).unwrap();
        rooms.create("B", RoomKind::Separate, &b).unwrap();

        assert_eq!(
            rooms.create("again", RoomKind::Split, &a).map(|room| room.id),
            Err(LobbyError::AlreadyInRoom)
        );
        assert_eq!(rooms.join(2, &a).map(|room| room.id), Err(LobbyError::AlreadyInRoom));
        assert!(rooms.get(2).unwrap().user_two.is_none());
    }

    #[test]
    fn join_checks_existence_then_capacity() {
        let mut rooms = RoomRegistry::new();
        rooms.create("A", RoomKind::Split, &user("c1", "a")).unwrap();

        assert_eq!(
            rooms.join(9, &user("c2", "b")).map(|room| room.id),
            Err(LobbyError::RoomNotFound)
        );
        let room = rooms.join(1, &user("c2", "b")).unwrap();
        assert_eq!(room.user_two.as_ref().unwrap().nickname, "b");
        assert_eq!(
            rooms.join(1, &user("c3", "c")).map(|room| room.id),
            Err(LobbyError::RoomFull)
        );
    }

    #[test]
    fn departures_promote_or_dissolve() {
        let mut rooms = RoomRegistry::new();
        rooms.create("A", RoomKind::Separate, &user("c1", "a")).unwrap();
        rooms.join(1, &user("c2", "b")).unwrap();

        assert_eq!(
            rooms.depart("c1").unwrap(),
            Departure::Vacated {
                room_id: 1,
                seat: Seat::One
            }
        );
        let room = rooms.get(1).unwrap();
        assert_eq!(room.user_one.id, "c2");
        assert!(room.paused);

        assert_eq!(
            rooms.depart("c2").unwrap(),
            Departure::Dissolved {
                room_id: 1,
                kind: RoomKind::Separate
            }
        );
        assert!(rooms.get(1).is_none());
        assert_eq!(rooms.depart("c2"), Err(LobbyError::RoomNotFound));
    }

    #[test]
    fn second_seat_leaving_keeps_the_leader() {
        let mut rooms = RoomRegistry::new();
        rooms.create("A", RoomKind::Split, &user("c1", "a")).unwrap();
        rooms.join(1, &user("c2", "b")).unwrap();

        rooms.depart("c2").unwrap();

        let room = rooms.get(1).unwrap();
        assert_eq!(room.user_one.id, "c1");
        assert!(room.user_two.is_none());
        assert!(room.paused);
    }
}
