use super::room::Room;
use super::types::{Direction, Seat};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NotRunning,
    Reversal,
    NotYourTurn,
    WrongAxis,
}

/// Decides whether `seat` may steer the cobra towards `direction` right now.
pub fn arbitrate(room: &Room, seat: Seat, direction: Direction) -> Result<(), Rejection> {
    if !room.is_running() {
        return Err(Rejection::NotRunning);
    }
    if direction == room.sim.cobra.facing.opposite() {
        return Err(Rejection::Reversal);
    }
    if room.kind.uses_turns() && room.turn != seat {
        return Err(Rejection::NotYourTurn);
    }
    if !room.kind.seat_controls(seat, direction) {
        return Err(Rejection::WrongAxis);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::room::Occupant;
    use crate::game::types::RoomKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn running(kind: RoomKind) -> Room {
        let mut room = Room::new(1, "A".to_string(), kind, "c1", "ann");
        room.user_two = Some(Occupant {
            id: "c2".to_string(),
            nickname: "bob".to_string(),
            ready: true,
        });
        room.start(&mut StdRng::seed_from_u64(5));
        room
    }

    #[test]
    fn reversals_are_rejected_for_every_facing() {
        for kind in [RoomKind::Separate, RoomKind::Split] {
            let mut room = running(kind);
            for facing in Direction::ALL {
                room.sim.cobra.facing = facing;
                for seat in [Seat::One, Seat::Two] {
                    room.turn = seat;
                    assert_eq!(
                        arbitrate(&room, seat, facing.opposite()),
                        Err(Rejection::Reversal)
                    );
                }
            }
        }
    }

    #[test]
    fn separate_rooms_only_accept_the_seat_on_turn() {
        let room = running(RoomKind::Separate);
        assert_eq!(arbitrate(&room, Seat::One, Direction::Up), Ok(()));
        assert_eq!(
            arbitrate(&room, Seat::Two, Direction::Up),
            Err(Rejection::NotYourTurn)
        );
    }

    #[test]
    fn split_rooms_ignore_turn_and_check_axis() {
        let mut room = running(RoomKind::Split);
        room.turn = Seat::Two;
        assert_eq!(arbitrate(&room, Seat::One, Direction::Down), Ok(()));
        assert_eq!(
            arbitrate(&room, Seat::One, Direction::Right),
            Err(Rejection::WrongAxis)
        );
        room.sim.cobra.facing = Direction::Up;
        assert_eq!(arbitrate(&room, Seat::Two, Direction::Left), Ok(()));
        assert_eq!(
            arbitrate(&room, Seat::Two, Direction::Up),
            Err(Rejection::WrongAxis)
        );
    }

    #[test]
    fn idle_or_paused_rooms_reject_input() {
        let mut room = running(RoomKind::Separate);
        room.paused = true;
        assert_eq!(
            arbitrate(&room, Seat::One, Direction::Down),
            Err(Rejection::NotRunning)
        );
        room.paused = false;
        room.started = false;
        assert_eq!(
            arbitrate(&room, Seat::One, Direction::Down),
            Err(Rejection::NotRunning)
        );
    }
}
