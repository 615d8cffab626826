use super::constants::{DELAY_STEP_MS, WIN_BODY_LENGTH};
use super::geometry::{in_bounds, offset, random_free_cell};
use super::types::{Coordinate, Direction, Simulation};
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continues,
    Won,
    Lost,
}

impl StepOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, StepOutcome::Continues)
    }
}

/// Advances the cobra one cell. Used for both manual moves and autonomous ticks.
///
/// The head is written even when it leaves the grid so the terminal snapshot shows
/// where the cobra crashed. `body[0]` is the segment next to the head.
pub fn step<R: Rng + ?Sized>(sim: &mut Simulation, direction: Direction, rng: &mut R) -> StepOutcome {
    let previous_head = sim.cobra.head;
    let head = offset(previous_head, direction);
    sim.cobra.head = head;

    if !in_bounds(head) {
        return StepOutcome::Lost;
    }

    if head == sim.food {
        sim.cobra.body.insert(0, previous_head);
        sim.points += 1;
        sim.delay_ms = sim.delay_ms.saturating_sub(DELAY_STEP_MS);
        if sim.cobra.body.len() == WIN_BODY_LENGTH {
            return StepOutcome::Won;
        }
        sim.food = random_free_cell(rng, &sim.cobra);
    } else {
        follow_trail(&mut sim.cobra.body, previous_head);
    }

    if sim.cobra.body.contains(&sim.cobra.head) {
        return StepOutcome::Lost;
    }

    StepOutcome::Continues
}

// Each segment takes the cell its predecessor just left.
fn follow_trail(body: &mut [Coordinate], previous_head: Coordinate) {
    let mut vacated = previous_head;
    for segment in body.iter_mut() {
        vacated = std::mem::replace(segment, vacated);
    }
}
