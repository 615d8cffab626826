use crate::game::types::RoomId;
use std::collections::HashMap;
use std::time::Duration;
use tokio::task::JoinHandle;

/// A request to run the room's next autonomous step after `delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub room_id: RoomId,
    pub delay: Duration,
}

impl Tick {
    pub fn after_ms(room_id: RoomId, delay_ms: u64) -> Self {
        Self {
            room_id,
            delay: Duration::from_millis(delay_ms),
        }
    }
}

#[derive(Debug)]
struct TimerSlot {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

/// Pending timers, one per room at most. Each armed timer gets a fresh
/// generation; a firing whose generation is no longer current does nothing.
#[derive(Debug, Default)]
pub struct TimerTable {
    slots: HashMap<RoomId, TimerSlot>,
    next_generation: u64,
}

impl TimerTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&mut self, room_id: RoomId) -> bool {
        let Some(slot) = self.slots.remove(&room_id) else { return false };
        if let Some(handle) = slot.handle {
            handle.abort();
        }
        true
    }

    pub fn arm(&mut self, room_id: RoomId) -> u64 {
        self.cancel(room_id);
        self.next_generation += 1;
        let generation = self.next_generation;
        self.slots.insert(
            room_id,
            TimerSlot {
                generation,
                handle: None,
            },
        );
        generation
    }

    pub fn attach(&mut self, room_id: RoomId, generation: u64, handle: JoinHandle<()>) {
        match self.slots.get_mut(&room_id) {
            Some(slot) if slot.generation == generation => slot.handle = Some(handle),
            _ => handle.abort(),
        }
    }

    /// Consumes the slot of a firing timer. Returns false for stale firings.
    pub fn claim(&mut self, room_id: RoomId, generation: u64) -> bool {
        match self.slots.get(&room_id) {
            Some(slot) if slot.generation == generation => {
                self.slots.remove(&room_id);
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub fn is_armed(&self, room_id: RoomId) -> bool {
        self.slots.contains_key(&room_id)
    }
}
