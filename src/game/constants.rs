pub const GRID_SIZE: i32 = 15;
pub const GRID_CELLS: usize = (GRID_SIZE * GRID_SIZE) as usize;
pub const WIN_BODY_LENGTH: usize = GRID_CELLS - 1;
pub const INITIAL_DELAY_MS: u64 = 800;
pub const LOBBY_DELAY_MS: u64 = 1000;
pub const DELAY_STEP_MS: u64 = 3;
pub const MAX_NICKNAME_LENGTH: usize = 20;
pub const MAX_ROOM_NAME_LENGTH: usize = 32;
