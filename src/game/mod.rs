pub mod constants;
pub mod geometry;
pub mod input;
pub mod movement;
pub mod room;
pub mod types;
