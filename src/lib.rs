//! Dungeon Floor - a single-floor, room-by-room combat dungeon
//!
//! Core modules:
//! - `sim`: Deterministic simulation (generation, combat, room transitions, run state)
//! - `game`: Frame driver wrapping the simulation in a fixed-step clock
//! - `tuning`: Data-driven game balance
//! - `settings`: Session options loaded from JSON

pub mod game;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{FrameInput, FrameOutcome, Game};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

use sim::geom::Rect;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame the clock will account for (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Viewport dimensions
    pub const VIEW_WIDTH: f32 = 960.0;
    pub const VIEW_HEIGHT: f32 = 540.0;

    /// Room rectangle, centered in the viewport
    pub const ROOM_W: f32 = 720.0;
    pub const ROOM_H: f32 = 400.0;
    pub const ROOM_X: f32 = (VIEW_WIDTH - ROOM_W) / 2.0;
    pub const ROOM_Y: f32 = (VIEW_HEIGHT - ROOM_H) / 2.0;

    /// Door opening: `DOOR_W` along the wall, `DOOR_H` deep
    pub const DOOR_W: f32 = 80.0;
    pub const DOOR_H: f32 = 18.0;
}

/// Outer wall rectangle of every room
pub const ROOM_BOUNDS: Rect = Rect::new(
    consts::ROOM_X,
    consts::ROOM_Y,
    consts::ROOM_X + consts::ROOM_W,
    consts::ROOM_Y + consts::ROOM_H,
);

/// Collapse a pair of opposing buttons into -1, 0 or 1
#[inline]
pub fn axis(negative: bool, positive: bool) -> f32 {
    match (negative, positive) {
        (true, false) => -1.0,
        (false, true) => 1.0,
        _ => 0.0,
    }
}

/// Build a unit direction from four buttons (zero when nothing or opposites are held)
#[inline]
pub fn dpad_direction(up: bool, down: bool, left: bool, right: bool) -> Vec2 {
    Vec2::new(axis(left, right), axis(up, down)).normalize_or_zero()
}
