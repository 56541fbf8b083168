//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (row-major rooms, list-order entities)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod combat;
pub mod dungeon;
pub mod geom;
pub mod populate;
pub mod run;
pub mod snapshot;
pub mod state;
pub mod tick;
pub mod transition;

pub use clock::FixedClock;
pub use dungeon::{Direction, Floor, Room};
pub use geom::{Rect, circle_rect_overlap, circles_overlap};
pub use snapshot::FrameSnapshot;
pub use state::{Bullet, Enemy, EnemyKind, GameState, Player, RunPhase};
pub use tick::{TickInput, tick};
