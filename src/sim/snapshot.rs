//! Read-only view of the run for renderers and HUDs
//!
//! Built once per frame; holds copies, so consumers never borrow simulation
//! state.

use glam::{IVec2, Vec2};
use serde::Serialize;

use super::dungeon::Direction;
use super::geom::Rect;
use super::state::{EnemyKind, GameState, RunPhase};
use super::transition::door_rect;
use crate::ROOM_BOUNDS;

#[derive(Debug, Clone, Serialize)]
pub struct DoorView {
    pub dir: Direction,
    pub rect: Rect,
    pub locked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub radius: f32,
    pub kind: EnemyKind,
    /// Draw with the low-health tint
    pub wounded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub hp: u8,
    pub max_hp: u8,
}

/// One minimap dot (existing rooms only)
#[derive(Debug, Clone, Serialize)]
pub struct MinimapCell {
    pub cell: IVec2,
    pub boss: bool,
    pub cleared: bool,
    pub current: bool,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub phase: RunPhase,
    pub walls: Rect,
    pub boss_room: bool,
    /// Doors present in the current room
    pub doors: Vec<DoorView>,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub player: PlayerView,
    pub grid_size: IVec2,
    pub minimap: Vec<MinimapCell>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let room = state.current_room();

        let doors = room
            .map(|room| {
                Direction::ALL
                    .into_iter()
                    .filter(|dir| room.has_door(*dir))
                    .map(|dir| DoorView {
                        dir,
                        rect: door_rect(dir),
                        locked: !room.cleared,
                    })
                    .collect()
            })
            .unwrap_or_default();

        let enemies = room
            .map(|room| {
                room.live_enemies()
                    .map(|e| EnemyView {
                        pos: e.pos,
                        radius: e.radius,
                        kind: e.kind,
                        wounded: e.is_wounded(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let bullets = state
            .player
            .bullets
            .iter()
            .map(|b| BulletView {
                pos: b.pos,
                radius: b.radius,
            })
            .collect();

        let minimap = state
            .floor
            .existing()
            .map(|(cell, r)| MinimapCell {
                cell,
                boss: r.boss,
                cleared: r.cleared,
                current: cell == state.cursor,
            })
            .collect();

        Self {
            phase: state.phase,
            walls: ROOM_BOUNDS,
            boss_room: room.is_some_and(|r| r.boss),
            doors,
            enemies,
            bullets,
            player: PlayerView {
                pos: state.player.pos,
                radius: state.player.radius,
                hp: state.player.hp,
                max_hp: state.player.max_hp,
            },
            grid_size: IVec2::new(state.floor.width(), state.floor.height()),
            minimap,
        }
    }
}
