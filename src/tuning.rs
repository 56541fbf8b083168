//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives here so runs can be
//! re-balanced from a settings file without touching code.

use serde::{Deserialize, Serialize};

use crate::consts::{ROOM_H, ROOM_W};

/// Largest grid side the carver accepts
pub const MAX_GRID_SIDE: i32 = 64;
/// Largest room margin that still leaves at least a pixel of floor
pub const MAX_ROOM_MARGIN: f32 = (if ROOM_W < ROOM_H { ROOM_W } else { ROOM_H }) / 2.0 - 1.0;

/// Dungeon layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonTuning {
    /// Grid width in rooms
    pub grid_width: i32,
    /// Grid height in rooms
    pub grid_height: i32,
    /// Smallest room count the carver aims for
    pub min_rooms: u32,
    /// Largest room count the carver aims for
    pub max_rooms: u32,
}

impl Default for DungeonTuning {
    fn default() -> Self {
        Self {
            grid_width: 5,
            grid_height: 5,
            min_rooms: 6,
            max_rooms: 9,
        }
    }
}

/// Player stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub radius: f32,
    pub speed: f32,
    /// Hit points (two per heart)
    pub max_hp: u8,
    /// Seconds of invulnerability after taking contact damage
    pub invulnerability: f32,
    /// Distance pushed away from the enemy that dealt damage
    pub knockback: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            radius: 12.0,
            speed: 125.0,
            max_hp: 6,
            invulnerability: 0.9,
            knockback: 20.0,
        }
    }
}

/// Player projectile stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletTuning {
    pub radius: f32,
    pub speed: f32,
    /// Lifetime in simulation ticks (0.9s at 120 Hz)
    pub ttl_ticks: u32,
    /// Seconds between shots
    pub cooldown: f32,
    /// Gap between the player's edge and a fresh bullet's center
    pub muzzle_offset: f32,
}

impl Default for BulletTuning {
    fn default() -> Self {
        Self {
            radius: 5.0,
            speed: 360.0,
            ttl_ticks: 108,
            cooldown: 0.12,
            muzzle_offset: 6.0,
        }
    }
}

/// Enemy stats and behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub hp: u8,
    pub radius: f32,
    pub speed: f32,
    /// Fewest enemies in a regular room
    pub min_per_room: u32,
    /// Most enemies in a regular room
    pub max_per_room: u32,
    /// Enemy count in the boss room
    pub boss_count: u32,
    pub boss_hp_mult: u8,
    pub boss_radius_mult: f32,
    pub boss_speed_mult: f32,
    /// Patrol speed as a fraction of full speed
    pub patrol_speed_factor: f32,
    /// Distance within which a patroller drifts toward the player
    pub aggro_radius: f32,
    /// Drift speed as a fraction of full speed
    pub aggro_pull_factor: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            hp: 2,
            radius: 12.0,
            speed: 55.0,
            min_per_room: 2,
            max_per_room: 5,
            boss_count: 6,
            boss_hp_mult: 2,
            // 12 -> 14 and 55 -> 70
            boss_radius_mult: 14.0 / 12.0,
            boss_speed_mult: 70.0 / 55.0,
            patrol_speed_factor: 0.75,
            aggro_radius: 180.0,
            aggro_pull_factor: 0.4,
        }
    }
}

/// Room interior margins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomTuning {
    /// Wall thickness; entities and bullets stay inside `ROOM_BOUNDS` inset by this
    pub wall_margin: f32,
    /// Enemies spawn inside `ROOM_BOUNDS` inset by this
    pub spawn_margin: f32,
    /// Extra reach added around door rectangles for traversal
    pub door_margin: f32,
    /// Distance from the wall where the player lands after a transition
    pub entry_inset: f32,
}

impl Default for RoomTuning {
    fn default() -> Self {
        Self {
            wall_margin: 20.0,
            spawn_margin: 40.0,
            door_margin: 10.0,
            entry_inset: 60.0,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub dungeon: DungeonTuning,
    pub player: PlayerTuning,
    pub bullet: BulletTuning,
    pub enemy: EnemyTuning,
    pub room: RoomTuning,
}

impl Tuning {
    /// Repair values that would make generation or population degenerate.
    ///
    /// Inverted ranges are swapped, zero sizes bumped to one, and oversized
    /// grids or margins clamped, each with a warning. The result is always
    /// usable.
    pub fn sanitized(mut self) -> Self {
        let d = &mut self.dungeon;
        if d.grid_width < 1 || d.grid_height < 1 {
            log::warn!(
                "Grid {}x{} is empty, using at least 1x1",
                d.grid_width,
                d.grid_height
            );
            d.grid_width = d.grid_width.max(1);
            d.grid_height = d.grid_height.max(1);
        }
        if d.grid_width > MAX_GRID_SIDE || d.grid_height > MAX_GRID_SIDE {
            log::warn!(
                "Grid {}x{} is too large, clamping sides to {}",
                d.grid_width,
                d.grid_height,
                MAX_GRID_SIDE
            );
            d.grid_width = d.grid_width.min(MAX_GRID_SIDE);
            d.grid_height = d.grid_height.min(MAX_GRID_SIDE);
        }
        if d.min_rooms == 0 {
            log::warn!("min_rooms is 0, the spawn room always exists; using 1");
            d.min_rooms = 1;
        }
        if d.min_rooms > d.max_rooms {
            log::warn!(
                "Room range {}..={} is inverted, swapping",
                d.min_rooms,
                d.max_rooms
            );
            std::mem::swap(&mut d.min_rooms, &mut d.max_rooms);
        }

        let e = &mut self.enemy;
        if e.min_per_room > e.max_per_room {
            log::warn!(
                "Enemy range {}..={} is inverted, swapping",
                e.min_per_room,
                e.max_per_room
            );
            std::mem::swap(&mut e.min_per_room, &mut e.max_per_room);
        }
        if e.hp == 0 {
            log::warn!("Enemy hp 0 would spawn dead enemies; using 1");
            e.hp = 1;
        }

        if self.player.max_hp == 0 {
            log::warn!("Player max_hp 0 would end every run immediately; using 1");
            self.player.max_hp = 1;
        }

        let r = &mut self.room;
        r.wall_margin = clamp_margin("wall_margin", r.wall_margin);
        r.spawn_margin = clamp_margin("spawn_margin", r.spawn_margin);

        self
    }

    /// Boss enemy hit points
    pub fn boss_hp(&self) -> u8 {
        self.enemy.hp.saturating_mul(self.enemy.boss_hp_mult)
    }
}

/// Keep a room margin in `0..=MAX_ROOM_MARGIN` so the inset room is never empty
fn clamp_margin(name: &str, margin: f32) -> f32 {
    if (0.0..=MAX_ROOM_MARGIN).contains(&margin) {
        return margin;
    }
    let clamped = if margin > MAX_ROOM_MARGIN {
        MAX_ROOM_MARGIN
    } else {
        0.0
    };
    log::warn!("Room {} {} is out of range, using {}", name, margin, clamped);
    clamped
}
