//! Game state and core simulation types
//!
//! Everything a run needs lives in `GameState`; subsystems receive the pieces
//! they touch explicitly.

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::dungeon::Floor;
use super::run;
use crate::ROOM_BOUNDS;
use crate::tuning::{BulletTuning, Tuning};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Simulation is running
    Active,
    /// Every room cleared
    Cleared,
    /// Player hp reached zero
    Dead,
}

impl RunPhase {
    pub fn is_over(self) -> bool {
        self != RunPhase::Active
    }
}

/// Enemy behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Pure pursuit toward the player
    #[default]
    Chaser,
    /// Bounces along one axis, drifting toward a nearby player
    Patroller,
}

/// An enemy, owned by its room
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub radius: f32,
    pub hp: u8,
    pub speed: f32,
    pub kind: EnemyKind,
    /// Signed unit axis a patroller travels along
    pub patrol_dir: Vec2,
    pub dead: bool,
}

impl Default for Enemy {
    fn default() -> Self {
        Self {
            pos: ROOM_BOUNDS.center(),
            radius: 12.0,
            hp: 2,
            speed: 55.0,
            kind: EnemyKind::Chaser,
            patrol_dir: Vec2::X,
            dead: false,
        }
    }
}

impl Enemy {
    /// Apply one point of damage; returns true if this killed the enemy
    pub fn hit(&mut self) -> bool {
        self.hp = self.hp.saturating_sub(1);
        if self.hp == 0 {
            self.dead = true;
        }
        self.dead
    }

    /// Low-health tint threshold for renderers
    pub fn is_wounded(&self) -> bool {
        self.hp <= 1
    }
}

/// A player projectile
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Ticks left before the bullet expires
    pub ttl_ticks: u32,
    pub dead: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, dir: Vec2, tuning: &BulletTuning) -> Self {
        Self {
            pos,
            vel: dir * tuning.speed,
            radius: tuning.radius,
            ttl_ticks: tuning.ttl_ticks,
            dead: false,
        }
    }
}

/// The player
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub hp: u8,
    pub max_hp: u8,
    pub bullets: Vec<Bullet>,
    /// Seconds until the next shot is allowed
    pub shot_cooldown: f32,
    /// Seconds of remaining contact-damage immunity
    pub invulnerability: f32,
}

impl Player {
    /// Fresh player standing in the middle of the room
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: ROOM_BOUNDS.center(),
            radius: tuning.player.radius,
            speed: tuning.player.speed,
            hp: tuning.player.max_hp,
            max_hp: tuning.player.max_hp,
            bullets: Vec::new(),
            shot_cooldown: 0.0,
            invulnerability: 0.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Complete run state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Single source of randomness for generation and population
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub floor: Floor,
    /// Grid cell the player is in
    pub cursor: IVec2,
    pub player: Player,
    pub phase: RunPhase,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    /// Runs started with this state (1 after construction)
    pub run_index: u32,
}

impl GameState {
    /// Create a new state with the given seed and start the first run
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            floor: Floor::new(tuning.dungeon.grid_width, tuning.dungeon.grid_height),
            cursor: IVec2::ZERO,
            player: Player::new(&tuning),
            phase: RunPhase::Active,
            time_ticks: 0,
            run_index: 0,
            tuning,
        };
        run::restart(&mut state);
        state
    }

    /// The room the player is standing in
    pub fn current_room(&self) -> Option<&super::dungeon::Room> {
        self.floor.get(self.cursor)
    }
}
