//! Enemy placement for a freshly carved floor

use glam::Vec2;
use rand::Rng;

use super::dungeon::Floor;
use super::state::{Enemy, EnemyKind};
use crate::ROOM_BOUNDS;
use crate::tuning::Tuning;

/// Fill every existing room with enemies.
///
/// The spawn room is always empty and cleared. Other rooms get a random count
/// in the configured range; the boss room gets a fixed, tougher set.
pub fn populate<R: Rng + ?Sized>(rng: &mut R, floor: &mut Floor, tuning: &Tuning) {
    let spawn = floor.spawn();
    let mut total = 0usize;

    for (cell, room) in floor.existing_mut() {
        room.enemies.clear();

        if cell == spawn {
            room.cleared = true;
            continue;
        }

        let count = if room.boss {
            tuning.enemy.boss_count
        } else {
            rng.random_range(tuning.enemy.min_per_room..=tuning.enemy.max_per_room)
        };

        for i in 0..count {
            room.enemies.push(spawn_enemy(rng, tuning, room.boss, i));
        }
        total += room.enemies.len();

        room.cleared = room.enemies.is_empty();
    }

    log::debug!("Populated floor with {} enemies", total);
}

/// Roll one enemy. Boss rooms alternate kinds by spawn index (even = Chaser).
fn spawn_enemy<R: Rng + ?Sized>(rng: &mut R, tuning: &Tuning, boss: bool, index: u32) -> Enemy {
    let area = ROOM_BOUNDS.inset(tuning.room.spawn_margin);
    let pos = Vec2::new(
        rng.random_range(area.min.x..area.max.x),
        rng.random_range(area.min.y..area.max.y),
    );

    let kind = if boss {
        if index % 2 == 0 {
            EnemyKind::Chaser
        } else {
            EnemyKind::Patroller
        }
    } else if rng.random_bool(0.5) {
        EnemyKind::Patroller
    } else {
        EnemyKind::Chaser
    };

    let axis = if rng.random_bool(0.5) { Vec2::X } else { Vec2::Y };
    let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };

    let stats = &tuning.enemy;
    let (hp, radius, speed) = if boss {
        (
            tuning.boss_hp(),
            stats.radius * stats.boss_radius_mult,
            stats.speed * stats.boss_speed_mult,
        )
    } else {
        (stats.hp, stats.radius, stats.speed)
    };

    Enemy {
        pos,
        radius,
        hp,
        speed,
        kind,
        patrol_dir: axis * sign,
        dead: false,
    }
}
