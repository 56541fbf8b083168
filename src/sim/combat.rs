//! Movement, enemy AI, projectiles and contact damage
//!
//! Every function works on the pieces of state it needs; `arena` is always the
//! room interior (`ROOM_BOUNDS` minus the wall margin).

use glam::Vec2;

use super::geom::{Rect, circles_overlap, direction_to};
use super::state::{Bullet, Enemy, EnemyKind, Player};
use crate::tuning::Tuning;

/// Integrate player movement and keep the player inside the arena
pub fn move_player(player: &mut Player, dir: Vec2, dt: f32, arena: &Rect) {
    player.pos += dir * player.speed * dt;
    player.pos = arena.clamp_circle(player.pos, player.radius);
}

/// Tick the shot cooldown and fire along `aim` if allowed.
///
/// `aim` is expected to be a unit vector or zero. Returns true when a bullet
/// was spawned.
pub fn fire(player: &mut Player, aim: Vec2, dt: f32, tuning: &Tuning) -> bool {
    player.shot_cooldown = (player.shot_cooldown - dt).max(0.0);
    if aim == Vec2::ZERO || player.shot_cooldown > 0.0 {
        return false;
    }

    let muzzle = player.pos + aim * (player.radius + tuning.bullet.muzzle_offset);
    player.bullets.push(Bullet::new(muzzle, aim, &tuning.bullet));
    player.shot_cooldown = tuning.bullet.cooldown;
    true
}

/// Advance enemy behavior for one tick
pub fn update_enemies(
    enemies: &mut [Enemy],
    player_pos: Vec2,
    dt: f32,
    arena: &Rect,
    tuning: &Tuning,
) {
    let aggro_sq = tuning.enemy.aggro_radius * tuning.enemy.aggro_radius;

    for enemy in enemies.iter_mut().filter(|e| !e.dead) {
        // Direction and aggro range both come from the pre-move position
        let toward_player = direction_to(enemy.pos, player_pos);
        let in_aggro = enemy.pos.distance_squared(player_pos) < aggro_sq;

        match enemy.kind {
            EnemyKind::Chaser => {
                enemy.pos += toward_player * enemy.speed * dt;
            }
            EnemyKind::Patroller => {
                let patrol_speed = enemy.speed * tuning.enemy.patrol_speed_factor;
                enemy.pos += enemy.patrol_dir * patrol_speed * dt;
                if in_aggro {
                    let pull_speed = enemy.speed * tuning.enemy.aggro_pull_factor;
                    enemy.pos += toward_player * pull_speed * dt;
                }
            }
        }

        let clamped = arena.clamp_circle(enemy.pos, enemy.radius);
        if enemy.kind == EnemyKind::Patroller {
            // Bounce when the wall pushed back against the patrol direction
            let push = clamped - enemy.pos;
            if push.x * enemy.patrol_dir.x < 0.0 {
                enemy.patrol_dir.x = -enemy.patrol_dir.x;
            }
            if push.y * enemy.patrol_dir.y < 0.0 {
                enemy.patrol_dir.y = -enemy.patrol_dir.y;
            }
        }
        enemy.pos = clamped;
    }
}

/// Move bullets, expire them, and resolve hits.
///
/// Each live bullet damages at most one enemy per tick: the first overlapping
/// live enemy in list order. Spent bullets are removed before returning.
/// Returns the number of enemies killed.
pub fn update_bullets(
    bullets: &mut Vec<Bullet>,
    enemies: &mut [Enemy],
    dt: f32,
    arena: &Rect,
) -> usize {
    let mut kills = 0;

    for bullet in bullets.iter_mut().filter(|b| !b.dead) {
        bullet.pos += bullet.vel * dt;
        bullet.ttl_ticks = bullet.ttl_ticks.saturating_sub(1);
        if bullet.ttl_ticks == 0 || !arena.contains(bullet.pos) {
            bullet.dead = true;
            continue;
        }

        let target = enemies
            .iter_mut()
            .find(|e| !e.dead && circles_overlap(bullet.pos, bullet.radius, e.pos, e.radius));
        if let Some(enemy) = target {
            bullet.dead = true;
            if enemy.hit() {
                kills += 1;
                log::trace!("Enemy killed at {}", enemy.pos);
            }
        }
    }

    bullets.retain(|b| !b.dead);
    kills
}

/// Apply contact damage from overlapping enemies.
///
/// One invulnerability timer covers all enemies: while it runs nothing can
/// hurt the player, and when it has expired a tick with several overlapping
/// enemies still costs a single point. Knockback pushes away from the first
/// overlapping enemy in list order. Returns true if damage was taken.
pub fn resolve_contact(
    player: &mut Player,
    enemies: &[Enemy],
    dt: f32,
    arena: &Rect,
    tuning: &Tuning,
) -> bool {
    player.invulnerability = (player.invulnerability - dt).max(0.0);
    if player.invulnerability > 0.0 {
        return false;
    }

    let Some(attacker) = enemies
        .iter()
        .find(|e| !e.dead && circles_overlap(player.pos, player.radius, e.pos, e.radius))
    else {
        return false;
    };

    player.hp = player.hp.saturating_sub(1);
    let push = direction_to(attacker.pos, player.pos);
    player.pos = arena.clamp_circle(player.pos + push * tuning.player.knockback, player.radius);
    player.invulnerability = tuning.player.invulnerability;

    log::debug!("Player hit: hp {}/{}", player.hp, player.max_hp);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ROOM_BOUNDS;
    use crate::consts::SIM_DT;

    fn arena(tuning: &Tuning) -> Rect {
        ROOM_BOUNDS.inset(tuning.room.wall_margin)
    }

    fn enemy_at(pos: Vec2) -> Enemy {
        Enemy {
            pos,
            ..Default::default()
        }
    }

    #[test]
    fn test_player_clamped_to_arena() {
        let tuning = Tuning::default();
        let arena = arena(&tuning);
        let mut player = Player::new(&tuning);
        for _ in 0..2000 {
            move_player(&mut player, Vec2::new(-1.0, 0.0), SIM_DT, &arena);
        }
        assert_eq!(player.pos.x, arena.min.x + player.radius);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        assert!(fire(&mut player, Vec2::X, SIM_DT, &tuning));
        assert!(!fire(&mut player, Vec2::X, SIM_DT, &tuning));
        assert_eq!(player.bullets.len(), 1);

        let bullet = &player.bullets[0];
        assert_eq!(bullet.pos, player.pos + Vec2::X * (player.radius + 6.0));
        assert_eq!(bullet.vel, Vec2::X * 360.0);

        // Cooldown is 0.12s = ~15 ticks
        let mut fired = false;
        for _ in 0..20 {
            fired |= fire(&mut player, Vec2::X, SIM_DT, &tuning);
        }
        assert!(fired);
    }

    #[test]
    fn test_no_aim_no_shot() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        assert!(!fire(&mut player, Vec2::ZERO, SIM_DT, &tuning));
        assert!(player.bullets.is_empty());
    }

    #[test]
    fn test_bullet_kinematics_and_ttl() {
        let tuning = Tuning::default();
        let arena = arena(&tuning);
        let start = Vec2::new(arena.min.x + 20.0, arena.center().y);
        let dir = Vec2::X;
        let mut bullets = vec![Bullet::new(start, dir, &tuning.bullet)];
        let mut enemies: Vec<Enemy> = Vec::new();

        let ttl = tuning.bullet.ttl_ticks;
        for n in 1..ttl {
            update_bullets(&mut bullets, &mut enemies, SIM_DT, &arena);
            assert_eq!(bullets.len(), 1, "bullet expired early at tick {}", n);
            let t = n as f32 * SIM_DT;
            let expected = start + dir * tuning.bullet.speed * t;
            assert!(bullets[0].pos.distance(expected) < 1e-2);
        }

        // Expires on exactly the tick its lifetime runs out
        update_bullets(&mut bullets, &mut enemies, SIM_DT, &arena);
        assert!(bullets.is_empty());
    }

    #[test]
    fn test_bullet_dies_leaving_arena() {
        let tuning = Tuning::default();
        let arena = arena(&tuning);
        let start = Vec2::new(arena.max.x - 1.0, arena.center().y);
        let mut bullets = vec![Bullet::new(start, Vec2::X, &tuning.bullet)];
        update_bullets(&mut bullets, &mut [], SIM_DT, &arena);
        assert!(bullets.is_empty());
    }

    #[test]
    fn test_bullet_hits_first_enemy_only() {
        let tuning = Tuning::default();
        let arena = arena(&tuning);
        let center = arena.center();
        let mut enemies = vec![enemy_at(center), enemy_at(center)];
        let mut bullets = vec![Bullet::new(center, Vec2::X, &tuning.bullet)];

        let kills = update_bullets(&mut bullets, &mut enemies, SIM_DT, &arena);
        assert_eq!(kills, 0);
        assert!(bullets.is_empty());
        assert_eq!(enemies[0].hp, 1);
        assert_eq!(enemies[1].hp, 2);
    }

    #[test]
    fn test_bullet_skips_dead_enemy() {
        let tuning = Tuning::default();
        let arena = arena(&tuning);
        let center = arena.center();
        let mut first = enemy_at(center);
        first.dead = true;
        first.hp = 0;
        let mut enemies = vec![first, enemy_at(center)];
        let mut bullets = vec![Bullet::new(center, Vec2::X, &tuning.bullet)];

        update_bullets(&mut bullets, &mut enemies, SIM_DT, &arena);
        assert_eq!(enemies[1].hp, 1);
    }

    #[test]
    fn test_two_hits_kill_enemy() {
        let tuning = Tuning::default();
        let arena = arena(&tuning);
        let center = arena.center();
        let mut enemies = vec![enemy_at(center)];
        let mut bullets = vec![
            Bullet::new(center, Vec2::X, &tuning.bullet),
            Bullet::new(center, Vec2::Y, &tuning.bullet),
        ];
        let kills = update_bullets(&mut bullets, &mut enemies, SIM_DT, &arena);
        assert_eq!(kills, 1);
        assert!(enemies[0].dead);
    }

    #[test]
    fn test_chaser_pursues_player() {
        let tuning = Tuning::default();
        let arena = arena(&tuning);
        let player_pos = arena.center();
        let mut enemies = vec![enemy_at(player_pos + Vec2::new(100.0, 0.0))];
        update_enemies(&mut enemies, player_pos, SIM_DT, &arena, &tuning);
        let moved = 100.0 - (enemies[0].pos.x - player_pos.x);
        assert!((moved - 55.0 * SIM_DT).abs() < 1e-3);
        assert_eq!(enemies[0].pos.y, player_pos.y);
    }

    #[test]
    fn test_patroller_bounces_off_wall() {
        let tuning = Tuning::default();
        let arena = arena(&tuning);
        let mut enemy = enemy_at(Vec2::new(arena.max.x - 20.0, arena.center().y));
        enemy.kind = EnemyKind::Patroller;
        enemy.patrol_dir = Vec2::X;
        let mut enemies = vec![enemy];

        // Player far away, outside aggro radius
        let player_pos = Vec2::new(arena.min.x, arena.min.y);
        for _ in 0..120 {
            update_enemies(&mut enemies, player_pos, SIM_DT, &arena, &tuning);
        }
        assert_eq!(enemies[0].patrol_dir, Vec2::NEG_X);
        assert!(enemies[0].pos.x <= arena.max.x - enemies[0].radius);
        assert!(enemies[0].pos.x < arena.max.x - enemies[0].radius);
    }

    #[test]
    fn test_patroller_drifts_toward_nearby_player() {
        let tuning = Tuning::default();
        let arena = arena(&tuning);
        let start = arena.center();
        let mut enemy = enemy_at(start);
        enemy.kind = EnemyKind::Patroller;
        enemy.patrol_dir = Vec2::X;
        let mut enemies = vec![enemy];

        let player_pos = start + Vec2::new(0.0, 100.0);
        update_enemies(&mut enemies, player_pos, SIM_DT, &arena, &tuning);
        // Patrol along x plus a pull along y
        assert!(enemies[0].pos.x > start.x);
        assert!(enemies[0].pos.y > start.y);
    }

    #[test]
    fn test_patroller_aggro_uses_pre_move_distance() {
        let tuning = Tuning::default();
        let arena = arena(&tuning);
        let start = arena.center();
        let mut enemy = enemy_at(start);
        enemy.kind = EnemyKind::Patroller;
        enemy.patrol_dir = Vec2::X;
        let mut enemies = vec![enemy];

        // Just inside aggro range, patrolling straight away from the player;
        // the patrol step alone would carry it out of range
        let player_pos = start - Vec2::new(tuning.enemy.aggro_radius - 0.1, 0.0);
        update_enemies(&mut enemies, player_pos, SIM_DT, &arena, &tuning);

        let e = &tuning.enemy;
        let net = (e.patrol_speed_factor - e.aggro_pull_factor) * e.speed * SIM_DT;
        assert!((enemies[0].pos.x - (start.x + net)).abs() < 1e-3);
        assert_eq!(enemies[0].pos.y, start.y);
    }

    #[test]
    fn test_double_contact_costs_one_hp() {
        let tuning = Tuning::default();
        let arena = arena(&tuning);
        let mut player = Player::new(&tuning);
        let enemies = vec![
            enemy_at(player.pos + Vec2::new(10.0, 0.0)),
            enemy_at(player.pos + Vec2::new(-10.0, 0.0)),
        ];

        assert!(resolve_contact(&mut player, &enemies, SIM_DT, &arena, &tuning));
        assert_eq!(player.hp, player.max_hp - 1);
        assert_eq!(player.invulnerability, tuning.player.invulnerability);
        // Knocked away from the first enemy (to the left)
        assert!(player.pos.x < arena.center().x);
    }

    #[test]
    fn test_invulnerability_blocks_damage_until_expired() {
        let tuning = Tuning::default();
        let arena = arena(&tuning);
        let mut player = Player::new(&tuning);
        let enemies = vec![enemy_at(player.pos)];

        assert!(resolve_contact(&mut player, &enemies, SIM_DT, &arena, &tuning));
        let enemies = vec![enemy_at(player.pos)];

        let mut ticks = 0;
        while !resolve_contact(&mut player, &enemies, SIM_DT, &arena, &tuning) {
            ticks += 1;
            assert!(ticks < 200, "invulnerability never expired");
        }
        // ~0.9s at 120 Hz
        assert!((106..=109).contains(&ticks), "ticks = {}", ticks);
        assert_eq!(player.hp, player.max_hp - 2);
    }

    #[test]
    fn test_hp_floors_at_zero() {
        let tuning = Tuning::default();
        let arena = arena(&tuning);
        let mut player = Player::new(&tuning);
        player.hp = 0;
        let enemies = vec![enemy_at(player.pos)];
        resolve_contact(&mut player, &enemies, SIM_DT, &arena, &tuning);
        assert_eq!(player.hp, 0);
    }
}
