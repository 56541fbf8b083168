//! Fixed timestep simulation tick
//!
//! Core game loop step that advances the run deterministically.

use glam::Vec2;

use super::combat;
use super::run;
use super::state::{GameState, RunPhase};
use super::transition;
use crate::{ROOM_BOUNDS, dpad_direction};

/// Held buttons for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub shoot_up: bool,
    pub shoot_down: bool,
    pub shoot_left: bool,
    pub shoot_right: bool,
}

impl TickInput {
    /// Unit movement direction (zero when idle)
    pub fn move_dir(&self) -> Vec2 {
        dpad_direction(self.move_up, self.move_down, self.move_left, self.move_right)
    }

    /// Unit aim direction (zero when not shooting)
    pub fn aim_dir(&self) -> Vec2 {
        dpad_direction(self.shoot_up, self.shoot_down, self.shoot_left, self.shoot_right)
    }
}

/// Advance the run by one fixed timestep.
///
/// Phase order within a tick:
/// 1. input resolution
/// 2. player movement (clamped) and shooting
/// 3. enemy AI
/// 4. bullet integration and hits
/// 5. player-enemy contact damage
/// 6. dead-enemy culling and cleared flag
/// 7. door traversal
/// 8. run phase (death first, then floor clear)
///
/// Does nothing once the run is over.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != RunPhase::Active {
        return;
    }

    state.time_ticks += 1;

    let move_dir = input.move_dir();
    let aim_dir = input.aim_dir();
    let arena = ROOM_BOUNDS.inset(state.tuning.room.wall_margin);

    {
        let GameState {
            floor,
            cursor,
            player,
            tuning,
            ..
        } = state;

        let Some(room) = floor.get_mut(*cursor) else {
            log::error!("Room cursor {} is off the floor", cursor);
            return;
        };

        combat::move_player(player, move_dir, dt, &arena);
        combat::fire(player, aim_dir, dt, tuning);

        combat::update_enemies(&mut room.enemies, player.pos, dt, &arena, tuning);
        combat::update_bullets(&mut player.bullets, &mut room.enemies, dt, &arena);
        combat::resolve_contact(player, &room.enemies, dt, &arena, tuning);

        let was_cleared = room.cleared;
        room.refresh_cleared();
        if room.cleared && !was_cleared {
            log::info!("Room {} cleared", cursor);
        }
    }

    // Live bullets keep flying after a transition
    transition::try_traverse(
        &state.floor,
        &mut state.cursor,
        &mut state.player,
        &state.tuning.room,
    );

    run::evaluate(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::dungeon::{Direction, Floor};
    use crate::sim::state::Enemy;
    use crate::sim::transition::door_rect;
    use crate::tuning::Tuning;
    use glam::IVec2;

    /// Two-room floor: spawn (1,1) with a door up to (1,0)
    fn two_room_state() -> GameState {
        let mut state = GameState::new(12345, Tuning::default());
        let mut floor = Floor::new(3, 3);
        floor.connect(IVec2::new(1, 1), Direction::Up);
        floor.get_mut(IVec2::new(1, 1)).unwrap().cleared = true;
        floor.place_boss();
        state.floor = floor;
        state.cursor = IVec2::new(1, 1);
        state
    }

    fn hold_up() -> TickInput {
        TickInput {
            move_up: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_walk_up_into_next_room() {
        let mut state = two_room_state();
        for _ in 0..240 {
            tick(&mut state, &hold_up(), SIM_DT);
            if state.cursor != IVec2::new(1, 1) {
                break;
            }
        }
        assert_eq!(state.cursor, IVec2::new(1, 0));
    }

    #[test]
    fn test_bullets_survive_room_transition() {
        let mut state = two_room_state();
        let arena = ROOM_BOUNDS.inset(state.tuning.room.wall_margin);
        let radius = state.player.radius;
        state.player.pos = arena.clamp_circle(door_rect(Direction::Up).center(), radius);
        let bullet_start = arena.center();
        let bullet = crate::sim::state::Bullet::new(bullet_start, Vec2::X, &state.tuning.bullet);
        state.player.bullets.push(bullet);

        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.cursor, IVec2::new(1, 0));
        assert_eq!(state.player.bullets.len(), 1);
        assert!(state.player.bullets[0].pos.x > bullet_start.x);
    }

    #[test]
    fn test_locked_room_keeps_player_in() {
        let mut state = two_room_state();
        let target = state.floor.get_mut(IVec2::new(1, 0)).unwrap();
        target.enemies.push(Enemy {
            pos: door_rect(Direction::Left).center() + glam::Vec2::new(100.0, 0.0),
            ..Default::default()
        });
        target.cleared = false;
        state.cursor = IVec2::new(1, 0);
        state.player.pos = door_rect(Direction::Down).center();

        for _ in 0..10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.cursor, IVec2::new(1, 0));
    }

    #[test]
    fn test_kill_last_enemy_unlocks_same_tick() {
        let mut state = two_room_state();
        // Put the player in the upper room, against its only door, with one
        // enemy one hit from death sitting on a bullet
        state.cursor = IVec2::new(1, 0);
        let arena = ROOM_BOUNDS.inset(state.tuning.room.wall_margin);
        let radius = state.player.radius;
        state.player.pos = arena.clamp_circle(door_rect(Direction::Down).center(), radius);
        let enemy_pos = Vec2::new(arena.min.x + 40.0, arena.min.y + 40.0);
        {
            let room = state.floor.get_mut(IVec2::new(1, 0)).unwrap();
            room.cleared = false;
            room.enemies = vec![Enemy {
                pos: enemy_pos,
                hp: 1,
                ..Default::default()
            }];
        }
        let mut bullet = crate::sim::state::Bullet::new(enemy_pos, Vec2::X, &state.tuning.bullet);
        bullet.vel = Vec2::ZERO;
        state.player.bullets.push(bullet);

        tick(&mut state, &TickInput::default(), SIM_DT);

        // Cleared, unlocked and walked through in one step
        assert!(state.floor.get(IVec2::new(1, 0)).unwrap().cleared);
        assert_eq!(state.cursor, IVec2::new(1, 1));
        assert_eq!(state.phase, RunPhase::Cleared);
    }

    #[test]
    fn test_no_simulation_after_run_over() {
        let mut state = two_room_state();
        state.phase = RunPhase::Dead;
        let pos = state.player.pos;
        tick(&mut state, &hold_up(), SIM_DT);
        assert_eq!(state.player.pos, pos);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_lethal_contact_ends_run_same_tick() {
        let mut state = two_room_state();
        state.cursor = IVec2::new(1, 0);
        state.player.hp = 1;
        let pos = state.player.pos;
        {
            let room = state.floor.get_mut(IVec2::new(1, 0)).unwrap();
            room.enemies = vec![Enemy {
                pos,
                ..Default::default()
            }];
        }
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.player.hp, 0);
        assert_eq!(state.phase, RunPhase::Dead);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, Tuning::default());
        let mut state2 = GameState::new(99999, Tuning::default());

        let inputs = [
            TickInput {
                move_right: true,
                shoot_up: true,
                ..Default::default()
            },
            hold_up(),
            TickInput {
                shoot_left: true,
                move_down: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input, SIM_DT);
                tick(&mut state2, input, SIM_DT);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.cursor, state2.cursor);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.player.bullets.len(), state2.player.bullets.len());
    }
}
