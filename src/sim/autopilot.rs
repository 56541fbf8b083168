//! Idle/demo mode - a simple bot that plays the floor
//!
//! Produces the same `TickInput` a keyboard would, so the simulation cannot
//! tell the difference.

use std::collections::VecDeque;

use glam::{IVec2, Vec2};

use super::dungeon::{Direction, Floor};
use super::state::GameState;
use super::tick::TickInput;
use super::transition::door_rect;
use crate::ROOM_BOUNDS;

/// Closer than this, the bot backs away from an enemy
const PERSONAL_SPACE: f32 = 90.0;
/// Positional slack before the bot presses a movement key
const DEADZONE: f32 = 4.0;
/// Aim snaps to a diagonal when the minor axis is at least this fraction of the major
const DIAGONAL_RATIO: f32 = 0.4;

/// Decide this tick's buttons from the current state
pub fn drive(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    let Some(room) = state.current_room() else {
        return input;
    };
    let player = &state.player;

    let nearest = room.live_enemies().min_by(|a, b| {
        a.pos
            .distance_squared(player.pos)
            .total_cmp(&b.pos.distance_squared(player.pos))
    });

    if let Some(enemy) = nearest {
        aim_at(&mut input, enemy.pos - player.pos);

        let offset = player.pos - enemy.pos;
        if offset.length() < PERSONAL_SPACE + enemy.radius {
            // Back off, sliding toward the room center so we don't get pinned
            let center = ROOM_BOUNDS.center();
            let away = offset.normalize_or_zero() + (center - player.pos).normalize_or_zero() * 0.3;
            steer(&mut input, away * 100.0);
        }
        return input;
    }

    if let Some(dir) = route_to_uncleared(&state.floor, state.cursor) {
        steer(&mut input, door_rect(dir).center() - player.pos);
    }
    input
}

/// First door on the shortest path from `from` to the nearest uncleared room
pub fn route_to_uncleared(floor: &Floor, from: IVec2) -> Option<Direction> {
    let mut queue = VecDeque::from([(from, None::<Direction>)]);
    let mut seen = vec![from];

    while let Some((cell, first_step)) = queue.pop_front() {
        if let Some(room) = floor.get(cell) {
            if room.exists && !room.cleared && first_step.is_some() {
                return first_step;
            }
        }
        for dir in Direction::ALL {
            let Some(next) = floor.through_door(cell, dir) else {
                continue;
            };
            if seen.contains(&next) {
                continue;
            }
            seen.push(next);
            queue.push_back((next, first_step.or(Some(dir))));
        }
    }

    None
}

fn steer(input: &mut TickInput, delta: Vec2) {
    input.move_left = delta.x < -DEADZONE;
    input.move_right = delta.x > DEADZONE;
    input.move_up = delta.y < -DEADZONE;
    input.move_down = delta.y > DEADZONE;
}

fn aim_at(input: &mut TickInput, delta: Vec2) {
    let (ax, ay) = (delta.x.abs(), delta.y.abs());
    let use_x = ax >= ay || ax >= ay * DIAGONAL_RATIO;
    let use_y = ay > ax || ay >= ax * DIAGONAL_RATIO;
    input.shoot_left = use_x && delta.x < 0.0;
    input.shoot_right = use_x && delta.x > 0.0;
    input.shoot_up = use_y && delta.y < 0.0;
    input.shoot_down = use_y && delta.y > 0.0;
}
