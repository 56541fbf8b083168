//! Door geometry and room-to-room traversal

use glam::{IVec2, Vec2};

use super::dungeon::{Direction, Floor};
use super::geom::{Rect, circle_rect_overlap};
use super::state::Player;
use crate::ROOM_BOUNDS;
use crate::consts::{DOOR_H, DOOR_W};
use crate::tuning::RoomTuning;

/// Directions are tried in this order; the first match wins
pub const TRAVERSAL_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Door rectangle on the wall facing `dir`, poking 2px outside the wall
pub fn door_rect(dir: Direction) -> Rect {
    let b = ROOM_BOUNDS;
    let mid_x = b.center().x;
    let mid_y = b.center().y;
    let half = DOOR_W / 2.0;
    match dir {
        Direction::Up => Rect::new(mid_x - half, b.min.y - 2.0, mid_x + half, b.min.y + DOOR_H),
        Direction::Down => Rect::new(mid_x - half, b.max.y - DOOR_H, mid_x + half, b.max.y + 2.0),
        Direction::Left => Rect::new(b.min.x - 2.0, mid_y - half, b.min.x + DOOR_H, mid_y + half),
        Direction::Right => Rect::new(b.max.x - DOOR_H, mid_y - half, b.max.x + 2.0, mid_y + half),
    }
}

/// Where the player lands after walking through the door on `dir`: inset from
/// the opposite wall of the new room so the return door is not touched
pub fn entry_point(dir: Direction, inset: f32) -> Vec2 {
    let b = ROOM_BOUNDS;
    let center = b.center();
    match dir {
        Direction::Up => Vec2::new(center.x, b.max.y - inset),
        Direction::Down => Vec2::new(center.x, b.min.y + inset),
        Direction::Left => Vec2::new(b.max.x - inset, center.y),
        Direction::Right => Vec2::new(b.min.x + inset, center.y),
    }
}

/// Attempt one door traversal out of `cursor`.
///
/// Locked doors (current room not cleared) reject every attempt regardless of
/// where the player stands. On success the cursor moves to the neighbor, the
/// player is placed at the matching entry point, and the direction is returned.
pub fn try_traverse(
    floor: &Floor,
    cursor: &mut IVec2,
    player: &mut Player,
    tuning: &RoomTuning,
) -> Option<Direction> {
    let room = floor.get(*cursor)?;
    if !room.cleared {
        return None;
    }

    for dir in TRAVERSAL_ORDER {
        let Some(next) = floor.through_door(*cursor, dir) else {
            continue;
        };
        let reach = door_rect(dir).inflate(tuning.door_margin);
        if circle_rect_overlap(player.pos, player.radius, &reach) {
            log::debug!("Moved {:?}: room {} -> {}", dir, *cursor, next);
            *cursor = next;
            player.pos = entry_point(dir, tuning.entry_inset);
            return Some(dir);
        }
    }

    None
}
