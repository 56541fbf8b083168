//! Floor layout: the room grid, doors, and procedural carving
//!
//! A floor is a fixed grid of cells. Existing cells form a tree rooted at the
//! spawn cell, with a door on each side of every carved edge.

use glam::IVec2;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use super::state::Enemy;
use crate::tuning::{DungeonTuning, MAX_GRID_SIDE};

/// Cardinal direction between grid cells (screen space: Up is -y)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Slot in a room's door array
    pub const fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Grid step for this direction
    pub const fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Right => IVec2::new(1, 0),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
        }
    }
}

/// One grid cell
#[derive(Debug, Clone, Default)]
pub struct Room {
    pub exists: bool,
    /// Monotonic within a run: set once the enemy list empties
    pub cleared: bool,
    pub boss: bool,
    /// Indexed by `Direction::index`
    pub doors: [bool; 4],
    pub enemies: Vec<Enemy>,
}

impl Room {
    pub fn has_door(&self, dir: Direction) -> bool {
        self.doors[dir.index()]
    }

    /// Drop dead enemies, then mark the room cleared if none remain
    pub fn refresh_cleared(&mut self) {
        self.enemies.retain(|e| !e.dead);
        if self.enemies.is_empty() {
            self.cleared = true;
        }
    }

    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| !e.dead)
    }
}

/// The room grid for one run
#[derive(Debug, Clone)]
pub struct Floor {
    width: i32,
    height: i32,
    spawn: IVec2,
    /// Row-major, `width * height` cells
    rooms: Vec<Room>,
}

impl Floor {
    /// Empty grid with the spawn cell at the center (nothing exists yet).
    /// Sides are clamped to `1..=MAX_GRID_SIDE`.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.clamp(1, MAX_GRID_SIDE);
        let height = height.clamp(1, MAX_GRID_SIDE);
        Self {
            width,
            height,
            spawn: IVec2::new(width / 2, height / 2),
            rooms: vec![Room::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn spawn(&self) -> IVec2 {
        self.spawn
    }

    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| (cell.y * self.width + cell.x) as usize)
    }

    pub fn get(&self, cell: IVec2) -> Option<&Room> {
        self.index(cell).map(|i| &self.rooms[i])
    }

    pub fn get_mut(&mut self, cell: IVec2) -> Option<&mut Room> {
        self.index(cell).map(|i| &mut self.rooms[i])
    }

    pub fn exists(&self, cell: IVec2) -> bool {
        self.get(cell).is_some_and(|r| r.exists)
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, &Room)> {
        let width = self.width;
        self.rooms
            .iter()
            .enumerate()
            .map(move |(i, room)| (IVec2::new(i as i32 % width, i as i32 / width), room))
    }

    /// Existing rooms in row-major order
    pub fn existing(&self) -> impl Iterator<Item = (IVec2, &Room)> {
        self.cells().filter(|(_, room)| room.exists)
    }

    pub fn existing_mut(&mut self) -> impl Iterator<Item = (IVec2, &mut Room)> {
        let width = self.width;
        self.rooms
            .iter_mut()
            .enumerate()
            .filter(|(_, room)| room.exists)
            .map(move |(i, room)| (IVec2::new(i as i32 % width, i as i32 / width), room))
    }

    pub fn room_count(&self) -> usize {
        self.rooms.iter().filter(|r| r.exists).count()
    }

    pub fn cleared_count(&self) -> usize {
        self.rooms.iter().filter(|r| r.exists && r.cleared).count()
    }

    /// True when every existing room is cleared (false for an empty grid)
    pub fn all_cleared(&self) -> bool {
        let mut any = false;
        for room in self.rooms.iter().filter(|r| r.exists) {
            if !room.cleared {
                return false;
            }
            any = true;
        }
        any
    }

    pub fn boss_cell(&self) -> Option<IVec2> {
        self.existing().find(|(_, r)| r.boss).map(|(c, _)| c)
    }

    /// Existing in-bounds neighbor in `dir`
    pub fn neighbor(&self, cell: IVec2, dir: Direction) -> Option<IVec2> {
        let next = cell + dir.offset();
        self.exists(next).then_some(next)
    }

    /// Cell reached by walking through the door on `dir`, if that door exists
    pub fn through_door(&self, cell: IVec2, dir: Direction) -> Option<IVec2> {
        let room = self.get(cell)?;
        if !room.has_door(dir) {
            return None;
        }
        self.neighbor(cell, dir)
    }

    /// Mark `cell` and its neighbor in `dir` as existing and join them with a
    /// door pair. Returns false (and changes nothing) if the neighbor is off-grid.
    pub fn connect(&mut self, cell: IVec2, dir: Direction) -> bool {
        let next = cell + dir.offset();
        let (Some(a), Some(b)) = (self.index(cell), self.index(next)) else {
            return false;
        };
        self.rooms[a].exists = true;
        self.rooms[a].doors[dir.index()] = true;
        self.rooms[b].exists = true;
        self.rooms[b].doors[dir.opposite().index()] = true;
        true
    }

    /// Flag the existing room farthest from spawn (squared grid distance) as
    /// the boss room. Ties go to the first room in row-major order.
    pub fn place_boss(&mut self) -> IVec2 {
        let spawn = self.spawn;
        let mut best = spawn;
        let mut best_dist = -1;
        for (cell, _) in self.existing() {
            let dist = (cell - spawn).length_squared();
            if dist > best_dist {
                best_dist = dist;
                best = cell;
            }
        }
        for room in &mut self.rooms {
            room.boss = false;
        }
        if let Some(room) = self.get_mut(best) {
            room.boss = true;
        }
        best
    }
}

/// Randomized depth-first carve from the spawn cell.
///
/// Stops once `target` rooms exist or the frontier stack empties; the latter
/// can leave fewer rooms than requested.
pub fn carve<R: Rng + ?Sized>(rng: &mut R, width: i32, height: i32, target: u32) -> Floor {
    let mut floor = Floor::new(width, height);
    let spawn = floor.spawn();
    if let Some(room) = floor.get_mut(spawn) {
        room.exists = true;
    }

    let mut stack = vec![spawn];
    let mut made = 1u32;

    while made < target {
        let Some(&current) = stack.last() else {
            break;
        };

        let mut dirs = Direction::ALL;
        dirs.shuffle(rng);

        let next = dirs.into_iter().find_map(|dir| {
            let next = current + dir.offset();
            (floor.in_bounds(next) && !floor.exists(next)).then_some((dir, next))
        });

        match next {
            Some((dir, cell)) => {
                floor.connect(current, dir);
                stack.push(cell);
                made += 1;
            }
            None => {
                stack.pop();
            }
        }
    }

    if made < target {
        log::debug!("Carve stalled at {} of {} rooms", made, target);
    }

    floor
}

/// Build a fresh floor: pick a target size, carve it, and place the boss
pub fn generate<R: Rng + ?Sized>(rng: &mut R, tuning: &DungeonTuning) -> Floor {
    let target = rng.random_range(tuning.min_rooms..=tuning.max_rooms);
    let mut floor = carve(rng, tuning.grid_width, tuning.grid_height, target);
    let boss = floor.place_boss();
    log::info!(
        "Floor generated: {} rooms (target {}), spawn {}, boss {}",
        floor.room_count(),
        target,
        floor.spawn(),
        boss
    );
    floor
}
