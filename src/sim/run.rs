//! Run lifecycle: start/restart and the Active -> Cleared / Dead transitions

use super::dungeon::generate;
use super::populate::populate;
use super::state::{GameState, Player, RunPhase};

/// Throw away the current floor and begin a new run.
///
/// Carves and populates a fresh floor from the state's RNG, recreates the
/// player, and puts the cursor back on the spawn cell. Valid from any phase.
pub fn restart(state: &mut GameState) {
    let mut floor = generate(&mut state.rng, &state.tuning.dungeon);
    populate(&mut state.rng, &mut floor, &state.tuning);

    state.cursor = floor.spawn();
    state.floor = floor;
    state.player = Player::new(&state.tuning);
    state.phase = RunPhase::Active;
    state.time_ticks = 0;
    state.run_index += 1;

    log::info!(
        "Run {} started: {} rooms, player hp {}",
        state.run_index,
        state.floor.room_count(),
        state.player.hp
    );
}

/// Settle the run phase after a tick's entity updates.
///
/// Death takes priority over clearing the floor in the same tick. Terminal
/// phases are left alone.
pub fn evaluate(state: &mut GameState) -> RunPhase {
    if state.phase != RunPhase::Active {
        return state.phase;
    }

    if !state.player.is_alive() {
        state.phase = RunPhase::Dead;
        log::info!(
            "Run {} lost after {} ticks ({}/{} rooms cleared)",
            state.run_index,
            state.time_ticks,
            state.floor.cleared_count(),
            state.floor.room_count()
        );
    } else if state.floor.all_cleared() {
        state.phase = RunPhase::Cleared;
        log::info!(
            "Run {} cleared all {} rooms in {} ticks",
            state.run_index,
            state.floor.room_count(),
            state.time_ticks
        );
    }

    state.phase
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn clear_everything(state: &mut GameState) {
        for (_, room) in state.floor.existing_mut() {
            room.enemies.clear();
            room.cleared = true;
        }
    }

    #[test]
    fn test_all_cleared_ends_run() {
        let mut state = GameState::new(1, Tuning::default());
        assert_eq!(evaluate(&mut state), RunPhase::Active);
        clear_everything(&mut state);
        assert_eq!(evaluate(&mut state), RunPhase::Cleared);
    }

    #[test]
    fn test_death_beats_clear() {
        let mut state = GameState::new(2, Tuning::default());
        clear_everything(&mut state);
        state.player.hp = 0;
        assert_eq!(evaluate(&mut state), RunPhase::Dead);
    }

    #[test]
    fn test_terminal_phase_sticks() {
        let mut state = GameState::new(3, Tuning::default());
        state.player.hp = 0;
        evaluate(&mut state);
        state.player.hp = 3;
        clear_everything(&mut state);
        assert_eq!(evaluate(&mut state), RunPhase::Dead);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(4, Tuning::default());
        state.player.hp = 0;
        state.cursor += glam::IVec2::X;
        evaluate(&mut state);
        assert_eq!(state.phase, RunPhase::Dead);

        restart(&mut state);
        assert_eq!(state.phase, RunPhase::Active);
        assert_eq!(state.run_index, 2);
        assert_eq!(state.cursor, state.floor.spawn());
        assert_eq!(state.player.hp, state.player.max_hp);
        assert_eq!(state.time_ticks, 0);
        let spawn = state.current_room().unwrap();
        assert!(spawn.cleared && spawn.enemies.is_empty());
    }
}
