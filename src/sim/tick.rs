//! Per-frame simulation step
//!
//! Order within a frame: move the player, collect keys, check the door, then
//! move the ghost. A finished run is frozen: later ticks change nothing.

use super::input::MoveButtons;
use super::objectives::{DoorCheck, collect_keys};
use super::player::{CameraFrame, step_player};
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Held movement buttons
    pub buttons: MoveButtons,
    /// Camera axes the move is relative to
    pub frame: CameraFrame,
}

/// Advance the game state by `dt` seconds and report what happened
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase.is_over() {
        return events;
    }

    state.time_ticks += 1;

    state.player = step_player(
        state.player,
        input.buttons,
        input.frame,
        &state.trees,
        &state.tuning,
        dt,
    );

    for index in collect_keys(&mut state.keys, state.player, state.tuning.key_radius) {
        state.keys_held += 1;
        log::debug!("Key {index} collected ({} held)", state.keys_held);
        events.push(GameEvent::KeyCollected {
            index,
            held: state.keys_held,
        });
    }

    match state.door.check(state.player, state.keys_held, &state.tuning) {
        DoorCheck::Opened => {
            state.phase = GamePhase::Won;
            log::info!("You win! Escaped after {} ticks", state.time_ticks);
            events.push(GameEvent::Escaped);
            return events;
        }
        DoorCheck::Locked => {
            log::info!(
                "Door is locked ({}/{} keys)",
                state.keys_held,
                state.tuning.keys_required
            );
            events.push(GameEvent::DoorLocked {
                held: state.keys_held,
            });
        }
        DoorCheck::StillLocked | DoorCheck::Away => {}
    }

    let was_visible = state.ghost.visible;
    let step = state.ghost.update(state.player, &state.tuning, dt);
    if step.visible != was_visible {
        log::debug!("Ghost {}", if step.visible { "revealed" } else { "hidden" });
        events.push(if step.visible {
            GameEvent::GhostRevealed
        } else {
            GameEvent::GhostHidden
        });
    }

    if step.caught {
        state.phase = GamePhase::Lost;
        log::info!("Game over. You got stabbed.");
        events.push(GameEvent::Caught { at: state.player });
    }

    events
}
