//! Game state and core simulation types
//!
//! Everything the frame simulation reads or writes lives in [`GameState`].

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::ObstacleSet;
use super::objectives::{DoorGate, Pickup};
use super::pursuer::Pursuer;
use crate::consts::KEY_COUNT;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Player got through the door with every key
    Won,
    /// Ghost caught the player
    Lost,
}

impl GamePhase {
    /// Won or lost: the simulation is frozen
    pub fn is_over(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Something that happened during a tick, for sound and logging
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Key `index` collected, `held` keys now in hand
    KeyCollected { index: usize, held: u8 },
    /// Door touched without enough keys
    DoorLocked { held: u8 },
    /// Door opened: run won
    Escaped,
    /// Ghost came into view
    GhostRevealed,
    /// Ghost left view
    GhostHidden,
    /// Ghost caught the player at `at`: run lost
    Caught { at: Vec3 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Player (camera) position
    pub player: Vec3,
    /// The ghost
    pub ghost: Pursuer,
    /// Keys in the forest
    pub keys: [Pickup; KEY_COUNT],
    /// Keys collected so far
    pub keys_held: u8,
    /// Exit door
    pub door: DoorGate,
    /// Tree positions
    pub trees: ObstacleSet,
    /// Balance values
    pub tuning: Tuning,
}

impl GameState {
    /// Fresh run: nothing collected, ghost hidden at its spawn
    pub fn new(
        player: Vec3,
        ghost: Vec3,
        door: Vec3,
        keys: [Vec3; KEY_COUNT],
        trees: ObstacleSet,
        tuning: Tuning,
    ) -> Self {
        Self {
            phase: GamePhase::Playing,
            time_ticks: 0,
            player,
            ghost: Pursuer::new(ghost, tuning.hidden_z),
            keys: keys.map(Pickup::new),
            keys_held: 0,
            door: DoorGate::new(door),
            trees,
            tuning,
        }
    }

    /// JSON snapshot for debugging
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
