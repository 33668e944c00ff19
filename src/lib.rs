//! Forest Escape - a first-person chase through a haunted forest
//!
//! Core modules:
//! - `sim`: Frame simulation (movement, collisions, keys, door, ghost)
//! - `engine`: Seams to the host engine (scene arena, audio, input, rendering)
//! - `level`: Binds named scene nodes to gameplay roles
//! - `play_mode`: Drives the simulation from engine input and syncs results back
//! - `tuning`: Data-driven game balance

pub mod engine;
pub mod error;
pub mod level;
pub mod play_mode;
pub mod sim;
pub mod tuning;

pub use error::{AudioError, ConfigError, LevelError};
pub use level::{Level, LevelNodes};
pub use play_mode::{Mode, PlayMode};
pub use tuning::Tuning;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Number of keys placed in the forest
    pub const KEY_COUNT: usize = 3;
    /// Keys needed before the door opens
    pub const KEYS_REQUIRED: u8 = 3;

    /// Player walking speed (units/s)
    pub const PLAYER_SPEED: f32 = 10.0;
    /// Camera height above the ground
    pub const EYE_HEIGHT: f32 = 2.0;
    /// Half-extent of a tree's blocking box
    pub const TREE_RADIUS: f32 = 1.5;
    /// Outer wall position on both horizontal axes
    pub const WORLD_BOUND: f32 = 99.0;

    /// Half-extent of a key's pickup box
    pub const KEY_RADIUS: f32 = 1.0;
    /// Door trigger starts at this x
    pub const DOOR_THRESHOLD_X: f32 = 98.0;
    /// Door trigger half-width along y
    pub const DOOR_RADIUS_Y: f32 = 3.0;

    /// Ghost is drawn when within this box around the player
    pub const GHOST_VISIBLE_RADIUS: f32 = 5.0;
    /// Ghost catches the player within this box
    pub const GHOST_CAPTURE_RADIUS: f32 = 2.0;
    /// Seconds for the ghost to close the full gap at its current rate
    pub const GHOST_CLOSE_TIME: f32 = 1.5;

    /// Height used to park hidden objects below the ground
    pub const HIDDEN_Z: f32 = -15.0;

    /// Camera pitch limit (0 looks straight down)
    pub const PITCH_MAX: f32 = std::f32::consts::PI - 0.1;

    /// Ramp time for audio position updates
    pub const AUDIO_RAMP: f32 = 1.0 / 60.0;
    /// Ambient ghost loop volume
    pub const GHOST_LOOP_VOLUME: f32 = 1.0;
    /// Distance at which the ghost loop is at half volume
    pub const GHOST_LOOP_RADIUS: f32 = 10.0;
    /// Volume of the looping stab after capture
    pub const STAB_VOLUME: f32 = 0.75;
    /// Distance at which the stab loop is at half volume
    pub const STAB_RADIUS: f32 = 10.0;

    /// Frame step used by the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// True when `a` and `b` are within `radius` of each other on both x and y
#[inline]
pub fn within_box(a: Vec3, b: Vec3, radius: f32) -> bool {
    (a.x - b.x).abs() <= radius && (a.y - b.y).abs() <= radius
}
