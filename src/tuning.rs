//! Game balance values
//!
//! Every gameplay distance, speed and threshold lives here so a level can be
//! re-tuned from a JSON file without a rebuild. Defaults come from [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    /// Walking speed (units/s)
    pub player_speed: f32,
    /// Fixed camera height
    pub eye_height: f32,
    /// Tree blocking half-extent
    pub tree_radius: f32,
    /// Outer wall position (both axes, both signs)
    pub world_bound: f32,
    /// Camera pitch limit
    pub pitch_max: f32,

    // === Objectives ===
    /// Key pickup half-extent
    pub key_radius: f32,
    /// Keys needed to open the door
    pub keys_required: u8,
    /// Door trigger starts at this x
    pub door_threshold_x: f32,
    /// Door trigger half-width along y
    pub door_radius_y: f32,

    // === Ghost ===
    /// Ghost drawn within this box
    pub ghost_visible_radius: f32,
    /// Ghost catches within this box
    pub ghost_capture_radius: f32,
    /// Seconds to close the full gap at the current rate
    pub ghost_close_time: f32,

    // === Presentation ===
    /// Height where hidden objects are parked
    pub hidden_z: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            eye_height: EYE_HEIGHT,
            tree_radius: TREE_RADIUS,
            world_bound: WORLD_BOUND,
            pitch_max: PITCH_MAX,

            key_radius: KEY_RADIUS,
            keys_required: KEYS_REQUIRED,
            door_threshold_x: DOOR_THRESHOLD_X,
            door_radius_y: DOOR_RADIUS_Y,

            ghost_visible_radius: GHOST_VISIBLE_RADIUS,
            ghost_capture_radius: GHOST_CAPTURE_RADIUS,
            ghost_close_time: GHOST_CLOSE_TIME,

            hidden_z: HIDDEN_Z,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would make the level unplayable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("player_speed", self.player_speed),
            ("tree_radius", self.tree_radius),
            ("world_bound", self.world_bound),
            ("key_radius", self.key_radius),
            ("door_radius_y", self.door_radius_y),
            ("ghost_visible_radius", self.ghost_visible_radius),
            ("ghost_capture_radius", self.ghost_capture_radius),
            ("ghost_close_time", self.ghost_close_time),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }

        if usize::from(self.keys_required) > KEY_COUNT {
            return Err(ConfigError::Invalid(format!(
                "keys_required is {} but the forest only has {KEY_COUNT} keys",
                self.keys_required
            )));
        }

        if self.ghost_capture_radius > self.ghost_visible_radius {
            log::warn!(
                "ghost_capture_radius {} exceeds ghost_visible_radius {}: unseen strikes",
                self.ghost_capture_radius,
                self.ghost_visible_radius
            );
        }

        if !(0.0..=std::f32::consts::PI).contains(&self.pitch_max) {
            return Err(ConfigError::Invalid(format!(
                "pitch_max must lie in [0, π], got {}",
                self.pitch_max
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.keys_required, 3);
        assert_eq!(tuning.world_bound, 99.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_speed": 12.5 }"#).unwrap();
        assert_eq!(tuning.player_speed, 12.5);
        assert_eq!(tuning.tree_radius, TREE_RADIUS);
        assert_eq!(tuning.ghost_capture_radius, GHOST_CAPTURE_RADIUS);
    }

    #[test]
    fn test_rejects_unwinnable_key_requirement() {
        let err = Tuning::from_json(r#"{ "keys_required": 4 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_non_positive_radius() {
        let err = Tuning::from_json(r#"{ "tree_radius": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ player_speed: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Tuning::load("/definitely/not/here/tuning.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
