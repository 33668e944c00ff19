//! Keys and the door
//!
//! Walking into a key's box collects it for good. The door only opens once
//! enough keys are held; bumping it earlier reports "locked" once per visit.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;
use crate::within_box;

/// A collectible key
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub position: Vec3,
    pub picked: bool,
}

impl Pickup {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            picked: false,
        }
    }

    /// Where the key should be drawn (under the ground once collected)
    pub fn shown_position(&self, hidden_z: f32) -> Vec3 {
        if self.picked {
            Vec3::new(self.position.x, self.position.y, hidden_z)
        } else {
            self.position
        }
    }
}

/// Collect every uncollected key the player stands on; returns their indices
pub fn collect_keys(keys: &mut [Pickup], player: Vec3, radius: f32) -> Vec<usize> {
    let mut collected = Vec::new();
    for (i, key) in keys.iter_mut().enumerate() {
        if !key.picked && within_box(player, key.position, radius) {
            key.picked = true;
            collected.push(i);
        }
    }
    collected
}

/// Result of checking the player against the door
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorCheck {
    /// Player is not at the door
    Away,
    /// First frame of a visit without enough keys
    Locked,
    /// Still at the door, still locked, already reported
    StillLocked,
    /// Enough keys: the player is through
    Opened,
}

/// The exit door
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoorGate {
    pub position: Vec3,
    /// Latched while the player stays at a locked door
    pub contact: bool,
}

impl DoorGate {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            contact: false,
        }
    }

    /// True when `player` is inside the door trigger
    pub fn at_door(&self, player: Vec3, tuning: &Tuning) -> bool {
        player.x >= tuning.door_threshold_x
            && (player.y - self.position.y).abs() <= tuning.door_radius_y
    }

    pub fn check(&mut self, player: Vec3, keys_held: u8, tuning: &Tuning) -> DoorCheck {
        if !self.at_door(player, tuning) {
            self.contact = false;
            return DoorCheck::Away;
        }
        if keys_held >= tuning.keys_required {
            DoorCheck::Opened
        } else if !self.contact {
            self.contact = true;
            DoorCheck::Locked
        } else {
            DoorCheck::StillLocked
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_each_key_once() {
        let mut keys = [
            Pickup::new(Vec3::new(10.0, 0.0, 1.0)),
            Pickup::new(Vec3::new(10.5, 0.5, 1.0)),
            Pickup::new(Vec3::new(-30.0, 0.0, 1.0)),
        ];
        let player = Vec3::new(10.2, 0.2, 2.0);
        assert_eq!(collect_keys(&mut keys, player, 1.0), vec![0, 1]);
        assert!(collect_keys(&mut keys, player, 1.0).is_empty());
        assert!(!keys[2].picked);
        assert_eq!(keys[0].shown_position(-15.0), Vec3::new(10.0, 0.0, -15.0));
        assert_eq!(keys[2].shown_position(-15.0), keys[2].position);
    }

    #[test]
    fn test_key_box_edges() {
        let mut keys = [Pickup::new(Vec3::ZERO)];
        assert!(collect_keys(&mut keys, Vec3::new(1.01, 0.0, 2.0), 1.0).is_empty());
        assert_eq!(collect_keys(&mut keys, Vec3::new(1.0, -1.0, 2.0), 1.0), vec![0]);
    }

    #[test]
    fn test_locked_reported_once_per_visit() {
        let tuning = Tuning::default();
        let mut door = DoorGate::new(Vec3::new(99.0, 10.0, 0.0));
        let at = Vec3::new(98.5, 11.0, 2.0);
        let away = Vec3::new(90.0, 11.0, 2.0);

        assert_eq!(door.check(at, 2, &tuning), DoorCheck::Locked);
        assert_eq!(door.check(at, 2, &tuning), DoorCheck::StillLocked);
        assert_eq!(door.check(away, 2, &tuning), DoorCheck::Away);
        assert!(!door.contact);
        assert_eq!(door.check(at, 2, &tuning), DoorCheck::Locked);
    }

    #[test]
    fn test_opens_with_all_keys() {
        let tuning = Tuning::default();
        let mut door = DoorGate::new(Vec3::new(99.0, 0.0, 0.0));
        assert_eq!(door.check(Vec3::new(98.0, -3.0, 2.0), 3, &tuning), DoorCheck::Opened);
    }

    #[test]
    fn test_door_trigger_needs_both_axes() {
        let tuning = Tuning::default();
        let mut door = DoorGate::new(Vec3::new(99.0, 0.0, 0.0));
        assert_eq!(door.check(Vec3::new(97.9, 0.0, 2.0), 3, &tuning), DoorCheck::Away);
        assert_eq!(door.check(Vec3::new(98.5, 3.5, 2.0), 3, &tuning), DoorCheck::Away);
    }
}
