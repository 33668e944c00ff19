//! First-person movement
//!
//! Held buttons move the player in the camera's frame at a fixed speed, then
//! the move is checked against trees and the outer walls.

use glam::Vec3;

use super::collision::{ObstacleSet, resolve_trees, resolve_walls};
use super::input::MoveButtons;
use crate::tuning::Tuning;

/// Camera axes in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    pub right: Vec3,
    pub forward: Vec3,
}

impl Default for CameraFrame {
    /// Identity camera: right is +X, forward is -Z
    fn default() -> Self {
        Self {
            right: Vec3::X,
            forward: Vec3::NEG_Z,
        }
    }
}

/// Advance the player by one frame and resolve collisions
///
/// The returned position always has `z == tuning.eye_height`.
pub fn step_player(
    position: Vec3,
    buttons: MoveButtons,
    frame: CameraFrame,
    trees: &ObstacleSet,
    tuning: &Tuning,
    dt: f32,
) -> Vec3 {
    let step = buttons.direction() * tuning.player_speed * dt;

    let old = position;
    let mut moved = position + step.x * frame.right + step.y * frame.forward;
    moved.z = tuning.eye_height;

    let moved = resolve_trees(old, moved, trees, tuning.tree_radius);
    resolve_walls(old, moved, tuning.world_bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn level_frame() -> CameraFrame {
        // Looking along +X at the horizon
        CameraFrame {
            right: Vec3::NEG_Y,
            forward: Vec3::X,
        }
    }

    fn forward() -> MoveButtons {
        MoveButtons {
            up: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_walks_forward_at_speed() {
        let tuning = Tuning::default();
        let open = ObstacleSet::new();
        let p = step_player(Vec3::ZERO, forward(), level_frame(), &open, &tuning, 0.5);
        assert!((p.x - 5.0).abs() < 1e-5);
        assert_eq!(p.y, 0.0);
        assert_eq!(p.z, tuning.eye_height);
    }

    #[test]
    fn test_strafe_uses_camera_right() {
        let tuning = Tuning::default();
        let buttons = MoveButtons {
            right: true,
            ..Default::default()
        };
        let p = step_player(Vec3::ZERO, buttons, level_frame(), &ObstacleSet::new(), &tuning, 0.1);
        assert!((p.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_idle_snaps_to_eye_height() {
        let tuning = Tuning::default();
        let start = Vec3::new(3.0, 4.0, 7.5);
        let idle = MoveButtons::default();
        let p = step_player(start, idle, level_frame(), &ObstacleSet::new(), &tuning, 0.1);
        assert_eq!(p, Vec3::new(3.0, 4.0, tuning.eye_height));
    }

    #[test]
    fn test_pitched_camera_still_walks_on_ground() {
        // Looking down at 45°: forward has a -Z part that the height clamp discards
        let tuning = Tuning::default();
        let frame = CameraFrame {
            right: Vec3::NEG_Y,
            forward: Vec3::new(1.0, 0.0, -1.0).normalize(),
        };
        let start = Vec3::new(0.0, 0.0, 2.0);
        let p = step_player(start, forward(), frame, &ObstacleSet::new(), &tuning, 1.0);
        assert_eq!(p.z, 2.0);
        assert!((p.x - 10.0 * std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-4);
    }

    #[test]
    fn test_blocked_by_tree() {
        let tuning = Tuning::default();
        let trees: ObstacleSet = [Vec2::new(10.0, 0.0)].into_iter().collect();
        let start = Vec3::new(8.4, 0.0, 2.0);
        let p = step_player(start, forward(), level_frame(), &trees, &tuning, 1.0 / 60.0);
        assert_eq!(p, start);
    }

    #[test]
    fn test_blocked_by_wall() {
        let tuning = Tuning::default();
        let start = Vec3::new(98.9, 0.0, 2.0);
        let open = ObstacleSet::new();
        let p = step_player(start, forward(), level_frame(), &open, &tuning, 1.0 / 60.0);
        assert_eq!(p.x, 98.9);
    }
}
