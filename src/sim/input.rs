//! Input tracking
//!
//! Directional buttons keep both a held flag and a count of presses since the
//! last frame. Mouse look turns relative motion into a new camera rotation.

use glam::{EulerRot, Quat, Vec2};
use serde::{Deserialize, Serialize};

/// One tracked button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Presses since the last update
    pub downs: u8,
    pub pressed: bool,
}

impl Button {
    pub fn press(&mut self) {
        self.downs = self.downs.saturating_add(1);
        self.pressed = true;
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }
}

/// Which directions are held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveButtons {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MoveButtons {
    /// Combine held directions into a unit-or-zero move (x right, y forward).
    /// Opposite directions cancel.
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.left && !self.right {
            dir.x = -1.0;
        }
        if !self.left && self.right {
            dir.x = 1.0;
        }
        if self.down && !self.up {
            dir.y = -1.0;
        }
        if !self.down && self.up {
            dir.y = 1.0;
        }
        // Diagonals are no faster than straight moves
        dir.normalize_or_zero()
    }
}

/// The four movement buttons
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputTracker {
    pub left: Button,
    pub right: Button,
    pub up: Button,
    pub down: Button,
}

impl InputTracker {
    pub fn buttons(&self) -> MoveButtons {
        MoveButtons {
            left: self.left.pressed,
            right: self.right.pressed,
            up: self.up.pressed,
            down: self.down.pressed,
        }
    }

    /// Clear press counts (end of every simulated frame)
    pub fn reset_downs(&mut self) {
        self.left.downs = 0;
        self.right.downs = 0;
        self.up.downs = 0;
        self.down.downs = 0;
    }
}

/// Apply mouse-look to a camera rotation
///
/// `motion` is relative motion divided by window height, y pointing up. Yaw
/// turns about world +Z; pitch is clamped to `[0, pitch_max]`, where 0 looks
/// straight down and π/2 looks at the horizon.
pub fn look(rotation: Quat, motion: Vec2, fovy: f32, pitch_max: f32) -> Quat {
    let (mut yaw, roll, mut pitch) = rotation.to_euler(EulerRot::ZYX);

    yaw += -motion.x * fovy;

    pitch += motion.y * fovy;
    pitch = pitch.clamp(0.0, pitch_max);

    Quat::from_euler(EulerRot::ZYX, yaw, roll, pitch).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_direction_cancels_and_normalizes() {
        let both = MoveButtons {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(both.direction(), Vec2::ZERO);

        let diagonal = MoveButtons {
            right: true,
            up: true,
            ..Default::default()
        };
        let dir = diagonal.direction();
        assert!((dir.length() - 1.0).abs() < 1e-6);
        assert!(dir.x > 0.0 && dir.y > 0.0);

        let back = MoveButtons {
            down: true,
            ..Default::default()
        };
        assert_eq!(back.direction(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_button_counts() {
        let mut input = InputTracker::default();
        input.up.press();
        input.up.release();
        input.up.press();
        assert_eq!(input.up.downs, 2);
        assert!(input.buttons().up);
        input.reset_downs();
        assert_eq!(input.up.downs, 0);
        assert!(input.up.pressed);
    }

    #[test]
    fn test_look_yaw() {
        let start = Quat::from_rotation_z(0.3) * Quat::from_rotation_x(FRAC_PI_2);
        let turned = look(start, Vec2::new(0.1, 0.0), 1.0, PI - 0.1);
        let (yaw, _, pitch) = turned.to_euler(EulerRot::ZYX);
        assert!((yaw - 0.2).abs() < 1e-4);
        assert!((pitch - FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn test_look_pitch_clamped() {
        let start = Quat::from_rotation_x(FRAC_PI_2);
        let up = look(start, Vec2::new(0.0, 10.0), 1.0, PI - 0.1);
        let (_, _, pitch) = up.to_euler(EulerRot::ZYX);
        assert!(pitch <= PI - 0.1 + 1e-4);

        let down = look(start, Vec2::new(0.0, -10.0), 1.0, PI - 0.1);
        let (_, _, pitch) = down.to_euler(EulerRot::ZYX);
        assert!(pitch.abs() < 1e-4);
    }
}
