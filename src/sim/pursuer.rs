//! The ghost
//!
//! The ghost's true position always closes on the player, seen or not. What the
//! player sees is a separate derived position: synced to the true one while the
//! ghost is within the visible box, parked under the ground otherwise.
//!
//! State per frame is decided by distance alone:
//! hidden → visible (inside the visible box) → caught (inside the capture box).

use std::f32::consts::FRAC_PI_2;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::normalize_angle;
use crate::tuning::Tuning;

/// What the ghost did this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PursuerStep {
    pub visible: bool,
    pub caught: bool,
}

/// Ghost state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pursuer {
    /// True position
    pub position: Vec3,
    /// Position shown to the player
    pub shown: Vec3,
    /// Rotation about +Z that faces the player
    pub yaw: f32,
    pub visible: bool,
}

impl Pursuer {
    /// Start hidden at `position`
    pub fn new(position: Vec3, hidden_z: f32) -> Self {
        Self {
            position,
            shown: Vec3::new(position.x, position.y, hidden_z),
            yaw: 0.0,
            visible: false,
        }
    }

    /// Per-axis distance from the true position to `target`
    pub fn axis_distance(&self, target: Vec3) -> Vec2 {
        Vec2::new(
            (self.position.x - target.x).abs(),
            (self.position.y - target.y).abs(),
        )
    }

    /// Advance one frame toward `player`
    pub fn update(&mut self, player: Vec3, tuning: &Tuning, dt: f32) -> PursuerStep {
        let distance = self.axis_distance(player);

        let visible =
            distance.x <= tuning.ghost_visible_radius && distance.y <= tuning.ghost_visible_radius;
        if visible {
            self.shown = self.position;
        } else {
            self.shown.z = tuning.hidden_z;
        }
        self.visible = visible;

        let caught =
            distance.x <= tuning.ghost_capture_radius && distance.y <= tuning.ghost_capture_radius;

        self.pursue(player, distance, tuning.ghost_close_time, dt);
        self.face(player);

        PursuerStep { visible, caught }
    }

    /// Close a fraction of the gap on each axis, proportional to the gap
    fn pursue(&mut self, player: Vec3, distance: Vec2, close_time: f32, dt: f32) {
        // Capped at the full gap so long frames land on the player instead of past it
        let rate = (dt / close_time).min(1.0);
        self.position.x += approach(self.position.x, player.x, distance.x * rate);
        self.position.y += approach(self.position.y, player.y, distance.y * rate);
    }

    /// Turn the shown ghost toward the player (model front is its +Y)
    fn face(&mut self, player: Vec3) {
        let angle = (player.y - self.shown.y).atan2(player.x - self.shown.x);
        self.yaw = normalize_angle(angle - FRAC_PI_2);
    }
}

/// Signed shift of size `step` from `from` toward `to`
fn approach(from: f32, to: f32, step: f32) -> f32 {
    if from < to {
        step
    } else if from > to {
        -step
    } else {
        0.0
    }
}
