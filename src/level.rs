//! Level discovery
//!
//! The forest scene is authored with named nodes. Scenery (`Camera`, `Sky`,
//! `Ground`, `Wall`) is left alone, `Ghost`, `Door` and the three keys are
//! bound by name, and every other node is a tree.

use glam::Vec3;

use crate::consts::KEY_COUNT;
use crate::engine::scene::{Scene, TransformId};
use crate::error::LevelError;
use crate::sim::{GameState, ObstacleSet};
use crate::tuning::Tuning;

/// Nodes that are never obstacles
const SCENERY: [&str; 4] = ["Camera", "Sky", "Ground", "Wall"];
const GHOST: &str = "Ghost";
const DOOR: &str = "Door";
const KEYS: [&str; KEY_COUNT] = ["Key", "Key.001", "Key.002"];

/// Handles to the scene nodes gameplay drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelNodes {
    /// Transform of the single camera (the player)
    pub camera: TransformId,
    pub ghost: TransformId,
    pub door: TransformId,
    pub keys: [TransformId; KEY_COUNT],
}

/// A scene sorted into gameplay roles
#[derive(Debug, Clone)]
pub struct Level {
    pub nodes: LevelNodes,
    pub trees: ObstacleSet,
}

impl Level {
    /// Sort the scene's nodes into roles
    ///
    /// Fails unless the scene has exactly one camera attached to a real
    /// transform and every named role is present.
    pub fn from_scene(scene: &Scene) -> Result<Self, LevelError> {
        if scene.cameras.len() != 1 {
            return Err(LevelError::CameraCount(scene.cameras.len()));
        }
        scene.check_handles()?;
        let camera = scene.cameras[0].transform;

        let mut ghost = None;
        let mut door = None;
        let mut keys = [None; KEY_COUNT];
        let mut trees = ObstacleSet::new();

        for (id, transform) in scene.iter() {
            let name = transform.name.as_str();
            if SCENERY.contains(&name) || id == camera {
                continue;
            } else if name == GHOST {
                ghost = Some(id);
            } else if name == DOOR {
                door = Some(id);
            } else if let Some(slot) = KEYS.iter().position(|k| *k == name) {
                keys[slot] = Some(id);
            } else {
                trees.insert(transform.position.x, transform.position.y);
            }
        }

        let ghost = ghost.ok_or(LevelError::MissingNode(GHOST))?;
        let door = door.ok_or(LevelError::MissingNode(DOOR))?;
        let mut key_ids = [camera; KEY_COUNT];
        for (slot, name) in KEYS.into_iter().enumerate() {
            key_ids[slot] = keys[slot].ok_or(LevelError::MissingNode(name))?;
        }

        if trees.is_empty() {
            log::warn!("Scene has no trees: the forest is an open field");
        }
        log::info!("Level has {} trees", trees.len());

        Ok(Self {
            nodes: LevelNodes {
                camera,
                ghost,
                door,
                keys: key_ids,
            },
            trees,
        })
    }

    /// Initial game state from the scene's current node positions
    pub fn start_state(&self, scene: &Scene, tuning: Tuning) -> GameState {
        let position = |id: TransformId| scene.transform(id).position;
        let keys: [Vec3; KEY_COUNT] = self.nodes.keys.map(position);
        GameState::new(
            position(self.nodes.camera),
            position(self.nodes.ghost),
            position(self.nodes.door),
            keys,
            self.trees.clone(),
            tuning,
        )
    }
}
