//! Scene storage
//!
//! Transforms live in a flat arena owned by [`Scene`]. Gameplay code holds
//! [`TransformId`] handles into it, never references, so the arena can grow
//! without invalidating anything the game remembers.

use std::path::Path;

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::LevelError;

/// Handle to a transform in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformId(pub usize);

/// A named node with position, rotation and scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub name: String,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub rotation: Quat,
    #[serde(default = "unit_scale")]
    pub scale: Vec3,
}

fn unit_scale() -> Vec3 {
    Vec3::ONE
}

impl Transform {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Local-to-parent matrix (scale, then rotate, then translate)
    pub fn make_local_to_parent(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Local +X axis in parent space
    pub fn right(&self) -> Vec3 {
        self.make_local_to_parent().x_axis.truncate()
    }

    /// Local -Z axis in parent space (cameras look down -Z)
    pub fn forward(&self) -> Vec3 {
        -self.make_local_to_parent().z_axis.truncate()
    }
}

/// A camera attached to a transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub transform: TransformId,
    /// Vertical field of view (radians)
    #[serde(default = "default_fovy")]
    pub fovy: f32,
    /// Width / height, refreshed every draw
    #[serde(default = "default_aspect")]
    pub aspect: f32,
    #[serde(default = "default_near")]
    pub near: f32,
}

fn default_fovy() -> f32 {
    60.0_f32.to_radians()
}

fn default_aspect() -> f32 {
    1.0
}

fn default_near() -> f32 {
    0.01
}

impl Camera {
    pub fn new(transform: TransformId) -> Self {
        Self {
            transform,
            fovy: default_fovy(),
            aspect: default_aspect(),
            near: default_near(),
        }
    }
}

/// Mesh binding for a transform (the renderer resolves the mesh name)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drawable {
    pub transform: TransformId,
    pub mesh: String,
}

/// Transform arena plus the cameras and drawables that reference it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub transforms: Vec<Transform>,
    #[serde(default)]
    pub cameras: Vec<Camera>,
    #[serde(default)]
    pub drawables: Vec<Drawable>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a level description and check its handles
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let scene: Self = serde_json::from_str(json)?;
        scene.check_handles()?;
        Ok(scene)
    }

    /// Load a level description from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scene = Self::from_json(&json)?;
        log::info!(
            "Loaded scene {} ({} transforms, {} cameras)",
            path.display(),
            scene.transforms.len(),
            scene.cameras.len()
        );
        Ok(scene)
    }

    /// Add a transform and return its handle
    pub fn add_transform(&mut self, transform: Transform) -> TransformId {
        self.transforms.push(transform);
        TransformId(self.transforms.len() - 1)
    }

    /// Add a transform with a mesh of the same name
    pub fn add_mesh(&mut self, name: &str, position: Vec3) -> TransformId {
        let id = self.add_transform(Transform::new(name, position));
        self.drawables.push(Drawable {
            transform: id,
            mesh: name.to_string(),
        });
        id
    }

    /// Add a camera on a new transform
    pub fn add_camera(&mut self, name: &str, position: Vec3, rotation: Quat) -> TransformId {
        let mut transform = Transform::new(name, position);
        transform.rotation = rotation;
        let id = self.add_transform(transform);
        self.cameras.push(Camera::new(id));
        id
    }

    pub fn transform(&self, id: TransformId) -> &Transform {
        &self.transforms[id.0]
    }

    pub fn transform_mut(&mut self, id: TransformId) -> &mut Transform {
        &mut self.transforms[id.0]
    }

    /// Handles and transforms in arena order
    pub fn iter(&self) -> impl Iterator<Item = (TransformId, &Transform)> {
        self.transforms
            .iter()
            .enumerate()
            .map(|(i, t)| (TransformId(i), t))
    }

    /// First transform with the given name
    pub fn find(&self, name: &str) -> Option<TransformId> {
        self.iter().find(|(_, t)| t.name == name).map(|(id, _)| id)
    }

    /// Every camera and drawable must point at a real transform
    pub(crate) fn check_handles(&self) -> Result<(), LevelError> {
        let count = self.transforms.len();
        for (camera, cam) in self.cameras.iter().enumerate() {
            if cam.transform.0 >= count {
                return Err(LevelError::DanglingCamera {
                    camera,
                    transform: cam.transform.0,
                    count,
                });
            }
        }
        let total = self.drawables.len();
        let dangling = self
            .drawables
            .iter()
            .filter(|d| d.transform.0 >= count)
            .count();
        if dangling > 0 {
            log::warn!(
                "{dangling} of {total} drawables point past the transform arena and will not render"
            );
        }
        Ok(())
    }
}
