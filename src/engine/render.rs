//! Rendering seam
//!
//! Shader programs, mesh buffers and glyph outlines belong to the host. The
//! game hands over the scene, lighting parameters and overlay text.

use glam::{Mat4, Vec3, Vec4};

use super::scene::{Camera, Scene};

/// Scene lighting for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    /// Direction the light travels
    pub direction: Vec3,
    pub energy: Vec3,
    pub clear_color: Vec4,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            direction: Vec3::NEG_Z,
            energy: Vec3::new(1.0, 1.0, 0.95),
            clear_color: Vec4::new(0.5, 0.5, 0.5, 1.0),
        }
    }
}

/// A line of overlay text
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    /// Baseline start in overlay space
    pub anchor: Vec3,
    /// Glyph x axis (sets width)
    pub x: Vec3,
    /// Glyph y axis (sets height)
    pub y: Vec3,
    pub color: [u8; 4],
}

/// Drawing services the play mode needs from the host
pub trait Renderer {
    fn draw_scene(&mut self, scene: &Scene, camera: &Camera, lighting: &Lighting);

    /// Draw text with depth testing off, transformed by `projection`
    fn draw_text(&mut self, projection: &Mat4, line: &TextLine);
}

/// Renderer that keeps what it was asked to draw
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: usize,
    pub last_aspect: Option<f32>,
    pub text: Vec<TextLine>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text lines drawn since the last scene draw
    pub fn last_frame_text(&self) -> &[TextLine] {
        &self.text
    }
}

impl Renderer for RecordingRenderer {
    fn draw_scene(&mut self, _scene: &Scene, camera: &Camera, _lighting: &Lighting) {
        self.frames += 1;
        self.last_aspect = Some(camera.aspect);
        self.text.clear();
    }

    fn draw_text(&mut self, _projection: &Mat4, line: &TextLine) {
        self.text.push(line.clone());
    }
}
