//! Host engine seams
//!
//! The game treats scene storage, audio mixing, rendering and window input as
//! services provided by the host. This module defines the shape of those
//! services:
//! - `scene`: Flat transform arena addressed by [`TransformId`] handles
//! - `audio`: Sample handles and the [`AudioEngine`] trait
//! - `input`: Window events the play mode consumes
//! - `render`: The [`Renderer`] trait and overlay text lines
//!
//! Each service also ships a recording implementation used by the headless
//! runner and the tests.

pub mod audio;
pub mod input;
pub mod render;
pub mod scene;

pub use audio::{
    AudioCall, AudioEngine, LevelAssets, PlayingSample, RecordingAudio, SampleId, SoundEffect,
};
pub use input::{InputEvent, Key};
pub use render::{Lighting, RecordingRenderer, Renderer, TextLine};
pub use scene::{Camera, Scene, Transform, TransformId};
