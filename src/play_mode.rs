//! The forest play mode
//!
//! Glue between the host engine and the simulation. Each frame the camera's
//! position is read out of the scene, the simulation advances, and the results
//! are written back: camera, ghost and key transforms, sounds, listener.

use std::rc::Rc;

use glam::{Mat4, Quat, UVec2, Vec2, Vec3};

use crate::consts::*;
use crate::engine::audio::{AudioEngine, LevelAssets, PlayingSample};
use crate::engine::input::{InputEvent, Key};
use crate::engine::render::{Lighting, Renderer, TextLine};
use crate::engine::scene::{Camera, Scene};
use crate::error::LevelError;
use crate::level::{Level, LevelNodes};
use crate::sim::{
    Button, CameraFrame, GameEvent, GamePhase, GameState, InputTracker, TickInput, look, tick,
};
use crate::tuning::Tuning;

/// Overlay text height
const TEXT_HEIGHT: f32 = 0.09;
const HELP: &str = "Mouse rotates camera; WASD moves; escape ungrabs mouse.";

/// What the frame loop calls
pub trait Mode {
    /// Consume one input event; true if it was handled
    fn handle_event(&mut self, event: &InputEvent, window_size: UVec2) -> bool;

    /// Advance by `elapsed` seconds
    fn update(&mut self, elapsed: f32);

    /// Draw to a surface of `drawable_size` pixels
    fn draw(&mut self, drawable_size: UVec2, renderer: &mut dyn Renderer);
}

/// One run through the forest
pub struct PlayMode<A: AudioEngine> {
    /// Local copy of the level scene, mutated during play
    scene: Scene,
    nodes: LevelNodes,
    state: GameState,
    input: InputTracker,
    /// Relative mouse mode (the host hides and captures the cursor)
    mouse_grabbed: bool,
    audio: A,
    assets: Rc<LevelAssets>,
    /// Ambient loop that follows the ghost
    ghost_loop: Rc<PlayingSample>,
    /// Started when the ghost strikes
    stab_loop: Option<Rc<PlayingSample>>,
}

impl<A: AudioEngine> PlayMode<A> {
    /// Start a run on `scene`
    ///
    /// Fails if the scene does not have exactly one camera on a real transform
    /// or lacks a ghost, door or key node.
    pub fn new(
        mut scene: Scene,
        assets: Rc<LevelAssets>,
        mut audio: A,
        tuning: Tuning,
    ) -> Result<Self, LevelError> {
        let level = Level::from_scene(&scene)?;
        let state = level.start_state(&scene, tuning);

        // Ghost starts out of sight
        scene.transform_mut(level.nodes.ghost).position = state.ghost.shown;

        // Position is refreshed every update
        let ghost_loop = audio.loop_3d(
            assets.stab_ghost,
            GHOST_LOOP_VOLUME,
            state.ghost.position,
            GHOST_LOOP_RADIUS,
        );

        log::info!(
            "Forest ready: player at {}, ghost at {}, {} trees",
            state.player,
            state.ghost.position,
            state.trees.len()
        );

        Ok(Self {
            scene,
            nodes: level.nodes,
            state,
            input: InputTracker::default(),
            mouse_grabbed: false,
            audio,
            assets,
            ghost_loop,
            stab_loop: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access for the host (and for teleporting in tests)
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn nodes(&self) -> &LevelNodes {
        &self.nodes
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn mouse_grabbed(&self) -> bool {
        self.mouse_grabbed
    }

    pub fn ghost_loop(&self) -> &Rc<PlayingSample> {
        &self.ghost_loop
    }

    pub fn stab_loop(&self) -> Option<&Rc<PlayingSample>> {
        self.stab_loop.as_ref()
    }

    /// Status line shown at the bottom of the screen
    pub fn status_text(&self) -> String {
        format!(
            "{HELP} Keys: {}/{}",
            self.state.keys_held, self.state.tuning.keys_required
        )
    }

    /// Scene camera attached to the player's transform
    fn camera(&self) -> Option<&Camera> {
        let id = self.nodes.camera;
        self.scene.cameras.iter().find(|camera| camera.transform == id)
    }

    fn camera_mut(&mut self) -> Option<&mut Camera> {
        let id = self.nodes.camera;
        self.scene.cameras.iter_mut().find(|camera| camera.transform == id)
    }

    fn button_mut(&mut self, key: Key) -> Option<&mut Button> {
        match key {
            Key::A => Some(&mut self.input.left),
            Key::D => Some(&mut self.input.right),
            Key::W => Some(&mut self.input.up),
            Key::S => Some(&mut self.input.down),
            Key::Escape | Key::Other(_) => None,
        }
    }

    fn camera_frame(&self) -> CameraFrame {
        let camera = self.scene.transform(self.nodes.camera);
        CameraFrame {
            right: camera.right(),
            forward: camera.forward(),
        }
    }

    /// Copy simulation results into the scene transforms
    fn sync_scene(&mut self) {
        let hidden_z = self.state.tuning.hidden_z;

        self.scene.transform_mut(self.nodes.camera).position = self.state.player;

        let ghost = self.scene.transform_mut(self.nodes.ghost);
        ghost.position = self.state.ghost.shown;
        ghost.rotation = Quat::from_rotation_z(self.state.ghost.yaw);

        for (key, id) in self.state.keys.iter().zip(self.nodes.keys) {
            self.scene.transform_mut(id).position = key.shown_position(hidden_z);
        }
    }

    /// Turn a simulation event into sound
    fn present(&mut self, event: GameEvent) {
        match event {
            GameEvent::KeyCollected { .. } => self.audio.play(self.assets.pickup, 1.0),
            GameEvent::DoorLocked { .. } => self.audio.play(self.assets.locked, 1.0),
            GameEvent::Escaped => {
                self.ghost_loop.stop(0.0);
                self.audio.play(self.assets.win, 1.0);
            }
            GameEvent::Caught { at } => {
                self.ghost_loop.stop(0.0);
                let stab = self.audio.loop_3d(self.assets.stab, STAB_VOLUME, at, STAB_RADIUS);
                self.stab_loop = Some(stab);
            }
            GameEvent::GhostRevealed | GameEvent::GhostHidden => {}
        }
    }

    fn outcome_text(&self) -> Option<&'static str> {
        match self.state.phase {
            GamePhase::Playing => None,
            GamePhase::Won => Some("You escaped the forest!"),
            GamePhase::Lost => Some("Game over. You got stabbed."),
        }
    }
}

impl<A: AudioEngine> Mode for PlayMode<A> {
    fn handle_event(&mut self, event: &InputEvent, window_size: UVec2) -> bool {
        match *event {
            InputEvent::KeyDown(Key::Escape) => {
                self.mouse_grabbed = false;
                true
            }
            InputEvent::KeyDown(key) => match self.button_mut(key) {
                Some(button) => {
                    button.press();
                    true
                }
                None => false,
            },
            InputEvent::KeyUp(key) => match self.button_mut(key) {
                Some(button) => {
                    button.release();
                    true
                }
                None => false,
            },
            InputEvent::MouseButtonDown => {
                if self.mouse_grabbed {
                    return false;
                }
                self.mouse_grabbed = true;
                true
            }
            InputEvent::MouseMotion { xrel, yrel } => {
                if !self.mouse_grabbed {
                    return false;
                }
                let height = window_size.y.max(1) as f32;
                let motion = Vec2::new(xrel / height, -yrel / height);
                let Some(fovy) = self.camera().map(|camera| camera.fovy) else {
                    return false;
                };
                let pitch_max = self.state.tuning.pitch_max;
                let camera = self.scene.transform_mut(self.nodes.camera);
                camera.rotation = look(camera.rotation, motion, fovy, pitch_max);
                true
            }
        }
    }

    fn update(&mut self, elapsed: f32) {
        if self.state.phase.is_over() {
            return;
        }

        // Sound follows where the ghost was at the end of last frame
        self.ghost_loop.set_position(self.state.ghost.position, AUDIO_RAMP);

        // The camera transform is authoritative for the player's position
        self.state.player = self.scene.transform(self.nodes.camera).position;

        let input = TickInput {
            buttons: self.input.buttons(),
            frame: self.camera_frame(),
        };
        let events = tick(&mut self.state, &input, elapsed);
        self.sync_scene();
        for event in events {
            self.present(event);
        }

        let camera = self.scene.transform(self.nodes.camera);
        let (at, right) = (camera.position, camera.right());
        self.audio.set_listener(at, right, AUDIO_RAMP);

        self.input.reset_downs();
    }

    fn draw(&mut self, drawable_size: UVec2, renderer: &mut dyn Renderer) {
        let aspect = drawable_size.x as f32 / drawable_size.y.max(1) as f32;
        if let Some(camera) = self.camera_mut() {
            camera.aspect = aspect;
        }

        match self.camera() {
            Some(camera) => renderer.draw_scene(&self.scene, camera, &Lighting::default()),
            None => log::debug!("Player camera missing from the scene, skipping scene draw"),
        }

        let projection = Mat4::from_scale(Vec3::new(1.0 / aspect, 1.0, 1.0));
        let ofs = 2.0 / drawable_size.y.max(1) as f32;
        let base = Vec3::new(-aspect + 0.1 * TEXT_HEIGHT, -1.0 + 0.1 * TEXT_HEIGHT, 0.0);

        let mut lines = vec![self.status_text()];
        lines.extend(self.outcome_text().map(str::to_string));

        for (row, text) in lines.into_iter().enumerate() {
            let anchor = base + Vec3::new(0.0, row as f32 * 1.5 * TEXT_HEIGHT, 0.0);
            let x = Vec3::new(TEXT_HEIGHT, 0.0, 0.0);
            let y = Vec3::new(0.0, TEXT_HEIGHT, 0.0);
            // Drop shadow, then the text itself one pixel up and right
            renderer.draw_text(
                &projection,
                &TextLine {
                    text: text.clone(),
                    anchor,
                    x,
                    y,
                    color: [0x00, 0x00, 0x00, 0x00],
                },
            );
            renderer.draw_text(
                &projection,
                &TextLine {
                    text,
                    anchor: anchor + Vec3::new(ofs, ofs, 0.0),
                    x,
                    y,
                    color: [0xff, 0xff, 0xff, 0x00],
                },
            );
        }
    }
}
