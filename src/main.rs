//! Forest Escape headless runner
//!
//! Plays one run with recording audio and rendering backends and an autopilot
//! that walks to each key in turn, then to the door.
//!
//! Usage: `forest-escape [level.json] [tuning.json]`. Without a level file a
//! built-in demo forest is used.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Forest Escape (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    use std::rc::Rc;

    use forest_escape::consts::FRAME_DT;
    use forest_escape::engine::{LevelAssets, RecordingAudio, RecordingRenderer, Scene};
    use forest_escape::sim::GamePhase;
    use forest_escape::{Mode, PlayMode, Tuning};
    use glam::UVec2;

    /// Give up after two minutes of game time
    const MAX_FRAMES: u64 = 60 * 120;
    const WINDOW: UVec2 = UVec2::new(1280, 720);

    let mut args = std::env::args().skip(1);
    let scene = match args.next() {
        Some(path) => Scene::load(path)?,
        None => autopilot::demo_forest(),
    };
    let tuning = match args.next() {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let mut audio = RecordingAudio::new();
    let assets = Rc::new(LevelAssets::load(&mut audio)?);
    let mut renderer = RecordingRenderer::new();
    let mut mode = PlayMode::new(scene, assets, audio, tuning)?;

    for event in autopilot::start_walking() {
        mode.handle_event(&event, WINDOW);
    }

    let mut frames = 0;
    while !mode.state().phase.is_over() && frames < MAX_FRAMES {
        autopilot::steer(&mut mode);
        mode.update(FRAME_DT);
        mode.draw(WINDOW, &mut renderer);
        frames += 1;
    }

    let state = mode.state();
    match state.phase {
        GamePhase::Won => log::info!("Escaped with {} keys after {frames} frames", state.keys_held),
        GamePhase::Lost => log::info!(
            "Caught at {} holding {} keys after {frames} frames",
            state.player,
            state.keys_held
        ),
        GamePhase::Playing => log::warn!("Still in the forest after {frames} frames"),
    }
    log::debug!("Final state:\n{}", state.to_json()?);

    if let Some(line) = renderer.last_frame_text().last() {
        println!("{}", line.text);
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web; the host drives PlayMode directly
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use std::f32::consts::FRAC_PI_2;

    use forest_escape::PlayMode;
    use forest_escape::engine::{AudioEngine, InputEvent, Key, Scene};
    use glam::{Quat, Vec3};

    /// Hold W for the whole run
    pub fn start_walking() -> [InputEvent; 1] {
        [InputEvent::KeyDown(Key::W)]
    }

    /// Turn the camera toward the next uncollected key, or the door once all
    /// keys are held
    pub fn steer<A: AudioEngine>(mode: &mut PlayMode<A>) {
        let state = mode.state();
        let target = state
            .keys
            .iter()
            .find(|key| !key.picked)
            .map_or(state.door.position, |key| key.position);
        let to = target - state.player;
        let heading = to.y.atan2(to.x);

        let camera = mode.nodes().camera;
        mode.scene_mut().transform_mut(camera).rotation = level_look(heading);
    }

    /// Rotation looking at the horizon with `heading` measured from +X
    fn level_look(heading: f32) -> Quat {
        Quat::from_rotation_z(heading - FRAC_PI_2) * Quat::from_rotation_x(FRAC_PI_2)
    }

    /// A small forest: three keys on the path to the door, trees either side
    pub fn demo_forest() -> Scene {
        let mut scene = Scene::new();
        scene.add_mesh("Ground", Vec3::ZERO);
        scene.add_mesh("Sky", Vec3::ZERO);
        scene.add_mesh("Wall", Vec3::ZERO);
        scene.add_camera("Camera", Vec3::new(-90.0, 0.0, 2.0), level_look(0.0));
        scene.add_mesh("Ghost", Vec3::new(-95.0, 95.0, 0.0));
        scene.add_mesh("Door", Vec3::new(99.0, 0.0, 0.0));
        scene.add_mesh("Key", Vec3::new(-50.0, 0.0, 1.0));
        scene.add_mesh("Key.001", Vec3::new(0.0, 0.0, 1.0));
        scene.add_mesh("Key.002", Vec3::new(50.0, 0.0, 1.0));
        for i in 0..19 {
            let x = -90.0 + i as f32 * 10.0;
            scene.add_mesh(&format!("Tree.{:03}", 2 * i), Vec3::new(x, 12.0, 0.0));
            scene.add_mesh(&format!("Tree.{:03}", 2 * i + 1), Vec3::new(x + 5.0, -12.0, 0.0));
        }
        scene
    }
}
