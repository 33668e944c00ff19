//! Full runs through the play mode with recording audio and rendering

use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use forest_escape::consts::{AUDIO_RAMP, FRAME_DT, STAB_VOLUME};
use forest_escape::engine::{InputEvent, Key, LevelAssets, RecordingAudio, RecordingRenderer, Scene};
use forest_escape::sim::GamePhase;
use forest_escape::{Mode, PlayMode, Tuning};
use glam::{Quat, UVec2, Vec3};

const WINDOW: UVec2 = UVec2::new(800, 600);

fn facing_x() -> Quat {
    Quat::from_rotation_z(-FRAC_PI_2) * Quat::from_rotation_x(FRAC_PI_2)
}

fn forest(ghost: Vec3) -> Scene {
    let mut scene = Scene::new();
    scene.add_mesh("Ground", Vec3::ZERO);
    scene.add_mesh("Sky", Vec3::ZERO);
    scene.add_camera("Camera", Vec3::new(-90.0, 0.0, 2.0), facing_x());
    scene.add_mesh("Ghost", ghost);
    scene.add_mesh("Door", Vec3::new(99.0, 0.0, 0.0));
    scene.add_mesh("Key", Vec3::new(-40.0, 30.0, 1.0));
    scene.add_mesh("Key.001", Vec3::new(0.0, -30.0, 1.0));
    scene.add_mesh("Key.002", Vec3::new(40.0, 30.0, 1.0));
    scene.add_mesh("Tree", Vec3::new(-80.0, 0.0, 0.0));
    scene.add_mesh("Tree.001", Vec3::new(-20.0, 40.0, 0.0));
    scene
}

fn start(scene: Scene) -> (PlayMode<RecordingAudio>, Rc<LevelAssets>) {
    let mut audio = RecordingAudio::new();
    let assets = Rc::new(LevelAssets::load(&mut audio).unwrap());
    let mode = PlayMode::new(scene, Rc::clone(&assets), audio, Tuning::default()).unwrap();
    (mode, assets)
}

fn teleport(mode: &mut PlayMode<RecordingAudio>, to: Vec3) {
    let camera = mode.nodes().camera;
    mode.scene_mut().transform_mut(camera).position = to;
}

#[test]
fn test_collect_keys_then_escape() {
    let (mut mode, assets) = start(forest(Vec3::new(-95.0, -95.0, 0.0)));

    for i in 0..3 {
        let key = mode.state().keys[i].position;
        teleport(&mut mode, key);
        mode.update(FRAME_DT);
        mode.update(FRAME_DT);
        assert_eq!(mode.state().keys_held as usize, i + 1);
        assert_eq!(mode.audio().plays_of(assets.pickup), i + 1);

        let id = mode.nodes().keys[i];
        assert_eq!(mode.scene().transform(id).position.z, -15.0);
    }

    teleport(&mut mode, Vec3::new(98.5, 1.0, 2.0));
    mode.update(FRAME_DT);
    assert_eq!(mode.state().phase, GamePhase::Won);
    assert_eq!(mode.audio().plays_of(assets.win), 1);
    assert_eq!(mode.audio().plays_of(assets.locked), 0);
    assert!(mode.ghost_loop().is_stopped());

    let calls = mode.audio().calls().len();
    for _ in 0..30 {
        mode.update(FRAME_DT);
    }
    assert_eq!(mode.audio().calls().len(), calls);

    let mut renderer = RecordingRenderer::new();
    mode.draw(WINDOW, &mut renderer);
    let text = renderer.last_frame_text();
    assert_eq!(text.len(), 4);
    assert!(text[0].text.ends_with("Keys: 3/3"));
    assert_eq!(text[3].text, "You escaped the forest!");
}

#[test]
fn test_locked_door_sounds_once_per_visit() {
    let (mut mode, assets) = start(forest(Vec3::new(-95.0, -95.0, 0.0)));

    teleport(&mut mode, Vec3::new(98.5, 0.0, 2.0));
    for _ in 0..20 {
        mode.update(FRAME_DT);
    }
    assert_eq!(mode.audio().plays_of(assets.locked), 1);

    teleport(&mut mode, Vec3::new(90.0, 0.0, 2.0));
    mode.update(FRAME_DT);
    teleport(&mut mode, Vec3::new(98.5, 0.0, 2.0));
    mode.update(FRAME_DT);
    assert_eq!(mode.audio().plays_of(assets.locked), 2);
    assert_eq!(mode.state().phase, GamePhase::Playing);
    assert_eq!(mode.audio().plays_of(assets.win), 0);
}

#[test]
fn test_standing_still_gets_caught() {
    let (mut mode, assets) = start(forest(Vec3::new(-70.0, 20.0, 0.0)));

    let mut frames = 0;
    while mode.state().phase == GamePhase::Playing {
        mode.update(FRAME_DT);
        frames += 1;
        assert!(frames < 10_000, "ghost never arrived");
    }
    assert_eq!(mode.state().phase, GamePhase::Lost);
    assert!(mode.ghost_loop().is_stopped());

    let stab = mode.stab_loop().unwrap();
    assert_eq!(stab.sample(), assets.stab);
    assert_eq!(stab.volume(), STAB_VOLUME);
    assert_eq!(stab.position(), Vec3::new(-90.0, 0.0, 2.0));
    assert_eq!(mode.audio().loops_of(assets.stab).len(), 1);

    // Frozen: input and time no longer move anything
    let camera = mode.nodes().camera;
    let ghost = mode.nodes().ghost;
    let seen_ghost = mode.scene().transform(ghost).position;
    mode.handle_event(&InputEvent::KeyDown(Key::W), WINDOW);
    for _ in 0..30 {
        mode.update(FRAME_DT);
    }
    assert_eq!(mode.scene().transform(camera).position, Vec3::new(-90.0, 0.0, 2.0));
    assert_eq!(mode.scene().transform(ghost).position, seen_ghost);
    assert_eq!(mode.audio().loops_of(assets.stab).len(), 1);
}

#[test]
fn test_tree_blocks_walking() {
    let (mut mode, _) = start(forest(Vec3::new(95.0, 95.0, 0.0)));
    assert!(mode.handle_event(&InputEvent::KeyDown(Key::W), WINDOW));

    for _ in 0..180 {
        mode.update(FRAME_DT);
    }
    let camera = mode.scene().transform(mode.nodes().camera).position;
    assert!(camera.x < -80.0 - 1.5);
    assert!(camera.x > -80.0 - 1.5 - 2.0 * 10.0 * FRAME_DT);
    assert_eq!(camera.z, 2.0);
}

#[test]
fn test_ghost_loop_trails_the_ghost() {
    let (mut mode, _) = start(forest(Vec3::new(95.0, 95.0, 0.0)));

    mode.update(FRAME_DT);
    let after_first = mode.state().ghost.position;
    assert_ne!(after_first, Vec3::new(95.0, 95.0, 0.0));
    assert_eq!(mode.ghost_loop().position(), Vec3::new(95.0, 95.0, 0.0));

    mode.update(FRAME_DT);
    assert_eq!(mode.ghost_loop().position(), after_first);
    assert_eq!(mode.ghost_loop().ramp(), AUDIO_RAMP);
}

#[test]
fn test_level_from_json() {
    let json = r#"{
        "transforms": [
            { "name": "Camera", "position": [-90.0, 0.0, 2.0] },
            { "name": "Ghost", "position": [50.0, 50.0, 0.0] },
            { "name": "Door", "position": [99.0, 0.0, 0.0] },
            { "name": "Key", "position": [-40.0, 0.0, 1.0] },
            { "name": "Key.001", "position": [0.0, 0.0, 1.0] },
            { "name": "Key.002", "position": [40.0, 0.0, 1.0] },
            { "name": "Oak", "position": [10.0, 10.0, 0.0] },
            { "name": "Wall", "position": [0.0, 0.0, 0.0] }
        ],
        "cameras": [{ "transform": 0 }]
    }"#;
    let scene = Scene::from_json(json).unwrap();
    let (mode, _) = start(scene);
    assert_eq!(mode.state().trees.len(), 1);
    assert_eq!(mode.state().ghost.shown.z, -15.0);
}
