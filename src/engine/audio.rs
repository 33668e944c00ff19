//! Audio seam
//!
//! The host mixer owns decoding and 3D panning. The game only asks for
//! one-shot playback, positional loops and listener updates. Loops come back as
//! shared [`PlayingSample`] handles: the mixer reads them while the game moves
//! or stops them.

use std::cell::Cell;
use std::rc::Rc;

use glam::Vec3;

use crate::error::AudioError;

/// Handle to a loaded sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleId(pub u32);

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Key picked up
    Pickup,
    /// Door opened with all keys
    Win,
    /// Door touched without enough keys
    Locked,
    /// Ambient loop that follows the ghost
    StabGhost,
    /// Looping stab once the ghost catches the player
    Stab,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 5] = [
        SoundEffect::Pickup,
        SoundEffect::Win,
        SoundEffect::Locked,
        SoundEffect::StabGhost,
        SoundEffect::Stab,
    ];

    /// Asset name the host resolves to a file
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Pickup => "pickup.wav",
            SoundEffect::Win => "win.wav",
            SoundEffect::Locked => "locked.wav",
            SoundEffect::StabGhost => "stab-ghost.wav",
            SoundEffect::Stab => "stab.wav",
        }
    }
}

/// A sample that is currently playing
///
/// Valid until [`stop`](Self::stop) is called or every owner drops it.
#[derive(Debug)]
pub struct PlayingSample {
    sample: SampleId,
    volume: f32,
    half_volume_radius: f32,
    position: Cell<Vec3>,
    ramp: Cell<f32>,
    stopped: Cell<bool>,
}

impl PlayingSample {
    pub fn new(sample: SampleId, volume: f32, position: Vec3, half_volume_radius: f32) -> Self {
        Self {
            sample,
            volume,
            half_volume_radius,
            position: Cell::new(position),
            ramp: Cell::new(0.0),
            stopped: Cell::new(false),
        }
    }

    pub fn sample(&self) -> SampleId {
        self.sample
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn half_volume_radius(&self) -> f32 {
        self.half_volume_radius
    }

    pub fn position(&self) -> Vec3 {
        self.position.get()
    }

    /// Ramp time requested by the most recent position update or stop
    pub fn ramp(&self) -> f32 {
        self.ramp.get()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    /// Move the source, interpolating over `ramp` seconds. Ignored once stopped.
    pub fn set_position(&self, position: Vec3, ramp: f32) {
        if self.stopped.get() {
            return;
        }
        self.position.set(position);
        self.ramp.set(ramp);
    }

    /// Fade out over `ramp` seconds (0 cuts immediately)
    pub fn stop(&self, ramp: f32) {
        self.ramp.set(ramp);
        self.stopped.set(true);
    }
}

/// Audio services the play mode needs from the host
pub trait AudioEngine {
    /// Resolve a sample by asset name
    fn load_sample(&mut self, name: &str) -> Result<SampleId, AudioError>;

    /// Fire-and-forget playback
    fn play(&mut self, sample: SampleId, volume: f32);

    /// Start a looping positional source
    fn loop_3d(
        &mut self,
        sample: SampleId,
        volume: f32,
        position: Vec3,
        half_volume_radius: f32,
    ) -> Rc<PlayingSample>;

    /// Place the listener (ears along `right`)
    fn set_listener(&mut self, position: Vec3, right: Vec3, ramp: f32);
}

/// Samples used by the forest level, loaded once at startup and shared by
/// every play mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelAssets {
    pub pickup: SampleId,
    pub win: SampleId,
    pub locked: SampleId,
    pub stab_ghost: SampleId,
    pub stab: SampleId,
}

impl LevelAssets {
    pub fn load(audio: &mut impl AudioEngine) -> Result<Self, AudioError> {
        let assets = Self {
            pickup: audio.load_sample(SoundEffect::Pickup.file_name())?,
            win: audio.load_sample(SoundEffect::Win.file_name())?,
            locked: audio.load_sample(SoundEffect::Locked.file_name())?,
            stab_ghost: audio.load_sample(SoundEffect::StabGhost.file_name())?,
            stab: audio.load_sample(SoundEffect::Stab.file_name())?,
        };
        log::info!("Loaded {} level samples", SoundEffect::ALL.len());
        Ok(assets)
    }

    pub fn sample(&self, effect: SoundEffect) -> SampleId {
        match effect {
            SoundEffect::Pickup => self.pickup,
            SoundEffect::Win => self.win,
            SoundEffect::Locked => self.locked,
            SoundEffect::StabGhost => self.stab_ghost,
            SoundEffect::Stab => self.stab,
        }
    }
}

/// One request made to a [`RecordingAudio`]
#[derive(Debug, Clone)]
pub enum AudioCall {
    Play { sample: SampleId, volume: f32 },
    Loop(Rc<PlayingSample>),
}

/// Audio engine that logs and records every request instead of mixing
///
/// Used by the headless runner and tests.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    /// Restricts `load_sample` to these names when set
    library: Option<Vec<String>>,
    samples: Vec<String>,
    calls: Vec<AudioCall>,
    listener: Option<(Vec3, Vec3)>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only samples named in `library` can be loaded
    pub fn with_library<I, S>(library: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            library: Some(library.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn sample_name(&self, sample: SampleId) -> Option<&str> {
        self.samples.get(sample.0 as usize).map(String::as_str)
    }

    pub fn calls(&self) -> &[AudioCall] {
        &self.calls
    }

    /// Number of one-shot plays of `sample`
    pub fn plays_of(&self, sample: SampleId) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, AudioCall::Play { sample: s, .. } if *s == sample))
            .count()
    }

    /// Loops started with `sample`, oldest first
    pub fn loops_of(&self, sample: SampleId) -> Vec<Rc<PlayingSample>> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                AudioCall::Loop(playing) if playing.sample() == sample => Some(Rc::clone(playing)),
                _ => None,
            })
            .collect()
    }

    /// Last listener position and right vector
    pub fn listener(&self) -> Option<(Vec3, Vec3)> {
        self.listener
    }
}

impl AudioEngine for RecordingAudio {
    fn load_sample(&mut self, name: &str) -> Result<SampleId, AudioError> {
        if let Some(library) = &self.library {
            if !library.iter().any(|known| known == name) {
                return Err(AudioError::SampleNotFound(name.to_string()));
            }
        }
        if let Some(i) = self.samples.iter().position(|s| s == name) {
            return Ok(SampleId(i as u32));
        }
        self.samples.push(name.to_string());
        Ok(SampleId(self.samples.len() as u32 - 1))
    }

    fn play(&mut self, sample: SampleId, volume: f32) {
        log::debug!(
            "play {} at volume {volume}",
            self.sample_name(sample).unwrap_or("<unknown>")
        );
        self.calls.push(AudioCall::Play { sample, volume });
    }

    fn loop_3d(
        &mut self,
        sample: SampleId,
        volume: f32,
        position: Vec3,
        half_volume_radius: f32,
    ) -> Rc<PlayingSample> {
        log::debug!(
            "loop {} at {position} (volume {volume}, radius {half_volume_radius})",
            self.sample_name(sample).unwrap_or("<unknown>")
        );
        let playing = Rc::new(PlayingSample::new(sample, volume, position, half_volume_radius));
        self.calls.push(AudioCall::Loop(Rc::clone(&playing)));
        playing
    }

    fn set_listener(&mut self, position: Vec3, right: Vec3, _ramp: f32) {
        self.listener = Some((position, right));
    }
}
