//! Frame simulation
//!
//! All gameplay logic lives here. Nothing in this module touches the host
//! engine: positions come in, positions and [`GameEvent`]s go out.
//! - Variable timestep (whatever the frame loop measured)
//! - Stable order within a frame: player, keys, door, ghost
//! - Finished runs are frozen

pub mod collision;
pub mod input;
pub mod objectives;
pub mod player;
pub mod pursuer;
pub mod state;
pub mod tick;

pub use collision::{ObstacleSet, resolve_trees, resolve_walls};
pub use input::{Button, InputTracker, MoveButtons, look};
pub use objectives::{DoorCheck, DoorGate, Pickup, collect_keys};
pub use player::{CameraFrame, step_player};
pub use pursuer::{Pursuer, PursuerStep};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
