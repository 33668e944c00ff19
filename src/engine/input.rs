//! Window input events
//!
//! The host translates its native events into these before handing them to
//! [`crate::Mode::handle_event`].

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Escape,
    /// Any other key, by host key code
    Other(u32),
}

/// A single input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    MouseButtonDown,
    /// Relative motion in pixels (y grows downward)
    MouseMotion { xrel: f32, yrel: f32 },
}
