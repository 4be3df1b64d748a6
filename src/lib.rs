//! Stack Gap - a one-button grow-and-drop arcade game
//!
//! Hold to grow the block, release to drop it between the walls. Land on the
//! base walls to score; fall through or get stuck on the inner walls and the
//! session restarts.
//!
//! Core modules:
//! - `sim`: Round state machine, outcome resolver, progression, session driver
//! - `anim`: Animation engine interface and a deterministic tween scheduler
//! - `tuning`: Data-driven game balance and scene layout
//! - `color`: Background palette colors

pub mod anim;
pub mod color;
pub mod sim;
pub mod tuning;

pub use color::Color;
pub use tuning::{Layout, Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Narrowest base gap (outer wall pair separation)
    pub const BASE_GAP_MIN: f32 = 100.0;
    /// Base gap is drawn from [BASE_GAP_MIN, BASE_GAP_MIN + BASE_GAP_SPREAD)
    pub const BASE_GAP_SPREAD: f32 = 100.0;
    /// Fixed margin between base gap and wall gap
    pub const WALL_MARGIN: f32 = 30.0;
    /// Random extra wall gap on top of the margin, [0, WALL_SPREAD)
    pub const WALL_SPREAD: f32 = 50.0;

    /// Growth animation: scale target and duration (seconds)
    pub const GROW_SCALE: f32 = 5.0;
    pub const GROW_DURATION: f32 = 3.0;

    /// Drop sequence: straighten, then fall
    pub const ROTATE_DURATION: f32 = 0.2;
    pub const DROP_DURATION: f32 = 0.5;
    /// Block reset and wall slide durations
    pub const RESET_DURATION: f32 = 0.5;
    pub const WALL_SLIDE_DURATION: f32 = 0.5;
    /// Background tint duration
    pub const TINT_DURATION: f32 = 0.5;

    /// How far a blocked block sinks into the inner walls
    pub const BLOCKED_OVERLAP: f32 = 30.0;
    /// Landing y for a block that falls through (well below the viewport)
    pub const FALL_THROUGH_Y: f32 = -1200.0;

    /// Successful rounds needed to leave level 1
    pub const START_COUNTER: u32 = 2;
    /// Counter after a level-up is LEVEL_COUNTER_FACTOR * new level
    pub const LEVEL_COUNTER_FACTOR: u32 = 2;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
