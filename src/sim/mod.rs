//! Game rules module
//!
//! All gameplay logic lives here. Rendering, input devices and timing come
//! from outside:
//! - Animation through the `anim::Animator` trait
//! - HUD text and reload requests through the `Hud` trait
//! - Seeded RNG only, so a seed replays the same session

pub mod autoplay;
pub mod progression;
pub mod resolve;
pub mod session;
pub mod state;

pub use autoplay::Autopilot;
pub use progression::{Progress, select_color};
pub use resolve::{generate_walls, landing_y, resolve_outcome};
pub use session::{Hud, Session, TextHud, TickInput};
pub use state::{
    BlockGeometry, GameEvent, Outcome, ProgressionState, RoundState, WallGeometry,
};
