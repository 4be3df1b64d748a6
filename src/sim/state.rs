//! Game state and core round types

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::tuning::Tuning;

/// Where the current round is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundState {
    /// Block at rest, waiting for a press
    #[default]
    Idle,
    /// Press held, block widening
    Growing,
    /// Released; block dropping, landing, or resetting
    Falling,
}

/// How a drop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Narrower than the base gap; drops out of view
    FallThrough,
    /// Rests on the base walls
    Success,
    /// Too wide for the inner walls; stuck on top of them
    Blocked,
}

impl Outcome {
    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

/// Score, level and rounds left before the next level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    pub score: u64,
    pub level: u32,
    pub rounds_until_level_up: u32,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            rounds_until_level_up: crate::consts::START_COUNTER,
        }
    }
}

impl ProgressionState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            rounds_until_level_up: tuning.start_counter,
            ..Default::default()
        }
    }

    /// HUD title line
    pub fn title(&self) -> String {
        format!("Score: {}, Level: {}", self.score, self.level)
    }

    /// HUD counter line
    pub fn counter(&self) -> String {
        self.rounds_until_level_up.to_string()
    }
}

/// Gap widths for the current round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallGeometry {
    /// Separation of the outer (base) wall pair
    pub base_gap: f32,
    /// Separation of the inner wall pair
    pub wall_gap: f32,
}

impl WallGeometry {
    pub fn new(base_gap: f32, wall_gap: f32) -> Self {
        Self { base_gap, wall_gap }
    }

    /// Width of the window a block has to land in
    pub fn success_window(&self) -> f32 {
        (self.wall_gap - self.base_gap).max(0.0)
    }
}

/// The growing block's width. Only changes while growing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockGeometry {
    pub width: f32,
    /// Set once growth stops; the width is final for the round
    pub frozen: bool,
}

impl BlockGeometry {
    pub fn at_rest(width: f32) -> Self {
        Self {
            width,
            frozen: false,
        }
    }

    pub fn freeze(&mut self, width: f32) {
        self.width = width;
        self.frozen = true;
    }
}

/// Things that happened, for observers (logging, HUD, audio)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    GrowthStarted,
    GrowthStopped { width: f32 },
    /// Drop landed and the outcome was applied
    RoundResolved { outcome: Outcome, score: u64 },
    LevelUp { level: u32 },
    ColorChanged { color: Color },
    WallsReset { walls: WallGeometry },
    /// Block is back at rest; next round can start
    BlockReady,
    /// Losing drop; the session awaits a reload
    SessionLost { outcome: Outcome, score: u64, level: u32 },
}
