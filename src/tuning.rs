//! Data-driven game balance
//!
//! Every number the game uses lives here so a JSON file can override it.
//! Defaults reproduce the shipped game.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{Color, PALETTE};
use crate::consts::*;

/// Rejected tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    InvalidRange { field: &'static str, value: f32 },
    #[error("{field} must be a non-negative duration (got {value})")]
    InvalidDuration { field: &'static str, value: f32 },
    #[error("palette entry {0:?} is not a #rrggbb color")]
    InvalidPalette(String),
    #[error("palette is empty")]
    EmptyPalette,
    #[error("start counter must be at least 1")]
    InvalidCounter,
}

/// Scene layout: node sizes and resting positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Visible height of the viewport; y = 0 is the center
    pub viewport_height: f32,
    /// Extra height of the floor above the viewport bottom
    pub floor_y: f32,
    /// Unscaled block width
    pub block_width: f32,
    /// Height of the outer (base) wall pair
    pub base_wall_height: f32,
    /// Height of the inner wall pair
    pub inner_wall_height: f32,
    /// Where the block waits between rounds
    pub block_rest: Vec2,
    /// Block tilt between rounds (degrees)
    pub block_rest_rotation: f32,
    /// Vertical position of the base wall nodes
    pub base_wall_y: f32,
    /// Vertical position of the inner wall nodes
    pub inner_wall_y: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            viewport_height: 1280.0,
            floor_y: 0.0,
            block_width: 60.0,
            base_wall_height: 240.0,
            inner_wall_height: 120.0,
            block_rest: Vec2::new(0.0, 350.0),
            block_rest_rotation: -45.0,
            base_wall_y: -520.0,
            inner_wall_y: -400.0,
        }
    }
}

/// Game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Gap generation ===
    pub base_gap_min: f32,
    pub base_gap_spread: f32,
    pub wall_margin: f32,
    pub wall_spread: f32,

    // === Growth ===
    pub grow_scale: f32,
    pub grow_duration: f32,

    // === Animation timing (seconds) ===
    pub rotate_duration: f32,
    pub drop_duration: f32,
    pub reset_duration: f32,
    pub wall_slide_duration: f32,
    pub tint_duration: f32,

    // === Landing ===
    pub blocked_overlap: f32,
    pub fall_through_y: f32,

    // === Progression ===
    pub start_counter: u32,
    pub level_counter_factor: u32,

    /// Background colors as `#rrggbb`
    pub palette: Vec<String>,

    pub layout: Layout,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            base_gap_min: BASE_GAP_MIN,
            base_gap_spread: BASE_GAP_SPREAD,
            wall_margin: WALL_MARGIN,
            wall_spread: WALL_SPREAD,

            grow_scale: GROW_SCALE,
            grow_duration: GROW_DURATION,

            rotate_duration: ROTATE_DURATION,
            drop_duration: DROP_DURATION,
            reset_duration: RESET_DURATION,
            wall_slide_duration: WALL_SLIDE_DURATION,
            tint_duration: TINT_DURATION,

            blocked_overlap: BLOCKED_OVERLAP,
            fall_through_y: FALL_THROUGH_Y,

            start_counter: START_COUNTER,
            level_counter_factor: LEVEL_COUNTER_FACTOR,

            palette: PALETTE.iter().map(|s| s.to_string()).collect(),

            layout: Layout::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning file. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json_pretty(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("base_gap_min", self.base_gap_min),
            ("base_gap_spread", self.base_gap_spread),
            ("wall_spread", self.wall_spread),
            ("layout.block_width", self.layout.block_width),
            ("layout.viewport_height", self.layout.viewport_height),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::InvalidRange { field, value });
            }
        }
        if !(self.wall_margin >= 0.0) {
            return Err(TuningError::InvalidRange {
                field: "wall_margin",
                value: self.wall_margin,
            });
        }
        if !(self.grow_scale > 1.0) {
            return Err(TuningError::InvalidRange {
                field: "grow_scale",
                value: self.grow_scale,
            });
        }

        let durations = [
            ("grow_duration", self.grow_duration),
            ("rotate_duration", self.rotate_duration),
            ("drop_duration", self.drop_duration),
            ("reset_duration", self.reset_duration),
            ("wall_slide_duration", self.wall_slide_duration),
            ("tint_duration", self.tint_duration),
        ];
        for (field, value) in durations {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(TuningError::InvalidDuration { field, value });
            }
        }

        if self.palette.is_empty() {
            return Err(TuningError::EmptyPalette);
        }
        self.colors()?;

        if self.start_counter == 0 || self.level_counter_factor == 0 {
            return Err(TuningError::InvalidCounter);
        }
        Ok(())
    }

    /// Parsed palette
    pub fn colors(&self) -> Result<Vec<Color>, TuningError> {
        self.palette
            .iter()
            .map(|hex| Color::from_hex(hex).ok_or_else(|| TuningError::InvalidPalette(hex.clone())))
            .collect()
    }

    /// Largest width the block can reach
    pub fn max_block_width(&self) -> f32 {
        self.layout.block_width * self.grow_scale
    }
}
