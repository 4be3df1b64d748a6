//! Animation engine interface
//!
//! The game never animates anything itself. It asks an [`Animator`] to run
//! tracks on scene nodes and reacts to the completion cues it gets back.
//! [`Tweener`] is the deterministic implementation used by the runner and
//! the tests; a rendering host can supply its own.

pub mod easing;
pub mod tweener;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Color;

pub use easing::Easing;
pub use tweener::Tweener;

/// Scene nodes the game drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Node {
    Block,
    BaseLeft,
    BaseRight,
    WallLeft,
    WallRight,
    Background,
}

impl Node {
    pub const ALL: [Node; 6] = [
        Node::Block,
        Node::BaseLeft,
        Node::BaseRight,
        Node::WallLeft,
        Node::WallRight,
        Node::Background,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Transform and tint of a node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub pos: Vec2,
    /// Uniform scale
    pub scale: f32,
    /// Rotation in degrees
    pub rotation: f32,
    pub tint: Color,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            scale: 1.0,
            rotation: 0.0,
            tint: Color::WHITE,
        }
    }
}

impl Pose {
    pub fn at(pos: Vec2) -> Self {
        Self {
            pos,
            ..Default::default()
        }
    }
}

/// Something to animate. "To" tracks capture their start value from the
/// node when they begin running, not when they are queued.
#[derive(Debug, Clone, PartialEq)]
pub enum Track {
    ScaleTo { scale: f32, duration: f32 },
    MoveTo { to: Vec2, duration: f32, easing: Easing },
    RotateTo { degrees: f32, duration: f32 },
    TintTo { color: Color, duration: f32 },
    /// Run one after another
    Sequence(Vec<Track>),
    /// Run together; done when the longest finishes
    Spawn(Vec<Track>),
}

impl Track {
    /// Total running time
    pub fn duration(&self) -> f32 {
        match self {
            Track::ScaleTo { duration, .. }
            | Track::MoveTo { duration, .. }
            | Track::RotateTo { duration, .. }
            | Track::TintTo { duration, .. } => duration.max(0.0),
            Track::Sequence(tracks) => tracks.iter().map(Track::duration).sum(),
            Track::Spawn(tracks) => tracks.iter().map(Track::duration).fold(0.0, f32::max),
        }
    }
}

/// Completion signal handed back to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    /// Drop sequence finished, block is at its landing spot
    Landed,
    /// Block is back at rest and ready to grow
    BlockReset,
}

/// Handle to a running tween
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenId(pub u64);

/// Host-side animation scheduler.
///
/// All calls happen on the game thread; `advance` is the only place poses
/// change over time. `cancel` therefore returns exactly the pose applied by
/// the last `advance`, with no in-between tick.
pub trait Animator {
    /// Start `track` on `node`. When it finishes, `cue` (if any) is returned
    /// from `advance`.
    fn play(&mut self, node: Node, track: Track, cue: Option<Cue>) -> TweenId;

    /// Stop a tween where it is. Returns the node pose at the moment of
    /// cancellation, or `None` if the tween had already finished.
    fn cancel(&mut self, id: TweenId) -> Option<Pose>;

    /// Current pose of a node
    fn pose(&self, node: Node) -> Pose;

    /// Place a node instantly
    fn set_pose(&mut self, node: Node, pose: Pose);

    /// Drop every running tween without firing cues
    fn clear(&mut self);

    /// Step time forward; returns cues of tweens that finished, in start order
    fn advance(&mut self, dt: f32) -> Vec<Cue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_duration() {
        let drop = Track::Sequence(vec![
            Track::RotateTo { degrees: 0.0, duration: 0.2 },
            Track::MoveTo { to: Vec2::ZERO, duration: 0.5, easing: Easing::BounceOut },
        ]);
        assert!((drop.duration() - 0.7).abs() < 1e-6);

        let reset = Track::Spawn(vec![
            Track::ScaleTo { scale: 1.0, duration: 0.5 },
            Track::RotateTo { degrees: -45.0, duration: 0.3 },
        ]);
        assert!((reset.duration() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_node_indices_are_dense() {
        for (i, node) in Node::ALL.iter().enumerate() {
            assert_eq!(node.index(), i);
        }
    }
}
