//! Deterministic tween scheduler
//!
//! Fixed node set, tweens stepped in start order. Nothing here reads the
//! clock; time only moves through [`Tweener::advance`].

use glam::Vec2;

use super::{Animator, Cue, Easing, Node, Pose, Track, TweenId};
use crate::color::Color;
use crate::lerp;

/// A single-property track; composites are unpacked into [`Runner`]s
#[derive(Debug, Clone, Copy)]
enum Leaf {
    Scale { to: f32, duration: f32 },
    Move { to: Vec2, duration: f32, easing: Easing },
    Rotate { to: f32, duration: f32 },
    Tint { to: Color, duration: f32 },
}

/// Start value captured when a leaf begins
#[derive(Debug, Clone, Copy)]
enum Start {
    Scale(f32),
    Pos(Vec2),
    Rotation(f32),
    Tint(Color),
}

impl Leaf {
    fn duration(self) -> f32 {
        match self {
            Leaf::Scale { duration, .. }
            | Leaf::Move { duration, .. }
            | Leaf::Rotate { duration, .. }
            | Leaf::Tint { duration, .. } => duration,
        }
    }

    fn capture(self, pose: &Pose) -> Start {
        match self {
            Leaf::Scale { .. } => Start::Scale(pose.scale),
            Leaf::Move { .. } => Start::Pos(pose.pos),
            Leaf::Rotate { .. } => Start::Rotation(pose.rotation),
            Leaf::Tint { .. } => Start::Tint(pose.tint),
        }
    }

    fn apply(self, from: Start, t: f32, pose: &mut Pose) {
        // Land exactly on the target; lerp at t = 1 can be off by an ulp
        if t >= 1.0 {
            self.snap(pose);
            return;
        }
        match (self, from) {
            (Leaf::Scale { to, .. }, Start::Scale(a)) => pose.scale = lerp(a, to, t),
            (Leaf::Move { to, easing, .. }, Start::Pos(a)) => pose.pos = a.lerp(to, easing.apply(t)),
            (Leaf::Rotate { to, .. }, Start::Rotation(a)) => pose.rotation = lerp(a, to, t),
            (Leaf::Tint { to, .. }, Start::Tint(a)) => pose.tint = a.lerp(to, t),
            _ => {}
        }
    }

    fn snap(self, pose: &mut Pose) {
        match self {
            Leaf::Scale { to, .. } => pose.scale = to,
            Leaf::Move { to, .. } => pose.pos = to,
            Leaf::Rotate { to, .. } => pose.rotation = to,
            Leaf::Tint { to, .. } => pose.tint = to,
        }
    }
}

/// Runtime state of a track
#[derive(Debug, Clone)]
enum Runner {
    Leaf {
        leaf: Leaf,
        elapsed: f32,
        from: Option<Start>,
    },
    Sequence {
        children: Vec<Runner>,
        current: usize,
    },
    Spawn {
        children: Vec<(Runner, bool)>,
    },
}

impl Runner {
    fn new(track: Track) -> Self {
        let leaf = match track {
            Track::Sequence(tracks) => {
                return Runner::Sequence {
                    children: tracks.into_iter().map(Runner::new).collect(),
                    current: 0,
                };
            }
            Track::Spawn(tracks) => {
                return Runner::Spawn {
                    children: tracks.into_iter().map(|t| (Runner::new(t), false)).collect(),
                };
            }
            Track::ScaleTo { scale, duration } => Leaf::Scale { to: scale, duration },
            Track::MoveTo {
                to,
                duration,
                easing,
            } => Leaf::Move {
                to,
                duration,
                easing,
            },
            Track::RotateTo { degrees, duration } => Leaf::Rotate {
                to: degrees,
                duration,
            },
            Track::TintTo { color, duration } => Leaf::Tint {
                to: color,
                duration,
            },
        };
        Runner::Leaf {
            leaf,
            elapsed: 0.0,
            from: None,
        }
    }

    /// Step by `dt`. Returns the unused part of `dt` once finished.
    fn step(&mut self, pose: &mut Pose, dt: f32) -> Option<f32> {
        match self {
            Runner::Leaf {
                leaf,
                elapsed,
                from,
            } => {
                let start = *from.get_or_insert_with(|| leaf.capture(pose));
                let duration = leaf.duration();
                *elapsed += dt;
                let t = if duration <= 0.0 {
                    1.0
                } else {
                    (*elapsed / duration).min(1.0)
                };
                leaf.apply(start, t, pose);
                (*elapsed >= duration).then(|| *elapsed - duration)
            }
            Runner::Sequence { children, current } => {
                let mut left = dt;
                while let Some(child) = children.get_mut(*current) {
                    match child.step(pose, left) {
                        Some(rest) => {
                            *current += 1;
                            left = rest;
                        }
                        None => return None,
                    }
                }
                Some(left)
            }
            Runner::Spawn { children } => {
                // Children done on earlier frames used none of this dt, so the
                // leftover is set by whichever child finishes last this step
                let mut left = dt;
                for (child, done) in children.iter_mut().filter(|(_, done)| !*done) {
                    if let Some(rest) = child.step(pose, dt) {
                        *done = true;
                        left = left.min(rest);
                    }
                }
                children.iter().all(|(_, done)| *done).then_some(left)
            }
        }
    }
}

#[derive(Debug, Clone)]
struct Active {
    id: TweenId,
    node: Node,
    cue: Option<Cue>,
    runner: Runner,
}

/// Reference [`Animator`] with no rendering attached
#[derive(Debug, Clone)]
pub struct Tweener {
    poses: [Pose; Node::ALL.len()],
    active: Vec<Active>,
    next_id: u64,
}

impl Default for Tweener {
    fn default() -> Self {
        Self::new()
    }
}

impl Tweener {
    pub fn new() -> Self {
        Self {
            poses: [Pose::default(); Node::ALL.len()],
            active: Vec::new(),
            next_id: 1,
        }
    }

    /// Number of tweens still running
    pub fn running(&self) -> usize {
        self.active.len()
    }

    pub fn is_running(&self, id: TweenId) -> bool {
        self.active.iter().any(|a| a.id == id)
    }
}

impl Animator for Tweener {
    fn play(&mut self, node: Node, track: Track, cue: Option<Cue>) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.active.push(Active {
            id,
            node,
            cue,
            runner: Runner::new(track),
        });
        id
    }

    fn cancel(&mut self, id: TweenId) -> Option<Pose> {
        let idx = self.active.iter().position(|a| a.id == id)?;
        let cancelled = self.active.remove(idx);
        Some(self.poses[cancelled.node.index()])
    }

    fn pose(&self, node: Node) -> Pose {
        self.poses[node.index()]
    }

    fn set_pose(&mut self, node: Node, pose: Pose) {
        self.poses[node.index()] = pose;
    }

    fn clear(&mut self) {
        self.active.clear();
    }

    fn advance(&mut self, dt: f32) -> Vec<Cue> {
        let mut cues = Vec::new();
        let poses = &mut self.poses;
        self.active.retain_mut(|tween| {
            let pose = &mut poses[tween.node.index()];
            match tween.runner.step(pose, dt) {
                Some(_) => {
                    cues.extend(tween.cue);
                    false
                }
                None => true,
            }
        });
        cues
    }
}
