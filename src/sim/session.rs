//! One game session: input in, animation requests out
//!
//! Round flow: press starts growth, release freezes the width and drops the
//! block, the landing cue applies the outcome. A success resets walls and
//! block and the round returns to Idle once the block is back at rest. A loss
//! asks the host to reload and ignores everything until it does.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::progression::{Progress, select_color};
use super::resolve::{generate_walls, landing_y, resolve_outcome};
use super::state::{
    BlockGeometry, GameEvent, Outcome, ProgressionState, RoundState, WallGeometry,
};
use crate::anim::{Animator, Cue, Easing, Node, Pose, Track, TweenId};
use crate::color::Color;
use crate::tuning::{Tuning, TuningError};

/// Text and scene requests going out to the display
pub trait Hud {
    fn set_title(&mut self, text: &str);
    fn set_counter(&mut self, text: &str);
    /// The run is lost; the host should call [`Session::reload`]
    fn request_reload(&mut self);
}

/// Hud that just keeps the latest strings
#[derive(Debug, Clone, Default)]
pub struct TextHud {
    pub title: String,
    pub counter: String,
    pub reload_requests: u32,
}

impl Hud for TextHud {
    fn set_title(&mut self, text: &str) {
        self.title = text.to_string();
    }

    fn set_counter(&mut self, text: &str) {
        self.counter = text.to_string();
    }

    fn request_reload(&mut self) {
        self.reload_requests += 1;
    }
}

/// Input for a single frame. Any press counts; position is irrelevant.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub press_start: bool,
    pub press_end: bool,
}

/// Running tweens the session may need to stop
#[derive(Debug, Clone, Default)]
struct Handles {
    grow: Option<TweenId>,
    drop: Option<TweenId>,
    reset: Option<TweenId>,
    tint: Option<TweenId>,
    walls: Vec<TweenId>,
}

const WALL_NODES: [(Node, f32); 4] = [
    (Node::BaseLeft, -1.0),
    (Node::BaseRight, 1.0),
    (Node::WallLeft, -1.0),
    (Node::WallRight, 1.0),
];

/// A game session, constructed once and owned by whatever runs the loop
pub struct Session<A: Animator, H: Hud> {
    tuning: Tuning,
    palette: Vec<Color>,
    seed: u64,
    rng: Pcg32,
    animator: A,
    hud: H,
    round: RoundState,
    progression: ProgressionState,
    walls: WallGeometry,
    block: BlockGeometry,
    color: Color,
    pending: Option<Outcome>,
    awaiting_reload: bool,
    rounds_played: u32,
    handles: Handles,
    events: Vec<GameEvent>,
}

impl<A: Animator, H: Hud> Session<A, H> {
    pub fn new(seed: u64, tuning: Tuning, animator: A, hud: H) -> Result<Self, TuningError> {
        tuning.validate()?;
        let palette = tuning.colors()?;
        let mut session = Self {
            block: BlockGeometry::at_rest(tuning.layout.block_width),
            progression: ProgressionState::new(&tuning),
            walls: WallGeometry::new(tuning.base_gap_min, tuning.base_gap_min + tuning.wall_margin),
            tuning,
            palette,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            animator,
            hud,
            round: RoundState::Idle,
            color: Color::WHITE,
            pending: None,
            awaiting_reload: false,
            rounds_played: 0,
            handles: Handles::default(),
            events: Vec::new(),
        };
        session.init();
        Ok(session)
    }

    /// Full reset after a loss: fresh progression, fresh scene, next seed
    pub fn reload(&mut self) {
        self.animator.clear();
        self.handles = Handles::default();
        self.seed = self.rng.random();
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.init();
    }

    fn init(&mut self) {
        let layout = &self.tuning.layout;
        self.animator.set_pose(
            Node::Block,
            Pose {
                pos: layout.block_rest,
                rotation: layout.block_rest_rotation,
                ..Default::default()
            },
        );
        for (node, _) in WALL_NODES {
            let y = match node {
                Node::BaseLeft | Node::BaseRight => layout.base_wall_y,
                _ => layout.inner_wall_y,
            };
            self.animator.set_pose(node, Pose::at(Vec2::new(0.0, y)));
        }
        self.animator.set_pose(Node::Background, Pose::default());

        self.round = RoundState::Idle;
        self.progression = ProgressionState::new(&self.tuning);
        self.block = BlockGeometry::at_rest(layout.block_width);
        self.pending = None;
        self.awaiting_reload = false;
        self.rounds_played = 0;

        log::info!("Session started with seed: {}", self.seed);
        self.update_hud();
        self.set_color();
        self.reset_wall();
    }

    // === Round state machine ===

    /// Press: begin widening the block. Ignored unless Idle.
    pub fn start_growth(&mut self) {
        if self.round != RoundState::Idle || self.awaiting_reload {
            return;
        }
        self.round = RoundState::Growing;
        self.block = BlockGeometry::at_rest(self.live_block_width());
        let grow = Track::ScaleTo {
            scale: self.tuning.grow_scale,
            duration: self.tuning.grow_duration,
        };
        self.handles.grow = Some(self.animator.play(Node::Block, grow, None));
        self.events.push(GameEvent::GrowthStarted);
    }

    /// Release: freeze the width where the growth tween left it and drop.
    /// Ignored unless Growing.
    pub fn stop_growth(&mut self) {
        if self.round != RoundState::Growing {
            return;
        }
        self.round = RoundState::Falling;
        // A finished growth tween has nothing to cancel; its final pose stands
        let pose = self
            .handles
            .grow
            .take()
            .and_then(|id| self.animator.cancel(id))
            .unwrap_or_else(|| self.animator.pose(Node::Block));
        let width = self.tuning.layout.block_width * pose.scale;
        self.block.freeze(width);
        self.events.push(GameEvent::GrowthStopped { width });
        self.drop_down();
    }

    fn drop_down(&mut self) {
        let width = self.block.width;
        let outcome = resolve_outcome(width, &self.walls);
        let dest = landing_y(outcome, width, &self.tuning);
        log::debug!(
            "Drop: width={:.1} base_gap={:.1} wall_gap={:.1} -> {:?}",
            width,
            self.walls.base_gap,
            self.walls.wall_gap,
            outcome
        );

        self.pending = Some(outcome);
        let drop = Track::Sequence(vec![
            Track::RotateTo {
                degrees: 0.0,
                duration: self.tuning.rotate_duration,
            },
            Track::MoveTo {
                to: Vec2::new(0.0, dest),
                duration: self.tuning.drop_duration,
                easing: Easing::BounceOut,
            },
        ]);
        self.handles.drop = Some(self.animator.play(Node::Block, drop, Some(Cue::Landed)));
    }

    /// Apply a landed outcome. Ignored unless Falling.
    ///
    /// Success scores and starts the wall and block resets; the round goes
    /// back to Idle when the block reset finishes. Any other outcome ends the
    /// session.
    pub fn resolve_round(&mut self, outcome: Outcome) {
        if self.round != RoundState::Falling || self.awaiting_reload {
            return;
        }
        self.pending = None;

        match self.progression.record_outcome(outcome, &self.tuning) {
            Progress::SessionOver => {
                self.awaiting_reload = true;
                log::info!(
                    "Session lost ({:?}) at score {}, level {}",
                    outcome,
                    self.progression.score,
                    self.progression.level
                );
                self.events.push(GameEvent::SessionLost {
                    outcome,
                    score: self.progression.score,
                    level: self.progression.level,
                });
                self.hud.request_reload();
                return;
            }
            Progress::LeveledUp { level } => {
                log::info!("Level up: {}", level);
                self.events.push(GameEvent::LevelUp { level });
                self.set_color();
            }
            Progress::Advanced => {}
        }

        self.rounds_played += 1;
        self.events.push(GameEvent::RoundResolved {
            outcome,
            score: self.progression.score,
        });
        self.update_hud();
        self.reset_wall();
        self.reset_block();
    }

    /// Animate the block back to rest. The round stays Falling until it
    /// arrives, so a press or release mid-reset is ignored.
    pub fn reset_block(&mut self) {
        for id in [
            self.handles.grow.take(),
            self.handles.drop.take(),
            self.handles.reset.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.animator.cancel(id);
        }
        self.pending = None;
        if !self.awaiting_reload {
            self.round = RoundState::Falling;
        }

        let duration = self.tuning.reset_duration;
        let layout = &self.tuning.layout;
        let reset = Track::Spawn(vec![
            Track::ScaleTo {
                scale: 1.0,
                duration,
            },
            Track::MoveTo {
                to: layout.block_rest,
                duration,
                easing: Easing::Linear,
            },
            Track::RotateTo {
                degrees: layout.block_rest_rotation,
                duration,
            },
        ]);
        self.handles.reset = Some(self.animator.play(Node::Block, reset, Some(Cue::BlockReset)));
    }

    /// Draw new gaps and slide the four wall nodes to them
    pub fn reset_wall(&mut self) {
        for id in self.handles.walls.drain(..) {
            self.animator.cancel(id);
        }

        self.walls = generate_walls(&mut self.rng, &self.tuning);
        log::debug!(
            "Walls: base_gap={:.1} wall_gap={:.1}",
            self.walls.base_gap,
            self.walls.wall_gap
        );

        for (node, side) in WALL_NODES {
            let gap = match node {
                Node::BaseLeft | Node::BaseRight => self.walls.base_gap,
                _ => self.walls.wall_gap,
            };
            let y = self.animator.pose(node).pos.y;
            let slide = Track::MoveTo {
                to: Vec2::new(side * gap / 2.0, y),
                duration: self.tuning.wall_slide_duration,
                easing: Easing::CubicIn,
            };
            self.handles.walls.push(self.animator.play(node, slide, None));
        }
        self.events.push(GameEvent::WallsReset { walls: self.walls });
    }

    // === Progression presentation ===

    fn set_color(&mut self) {
        if let Some(id) = self.handles.tint.take() {
            self.animator.cancel(id);
        }
        self.color = select_color(&mut self.rng, &self.palette);
        let tint = Track::TintTo {
            color: self.color,
            duration: self.tuning.tint_duration,
        };
        self.handles.tint = Some(self.animator.play(Node::Background, tint, None));
        self.events.push(GameEvent::ColorChanged { color: self.color });
    }

    fn update_hud(&mut self) {
        self.hud.set_title(&self.progression.title());
        self.hud.set_counter(&self.progression.counter());
    }

    // === Frame driver ===

    /// Apply one frame of input, then advance animations and react to cues
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        if input.press_start {
            self.start_growth();
        }
        if input.press_end {
            self.stop_growth();
        }

        for cue in self.animator.advance(dt) {
            self.handle_cue(cue);
        }

        if self.round == RoundState::Growing {
            self.block.width = self.live_block_width();
        }
    }

    /// React to an animation completion
    pub fn handle_cue(&mut self, cue: Cue) {
        match cue {
            Cue::Landed => {
                if let Some(outcome) = self.pending.take() {
                    self.resolve_round(outcome);
                }
            }
            Cue::BlockReset => {
                self.handles.reset = None;
                if self.awaiting_reload {
                    return;
                }
                self.round = RoundState::Idle;
                self.block = BlockGeometry::at_rest(self.live_block_width());
                self.events.push(GameEvent::BlockReady);
            }
        }
    }

    // === Accessors ===

    pub fn round(&self) -> RoundState {
        self.round
    }

    pub fn progression(&self) -> &ProgressionState {
        &self.progression
    }

    pub fn walls(&self) -> &WallGeometry {
        &self.walls
    }

    pub fn block(&self) -> &BlockGeometry {
        &self.block
    }

    /// Block width as currently displayed (changes while growing)
    pub fn live_block_width(&self) -> f32 {
        self.tuning.layout.block_width * self.animator.pose(Node::Block).scale
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// True after a losing drop until [`Session::reload`]
    pub fn awaiting_reload(&self) -> bool {
        self.awaiting_reload
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    pub fn hud(&self) -> &H {
        &self.hud
    }

    /// Take all events since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
