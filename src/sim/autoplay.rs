//! Autopilot: plays the game from the outside, one frame of input at a time
//!
//! Presses whenever the round is idle, picks a target width when growth
//! starts and releases once the displayed block reaches it. `skill` controls
//! how far the target may stray from the middle of the success window.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::session::{Hud, Session, TickInput};
use super::state::RoundState;
use crate::anim::Animator;

/// How far a zero-skill player can miss the middle of the window
const MAX_AIM_ERROR: f32 = 80.0;

#[derive(Debug, Clone)]
pub struct Autopilot {
    skill: f32,
    rng: Pcg32,
    target: Option<f32>,
}

impl Autopilot {
    /// `skill` is clamped to [0, 1]; 1 always releases mid-window
    pub fn new(seed: u64, skill: f32) -> Self {
        Self {
            skill: skill.clamp(0.0, 1.0),
            rng: Pcg32::seed_from_u64(seed),
            target: None,
        }
    }

    pub fn skill(&self) -> f32 {
        self.skill
    }

    /// Width the autopilot is waiting for, if growing
    pub fn target(&self) -> Option<f32> {
        self.target
    }

    /// Decide this frame's input
    pub fn input<A: Animator, H: Hud>(&mut self, session: &Session<A, H>) -> TickInput {
        if session.awaiting_reload() {
            self.target = None;
            return TickInput::default();
        }
        match session.round() {
            RoundState::Idle => {
                self.target = None;
                TickInput {
                    press_start: true,
                    press_end: false,
                }
            }
            RoundState::Growing => {
                let target = match self.target {
                    Some(t) => t,
                    None => {
                        let t = self.aim(session);
                        self.target = Some(t);
                        t
                    }
                };
                TickInput {
                    press_start: false,
                    press_end: session.live_block_width() >= target,
                }
            }
            RoundState::Falling => TickInput::default(),
        }
    }

    fn aim<A: Animator, H: Hud>(&mut self, session: &Session<A, H>) -> f32 {
        let walls = session.walls();
        let mid = (walls.base_gap + walls.wall_gap) / 2.0;
        let noise = self.rng.random::<f32>() * 2.0 - 1.0;
        mid + noise * (1.0 - self.skill) * MAX_AIM_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::Tweener;
    use crate::sim::session::TextHud;
    use crate::tuning::Tuning;

    const DT: f32 = 1.0 / 120.0;

    #[test]
    fn test_perfect_autopilot_keeps_scoring() {
        let mut session =
            Session::new(2024, Tuning::default(), Tweener::new(), TextHud::default()).unwrap();
        let mut pilot = Autopilot::new(1, 1.0);

        for _ in 0..(120 * 120) {
            let input = pilot.input(&session);
            session.tick(&input, DT);
            assert!(!session.awaiting_reload());
        }
        assert!(session.progression().score >= 20);
        assert!(session.progression().level >= 4);
    }

    #[test]
    fn test_idle_press_and_no_input_while_falling() {
        let mut session =
            Session::new(5, Tuning::default(), Tweener::new(), TextHud::default()).unwrap();
        let mut pilot = Autopilot::new(1, 0.5);

        assert!(pilot.input(&session).press_start);
        session.tick(&pilot.input(&session), DT);
        assert_eq!(session.round(), RoundState::Growing);
        let _ = pilot.input(&session);
        assert!(pilot.target().is_some());

        session.stop_growth();
        let input = pilot.input(&session);
        assert!(!input.press_start && !input.press_end);
    }

    #[test]
    fn test_skill_is_clamped() {
        assert_eq!(Autopilot::new(0, 3.0).skill(), 1.0);
        assert_eq!(Autopilot::new(0, -1.0).skill(), 0.0);
    }
}
