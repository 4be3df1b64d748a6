//! Property tests for the round rules.
//!
//! - Outcome classification follows the half-open intervals for any gaps.
//! - Progression levels up exactly when the counter runs out.
//! - Wall regeneration always keeps the fixed margin and bounded spread.
//! - Growth calls outside their source state change nothing.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use stack_gap::Tuning;
use stack_gap::anim::{Animator, Node, Tweener};
use stack_gap::sim::{
    Outcome, Progress, ProgressionState, RoundState, Session, TextHud, TickInput, WallGeometry,
    generate_walls, resolve_outcome,
};

const DT: f32 = 1.0 / 120.0;

proptest! {
    #[test]
    fn outcome_matches_intervals(
        base_gap in 1.0f32..500.0,
        margin in 0.01f32..300.0,
        width in 0.0f32..1000.0,
    ) {
        let walls = WallGeometry::new(base_gap, base_gap + margin);
        prop_assume!(walls.wall_gap > walls.base_gap);
        let outcome = resolve_outcome(width, &walls);

        prop_assert_eq!(outcome == Outcome::FallThrough, width < walls.base_gap);
        prop_assert_eq!(
            outcome == Outcome::Success,
            walls.base_gap <= width && width < walls.wall_gap
        );
        prop_assert_eq!(outcome == Outcome::Blocked, width >= walls.wall_gap);

        // Boundaries
        prop_assert_eq!(resolve_outcome(walls.base_gap, &walls), Outcome::Success);
        prop_assert_eq!(resolve_outcome(walls.wall_gap, &walls), Outcome::Blocked);
    }

    #[test]
    fn level_up_happens_exactly_when_counter_runs_out(
        level in 1u32..50,
        counter in 1u32..20,
        successes in 0u32..40,
    ) {
        let tuning = Tuning::default();
        let mut p = ProgressionState { score: 0, level, rounds_until_level_up: counter };

        for n in 1..=successes {
            let before = p;
            let progress = p.record_outcome(Outcome::Success, &tuning);
            prop_assert_eq!(p.score, before.score + 1);
            if before.rounds_until_level_up == 1 {
                prop_assert_eq!(progress, Progress::LeveledUp { level: before.level + 1 });
                prop_assert_eq!(p.level, before.level + 1);
                prop_assert_eq!(p.rounds_until_level_up, 2 * p.level);
            } else {
                prop_assert_eq!(progress, Progress::Advanced);
                prop_assert_eq!(p.level, before.level);
                prop_assert_eq!(p.rounds_until_level_up, before.rounds_until_level_up - 1);
            }
            // First level-up lands on success number `counter`, not before
            if n < counter {
                prop_assert_eq!(p.level, level);
            } else if n == counter {
                prop_assert_eq!(p.level, level + 1);
                prop_assert_eq!(p.rounds_until_level_up, 2 * (level + 1));
            }
        }
    }

    #[test]
    fn regenerated_walls_keep_margin(seed in any::<u64>()) {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(seed);
        for _ in 0..32 {
            let walls = generate_walls(&mut rng, &tuning);
            prop_assert!(walls.base_gap >= 100.0 && walls.base_gap < 200.0);
            let delta = walls.wall_gap - walls.base_gap - 30.0;
            prop_assert!(delta > -1e-3 && delta < 50.0 + 1e-3, "delta = {}", delta);
        }
    }

    #[test]
    fn illegal_growth_calls_are_no_ops(seed in any::<u64>(), frames in 1usize..200) {
        let mut session =
            Session::new(seed, Tuning::default(), Tweener::new(), TextHud::default()).unwrap();
        session.drain_events();

        // Stop from Idle
        session.stop_growth();
        prop_assert_eq!(session.round(), RoundState::Idle);
        prop_assert!(session.drain_events().is_empty());

        // Start twice; the second start must not touch the trajectory
        session.start_growth();
        let running = session.animator().running();
        for _ in 0..frames {
            session.tick(&TickInput::default(), DT);
        }
        let before = session.animator().pose(Node::Block);
        session.drain_events();
        session.start_growth();
        prop_assert!(session.drain_events().is_empty());
        prop_assert_eq!(session.animator().pose(Node::Block), before);
        prop_assert!(session.animator().running() <= running);
        prop_assert_eq!(session.round(), RoundState::Growing);
    }
}
