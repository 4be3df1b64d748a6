//! Score, level and background color progression

use rand::Rng;

use super::state::{Outcome, ProgressionState};
use crate::color::Color;
use crate::tuning::Tuning;

/// What recording an outcome did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Scored, same level
    Advanced,
    /// Scored and reached a new level
    LeveledUp { level: u32 },
    /// Losing outcome; nothing changed and the session is over
    SessionOver,
}

impl ProgressionState {
    /// Apply a round outcome. Only `Success` changes anything.
    pub fn record_outcome(&mut self, outcome: Outcome, tuning: &Tuning) -> Progress {
        if !outcome.is_success() {
            return Progress::SessionOver;
        }
        self.score += 1;
        self.rounds_until_level_up = self.rounds_until_level_up.saturating_sub(1);
        if self.rounds_until_level_up == 0 {
            self.level_up(tuning);
            return Progress::LeveledUp { level: self.level };
        }
        Progress::Advanced
    }

    /// Next level; the counter restarts at `factor * level`
    pub fn level_up(&mut self, tuning: &Tuning) {
        self.level += 1;
        self.rounds_until_level_up = tuning.level_counter_factor * self.level;
    }
}

/// Uniform pick from the palette. Independent of level and score.
pub fn select_color<R: Rng>(rng: &mut R, palette: &[Color]) -> Color {
    if palette.is_empty() {
        return Color::WHITE;
    }
    palette[rng.random_range(0..palette.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_two_successes_level_up() {
        let tuning = Tuning::default();
        let mut p = ProgressionState::new(&tuning);

        assert_eq!(p.record_outcome(Outcome::Success, &tuning), Progress::Advanced);
        assert_eq!((p.score, p.level, p.rounds_until_level_up), (1, 1, 1));

        assert_eq!(
            p.record_outcome(Outcome::Success, &tuning),
            Progress::LeveledUp { level: 2 }
        );
        assert_eq!((p.score, p.level, p.rounds_until_level_up), (2, 2, 4));
    }

    #[test]
    fn test_failures_do_not_progress() {
        let tuning = Tuning::default();
        for outcome in [Outcome::FallThrough, Outcome::Blocked] {
            let mut p = ProgressionState::new(&tuning);
            assert_eq!(p.record_outcome(outcome, &tuning), Progress::SessionOver);
            assert_eq!(p, ProgressionState::new(&tuning));
        }
    }

    #[test]
    fn test_level_up_counter() {
        let tuning = Tuning::default();
        let mut p = ProgressionState::new(&tuning);
        p.level_up(&tuning);
        assert_eq!((p.level, p.rounds_until_level_up), (2, 4));
        p.level_up(&tuning);
        assert_eq!((p.level, p.rounds_until_level_up), (3, 6));
    }

    #[test]
    fn test_select_color_covers_palette() {
        let palette = Tuning::default().colors().unwrap();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = vec![false; palette.len()];
        for _ in 0..500 {
            let c = select_color(&mut rng, &palette);
            let i = palette.iter().position(|p| *p == c).unwrap();
            seen[i] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_select_color_edge_palettes() {
        let mut rng = Pcg32::seed_from_u64(5);
        let only = Color::rgb(0x58, 0x8c, 0x7e);
        for _ in 0..20 {
            assert_eq!(select_color(&mut rng, &[only]), only);
        }
        assert_eq!(select_color(&mut rng, &[]), Color::WHITE);
    }
}
