//! Easing curves

use serde::{Deserialize, Serialize};

/// Maps linear progress `t` in [0, 1] to eased progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    /// Slow start, hard stop (walls sliding into place)
    CubicIn,
    /// Lands and bounces (block drop)
    BounceOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicIn => t * t * t,
            Easing::BounceOut => bounce_out(t),
        }
    }
}

fn bounce_out(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for easing in [Easing::Linear, Easing::CubicIn, Easing::BounceOut] {
            assert!(easing.apply(0.0).abs() < 1e-5, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-5, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_cubic_in_starts_slow() {
        assert!(Easing::CubicIn.apply(0.5) < 0.5);
        assert!((Easing::CubicIn.apply(0.5) - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_out_stays_in_range() {
        for i in 0..=100 {
            let v = Easing::BounceOut.apply(i as f32 / 100.0);
            assert!((0.0..=1.0 + 1e-5).contains(&v));
        }
        // First contact with the floor happens at t = 1/2.75
        assert!((Easing::BounceOut.apply(1.0 / 2.75) - 1.0).abs() < 1e-4);
    }
}
