//! Wave layer parameters and parallax math.
//!
//! Each decorative wave layer gets a one-time randomized animation duration
//! and direction, then a scroll-proportional vertical translation. Later
//! layers animate slower and scroll faster.

use rand::Rng;

/// Lower bound of the random base duration, seconds.
pub const MIN_BASE_DURATION_SECS: f64 = 6.0;

/// Width of the random base duration range, seconds.
pub const DURATION_SPREAD_SECS: f64 = 8.0;

/// Extra duration per layer index, seconds.
pub const DURATION_STEP_SECS: f64 = 2.0;

/// A uniform [0,1) draw above this runs the keyframe animation in reverse.
pub const REVERSE_THRESHOLD: f64 = 0.45;

/// Parallax speed of layer 0.
pub const BASE_SPEED: f64 = 0.15;

/// Extra parallax speed per layer index.
pub const SPEED_STEP: f64 = 0.04;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Animation parameters drawn once per layer at initialization.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct WaveParams {
    pub duration_secs: f64,
    pub direction: Direction,
}

impl WaveParams {
    /// Draw order is fixed (duration, then direction) so a seeded source
    /// reproduces the same page.
    pub fn draw(rng: &mut impl Rng, layer_index: usize) -> Self {
        let base = MIN_BASE_DURATION_SECS + rng.random::<f64>() * DURATION_SPREAD_SECS;
        let duration_secs = base + layer_index as f64 * DURATION_STEP_SECS;
        let direction = if rng.random::<f64>() > REVERSE_THRESHOLD {
            Direction::Reverse
        } else {
            Direction::Forward
        };
        Self {
            duration_secs,
            direction,
        }
    }
}

/// Parallax speed factor for a layer.
pub fn layer_speed(layer_index: usize) -> f64 {
    BASE_SPEED + layer_index as f64 * SPEED_STEP
}

/// Vertical parallax translation for a layer at a scroll offset.
pub fn parallax_offset(scroll_y: f64, layer_index: usize) -> f64 {
    -(scroll_y * layer_speed(layer_index))
}

/// Composes the transform value written to a layer. The horizontal
/// component is owned by the layer's looping keyframe animation; this only
/// carries it through.
pub fn translate3d(x_px: f64, y_px: f64) -> String {
    // Adding 0.0 canonicalizes IEEE negative zero so the value reads "0px".
    format!("translate3d({}px, {}px, 0)", x_px + 0.0, y_px + 0.0)
}

/// Style value for a drawn duration.
pub fn duration_style(duration_secs: f64) -> String {
    format!("{duration_secs}s")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn duration_stays_in_range_and_grows_with_index() {
        let mut rng = StdRng::seed_from_u64(7);
        for i in 0..6 {
            let p = WaveParams::draw(&mut rng, i);
            let lo = MIN_BASE_DURATION_SECS + i as f64 * DURATION_STEP_SECS;
            assert!(p.duration_secs >= lo);
            assert!(p.duration_secs < lo + DURATION_SPREAD_SECS);
        }
    }

    #[test]
    fn draws_are_deterministic_under_a_fixed_seed() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for i in 0..4 {
            assert_eq!(WaveParams::draw(&mut a, i), WaveParams::draw(&mut b, i));
        }
    }

    #[test]
    fn duration_is_monotone_in_index_for_fixed_base_draw() {
        // Same seed restarted per layer fixes the random base, isolating
        // the per-index increment.
        let mut prev = f64::NEG_INFINITY;
        for i in 0..5 {
            let mut rng = StdRng::seed_from_u64(3);
            let p = WaveParams::draw(&mut rng, i);
            assert!(p.duration_secs > prev);
            prev = p.duration_secs;
        }
    }

    #[test]
    fn parallax_is_exact() {
        assert_eq!(parallax_offset(0.0, 0), 0.0);
        assert_eq!(parallax_offset(0.0, 9), 0.0);
        for (s, i) in [(100.0, 0), (100.0, 1), (250.0, 3), (1.0, 7)] {
            assert_eq!(parallax_offset(s, i), -(s * (0.15 + i as f64 * 0.04)));
        }
    }

    #[test]
    fn transform_preserves_horizontal_component() {
        assert_eq!(translate3d(12.5, -30.0), "translate3d(12.5px, -30px, 0)");
        assert_eq!(translate3d(0.0, 0.0), "translate3d(0px, 0px, 0)");
    }

    #[test]
    fn duration_style_is_seconds() {
        assert_eq!(duration_style(8.0), "8s");
        assert_eq!(duration_style(9.25), "9.25s");
    }
}
