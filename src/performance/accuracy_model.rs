//! Estimating the hit error deviation of a score.
//!
//! Hit errors are assumed to be normally distributed around zero. The
//! deviation is the one whose expected accuracy matches the score's accuracy
//! on circles. Sliders only require hitting the meh window so their
//! deviation is estimated from the share of sliders that were not missed.

use std::f64::consts::SQRT_2;

use crate::{
    score_state::ScoreState,
    util::{
        mods::Mods,
        special_functions::{erf, erf_inv},
    },
};

/// Lower and upper probability bound before inverting `erf`.
const PROBABILITY_EPSILON: f64 = 1e-9;

/// Bisection stops once the deviation is pinned down to this many ms.
const PRECISION: f64 = 0.01;

const MAX_ITERATIONS: usize = 100;

/// Timing windows of each hit result in ms.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitWindows {
    pub great: f64,
    pub ok: f64,
    pub meh: f64,
}

impl HitWindows {
    /// Windows for the given clock-adjusted overall difficulty.
    pub fn new(od: f64) -> Self {
        Self {
            great: (80.0 - 6.0 * od).max(1.0),
            ok: (140.0 - 8.0 * od).max(1.0),
            meh: (200.0 - 10.0 * od).max(1.0),
        }
    }

    /// Accuracy we expect from hit errors with the given deviation.
    fn expected_accuracy(&self, deviation: f64) -> f64 {
        let within = |window: f64| erf(window / (SQRT_2 * deviation));

        let p300 = within(self.great);
        let p100 = within(self.ok) - p300;
        let p50 = within(self.meh) - p300 - p100;

        (6.0 * p300 + 2.0 * p100 + p50) / 6.0
    }
}

/// Deviation for which `window` is hit with probability `p`.
fn deviation_for(window: f64, p: f64) -> f64 {
    let p = p.clamp(PROBABILITY_EPSILON, 1.0 - PROBABILITY_EPSILON);

    window / (SQRT_2 * erf_inv(p))
}

/// Estimated deviation of hit errors in ms.
///
/// If the circle accuracy is so low that no deviation explains it, only the
/// sliders are considered. `None` if neither gives an estimate.
pub fn deviation(od: f64, state: &ScoreState, n_circles: u32, n_sliders: u32) -> Option<f64> {
    let windows = HitWindows::new(od);

    let circles = match n_circles {
        0 => None,
        _ => circle_deviation(&windows, state, n_circles),
    };

    let sliders = slider_deviation(&windows, state, n_sliders);

    match (circles, sliders) {
        (Some(circles), Some(sliders)) => Some((circles.powi(-2) + sliders.powi(-2)).powf(-0.5)),
        (Some(deviation), None) | (None, Some(deviation)) => Some(deviation),
        (None, None) => None,
    }
}

fn circle_deviation(windows: &HitWindows, state: &ScoreState, n_circles: u32) -> Option<f64> {
    let n_circles = f64::from(n_circles);
    let n_others = f64::from(state.total_hits()) - n_circles;

    // Assume everything that isn't a circle got a 300
    let better_acc = (6.0 * (f64::from(state.n300) - n_others)
        + 2.0 * f64::from(state.n100)
        + f64::from(state.n50))
        / (6.0 * n_circles);

    if better_acc <= 0.0 {
        return None;
    }

    // Few circles say little about the actual accuracy
    let acc = better_acc * n_circles / (n_circles + 1.0);

    let mut lo = deviation_for(windows.great, acc);
    let mut hi = deviation_for(windows.meh, acc);

    for _ in 0..MAX_ITERATIONS {
        if hi - lo < PRECISION {
            break;
        }

        let mid = (lo + hi) / 2.0;

        if windows.expected_accuracy(mid) > acc {
            lo = mid;
        } else {
            hi = mid;
        }

        tracing::trace!(lo, hi, "circle deviation");
    }

    Some((lo + hi) / 2.0)
}

fn slider_deviation(windows: &HitWindows, state: &ScoreState, n_sliders: u32) -> Option<f64> {
    let total_hits = state.total_hits();

    if n_sliders == 0 || total_hits == 0 {
        return None;
    }

    let n_sliders = f64::from(n_sliders);

    // Misses are spread evenly over all objects
    let slider_misses = f64::from(state.n_misses) * n_sliders / f64::from(total_hits);
    let hits = (n_sliders - slider_misses).max(0.0);

    Some(deviation_for(windows.meh, (hits + 0.5) / (n_sliders + 1.0)))
}

/// Performance points for the given deviation.
pub fn accuracy_value(deviation: f64, n_circles: u32, mods: u32, accuracy_rating: f64) -> f64 {
    let mut value = 400.0 * 1.1_f64.powf(-deviation);

    // Keeping good accuracy is harder over many circles
    value *= (f64::from(n_circles) / 1000.0).powf(0.3).min(1.15);

    if mods.hd() {
        value *= 1.08;
    }

    if mods.fl() {
        value *= 1.02;
    }

    value * (1.0 + accuracy_rating.min(1.0) / 2.0)
}
