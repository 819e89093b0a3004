use std::f64::consts::{FRAC_PI_3, PI};

use crate::difficulty::object::{MotionSample, SampleKind};

use super::{
    strain::{History, StrainEvaluator},
    SkillKind,
};

/// Adjusting movement and tapping to quickly varying spacing and rhythm.
#[derive(Copy, Clone, Debug, Default)]
pub struct Control;

impl Control {
    const TIME_SCALE_FACTOR: f64 = 20.0;
    const PATTERN_VARIETY_SCALE: f64 = 8.0;
    const TIME_VARIETY_SCALE: f64 = 0.8;
    const PATTERN_WEIGHT: f64 = 0.375;

    /// Relative change between two values, zero if both are zero.
    fn relative_change(curr: f64, prev: f64) -> f64 {
        let avg = (curr + prev) / 2.0;

        if avg == 0.0 {
            0.0
        } else {
            (curr - prev).abs() / avg
        }
    }

    fn angle_scale(curr: f64, prev: f64, prev_prev: Option<f64>) -> f64 {
        let (std_dev, max_std_dev) = match prev_prev {
            Some(prev_prev) => {
                let avg = (curr + prev + prev_prev) / 3.0;
                let sum = (curr - avg).powi(2) + (prev - avg).powi(2) + (prev_prev - avg).powi(2);
                let max = (2.0 * FRAC_PI_3.powi(2) + (PI - FRAC_PI_3).powi(2)) / 2.0;

                ((sum / 2.0).sqrt(), max.sqrt())
            }
            None => {
                let avg = (curr + prev) / 2.0;
                let sum = (curr - avg).powi(2) + (prev - avg).powi(2);
                let max = 2.0 * FRAC_PI_3.powi(2) + (PI - FRAC_PI_3).powi(2);

                (sum.sqrt(), max.sqrt())
            }
        };

        let scale = (1.0 - std_dev / max_std_dev).powi(2);

        1.0 - 0.7 * (2.0 * scale - 1.1).powi(2)
    }
}

/// Ramps from 1 for long intervals down to 0 for short ones, centered at
/// 100ms.
fn time_multiplier(sample: &MotionSample) -> f64 {
    0.5 - ((sample.strain_time - 100.0) / 50.0).tanh() / 2.0
}

/// Maps a relative time change onto how awkward it is to play.
///
/// Simple ratios like 1/2 score low while uneven ones score high.
fn sinusoid(x: f64) -> f64 {
    let (e_power, pi_multiplier, offset) = if x < 2.0 / 3.0 {
        (-1.5, 4.0, -2.0)
    } else {
        (-4.0 / 3.0, 3.0, -2.0 - 1.0 / 6.0)
    };

    2.0 * (e_power * x).exp() * (pi_multiplier * PI / (x + offset)).sin().powi(2)
}

impl StrainEvaluator for Control {
    type State = ();

    const KIND: SkillKind = SkillKind::Control;
    const SKILL_MULTIPLIER: f64 = 5000.0;
    const STRAIN_DECAY_BASE: f64 = 0.3;

    fn strain_value_of(_: &mut Self::State, curr: &MotionSample, history: &History) -> f64 {
        if curr.is_spinner() {
            return 0.0;
        }

        let (Some(prev), Some(prev_prev)) = (history.get(0), history.get(1)) else {
            return 0.0;
        };

        let dist = curr.total_dist();
        let prev_dist = prev.total_dist();
        let prev_prev_dist = prev_prev.total_dist();

        let curr_vel = dist / curr.strain_time;
        let prev_vel = prev_dist / prev.strain_time;
        let prev_prev_vel = prev_prev_dist / prev_prev.strain_time;

        let total_vel_change = (Self::relative_change(curr_vel, prev_vel)
            * Self::relative_change(prev_vel, prev_prev_vel))
        .sqrt();

        let total_dist_change = (Self::relative_change(dist, prev_dist)
            * Self::relative_change(prev_dist, prev_prev_dist))
        .sqrt();

        let angle_scale = match (curr.angle, prev.angle) {
            (Some(angle), Some(prev_angle)) => {
                Self::angle_scale(angle, prev_angle, prev_prev.angle)
            }
            _ => 0.0,
        };

        let time_diff = (curr.strain_time - prev.strain_time).abs();
        let prev_time_diff = (prev.strain_time - prev_prev.strain_time).abs();

        let curr_time_change = sinusoid(Self::relative_change(curr.strain_time, prev.strain_time));
        let prev_time_change =
            sinusoid(Self::relative_change(prev.strain_time, prev_prev.strain_time));
        let total_time_change = (curr_time_change - prev_time_change).abs();

        let slider_change = match (curr.kind, prev.kind) {
            (SampleKind::Slider { velocity }, SampleKind::Slider { velocity: prev_velocity }) => {
                1.5 * Self::relative_change(velocity, prev_velocity)
            }
            _ => 0.0,
        };

        // Stacks and constant rhythm are easier than they look
        let stack_scale = (dist / 100.0).powi(2).min((prev_dist / 100.0).powi(2)).min(1.0);
        let time_scale = Self::TIME_SCALE_FACTOR
            / (Self::TIME_SCALE_FACTOR + (time_diff + prev_time_diff) / 2.0);

        let curr_time_multiplier = time_multiplier(curr);

        let slider_result = curr_time_multiplier * (1.0 - time_scale) * slider_change;

        let pattern_result = Self::PATTERN_VARIETY_SCALE
            * curr_time_multiplier
            * stack_scale
            * time_scale
            * angle_scale
            * (total_vel_change * total_dist_change).sqrt();

        let time_result = curr_time_multiplier.max(time_multiplier(prev))
            * total_time_change.powf(Self::TIME_VARIETY_SCALE);

        (Self::PATTERN_WEIGHT * pattern_result
            + (1.0 - Self::PATTERN_WEIGHT) * time_result
            + slider_result)
            / curr.strain_time.min(prev.strain_time)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn sample(jump_dist: f64, strain_time: f64) -> MotionSample {
        MotionSample {
            jump_dist,
            strain_time,
            delta_time: strain_time,
            angle: Some(PI / 2.0),
            ..Default::default()
        }
    }

    fn history(samples: &[MotionSample]) -> History {
        let mut history = History::default();
        samples.iter().rev().for_each(|sample| history.push(*sample));

        history
    }

    #[test]
    fn needs_two_predecessors() {
        let value = Control::strain_value_of(
            &mut (),
            &sample(100.0, 100.0),
            &history(&[sample(100.0, 100.0)]),
        );

        assert_abs_diff_eq!(value, 0.0);
    }

    #[test]
    fn constant_patterns_are_free() {
        let value = Control::strain_value_of(
            &mut (),
            &sample(100.0, 100.0),
            &history(&[sample(100.0, 100.0), sample(100.0, 100.0)]),
        );

        assert_abs_diff_eq!(value, 0.0);
    }

    #[test]
    fn rhythm_change_is_rewarded() {
        let value = Control::strain_value_of(
            &mut (),
            &sample(100.0, 150.0),
            &history(&[sample(100.0, 100.0), sample(100.0, 100.0)]),
        );

        assert!(value > 0.0);
    }

    #[test]
    fn sinusoid_is_finite() {
        for i in 0..200 {
            let x = f64::from(i) / 100.0;
            assert!(sinusoid(x).is_finite());
        }

        assert_abs_diff_eq!(sinusoid(0.0), 0.0, epsilon = 1e-12);
    }
}
