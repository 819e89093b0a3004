use std::{collections::VecDeque, f64::consts::FRAC_PI_2};

use crate::difficulty::object::MotionSample;

use super::{
    strain::{History, StrainEvaluator},
    SkillKind,
};

/// Switching between rhythms that did not repeat for a while.
#[derive(Copy, Clone, Debug, Default)]
pub struct Rhythm;

#[derive(Clone, Debug)]
pub struct RhythmState {
    /// How often the current interval repeated, shifted so that odd values
    /// mark a fresh switch.
    switch_check: u32,
    /// Recent strain times, their sum bounded by a multiple of the current
    /// one.
    strain_times: VecDeque<f64>,
    strain_times_sum: f64,
}

impl Default for RhythmState {
    fn default() -> Self {
        Self {
            switch_check: 1,
            strain_times: VecDeque::new(),
            strain_times_sum: 0.0,
        }
    }
}

impl Rhythm {
    /// Intervals closer than this count as the same rhythm.
    const INTERVAL_LENIENCY: f64 = 4.0;
    const WINDOW_INTERVALS: f64 = 64.0;
}

impl StrainEvaluator for Rhythm {
    type State = RhythmState;

    const KIND: SkillKind = SkillKind::Rhythm;
    const SKILL_MULTIPLIER: f64 = 500.0;
    const STRAIN_DECAY_BASE: f64 = 0.1;

    fn strain_value_of(state: &mut Self::State, curr: &MotionSample, history: &History) -> f64 {
        if curr.is_spinner() {
            return 0.0;
        }

        let strain_time = curr.strain_time;

        while state.strain_times_sum + strain_time > strain_time * Self::WINDOW_INTERVALS {
            let Some(oldest) = state.strain_times.pop_front() else {
                break;
            };

            state.strain_times_sum -= oldest;
        }

        if state.strain_times.is_empty() {
            state.strain_times_sum = 0.0;
        }

        let mut switch_value = 0.0;
        let mut strain_scale = 0.0;

        if let Some(prev) = history.get(0).filter(|_| !state.strain_times.is_empty()) {
            // Slower rhythms are less demanding
            let max_strain_time = prev.strain_time.max(strain_time);
            strain_scale = (FRAC_PI_2 * (96.0 / max_strain_time).min(1.0)).sin().powi(2);

            if (strain_time - prev.strain_time).abs() < Self::INTERVAL_LENIENCY {
                state.switch_check += 1;
            } else {
                let switch_check = f64::from(state.switch_check);
                switch_value =
                    f64::from(state.switch_check % 2) / (switch_check.powf(0.95) - 2.0).abs();

                if curr.is_slider() || prev.is_slider() {
                    switch_value /= 5.0;
                }

                state.switch_check = match state.switch_check {
                    1 => 4,
                    n if n % 2 == 1 => n + 1,
                    _ => 1,
                };
            }
        }

        state.strain_times.push_back(strain_time);
        state.strain_times_sum += strain_time;

        strain_scale * switch_value
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn tap(strain_time: f64) -> MotionSample {
        MotionSample {
            delta_time: strain_time,
            strain_time,
            ..Default::default()
        }
    }

    fn run(intervals: &[f64]) -> Vec<f64> {
        let mut state = RhythmState::default();
        let mut history = History::default();

        intervals
            .iter()
            .map(|&interval| {
                let sample = tap(interval);
                let value = Rhythm::strain_value_of(&mut state, &sample, &history);
                history.push(sample);

                value
            })
            .collect()
    }

    #[test]
    fn constant_rhythm_is_free() {
        assert!(run(&[100.0; 10]).iter().all(|&value| value == 0.0));
    }

    #[test]
    fn first_switch_counts_fully() {
        let values = run(&[60.0, 60.0, 90.0]);

        // two repeats make the switch count even
        assert_abs_diff_eq!(values[2], 0.0);

        let values = run(&[60.0, 90.0]);
        assert_abs_diff_eq!(values[1], 1.0, epsilon = 1e-12);

        // slow switches are scaled down
        let values = run(&[90.0, 180.0]);
        let scale = (FRAC_PI_2 * 96.0 / 180.0).sin().powi(2);
        assert_abs_diff_eq!(values[1], scale, epsilon = 1e-12);
    }
}
