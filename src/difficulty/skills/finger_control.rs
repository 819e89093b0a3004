use crate::difficulty::object::MotionSample;

use super::{
    strain::{History, StrainEvaluator},
    SkillKind,
};

/// Alternating fingers on short bursts of repeated rhythm.
#[derive(Copy, Clone, Debug, Default)]
pub struct FingerControl;

#[derive(Clone, Debug)]
pub struct FingerControlState {
    strain_decay: f64,
    repeat_count: u32,
    prev_repeat_count: u32,
}

impl Default for FingerControlState {
    fn default() -> Self {
        Self {
            strain_decay: FingerControl::STRAIN_DECAY_BASE,
            repeat_count: 0,
            prev_repeat_count: 0,
        }
    }
}

impl FingerControl {
    /// Intervals closer than this count as the same rhythm.
    const INTERVAL_LENIENCY: f64 = 5.0;

    fn hold_interval(sample: &MotionSample) -> f64 {
        (sample.strain_time - sample.travel_duration).max(50.0)
    }
}

impl StrainEvaluator for FingerControl {
    type State = FingerControlState;

    const KIND: SkillKind = SkillKind::FingerControl;
    const SKILL_MULTIPLIER: f64 = 25.0;
    const STRAIN_DECAY_BASE: f64 = 1.0;

    fn decay_base(state: &Self::State) -> f64 {
        state.strain_decay
    }

    fn strain_value_of(state: &mut Self::State, curr: &MotionSample, history: &History) -> f64 {
        if curr.is_spinner() {
            return 0.0;
        }

        state.strain_decay = (8.0_f64 / 9.0).powf(1000.0 / curr.strain_time.min(100.0));

        let mut strain = (100.0 / curr.strain_time).powf(0.45);

        if curr.is_slider() {
            strain /= 4.0;
        }

        if history.len() <= 1 {
            return strain;
        }

        let prev = &history[0];

        if (curr.strain_time - prev.strain_time).abs() > Self::INTERVAL_LENIENCY {
            let hold_change = (Self::hold_interval(prev) - Self::hold_interval(curr)).abs();

            if hold_change > Self::INTERVAL_LENIENCY {
                state.prev_repeat_count = state.repeat_count;
                state.repeat_count = 0;
            } else {
                state.prev_repeat_count = state.repeat_count + 2;
                state.repeat_count = 2;
            }
        } else {
            state.repeat_count += 1;
        }

        let repeat_value = 2.0 * 0.6_f64.powf(f64::from(state.repeat_count));

        if state.repeat_count % 2 == 1 {
            0.0
        } else if state.repeat_count == state.prev_repeat_count {
            strain * repeat_value / 2.0
        } else {
            strain * repeat_value
        }
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

    #[test]
    fn odd_repeats_are_free() {
        let mut state = FingerControlState::default();
        let mut history = History::default();

        let mut values = Vec::new();

        for _ in 0..5 {
            let sample = tap(100.0);
            values.push(FingerControl::strain_value_of(&mut state, &sample, &history));
            history.push(sample);
        }

        // the first two samples lack a rhythm to compare against
        assert_abs_diff_eq!(values[0], 1.0);
        assert_abs_diff_eq!(values[1], 1.0);
        assert_abs_diff_eq!(values[2], 0.0);
        assert_abs_diff_eq!(values[3], 2.0 * 0.36, epsilon = 1e-12);
        assert_abs_diff_eq!(values[4], 0.0);
    }

    #[test]
    fn rhythm_change_resets_count() {
        let mut state = FingerControlState::default();
        let mut history = History::default();

        for _ in 0..3 {
            let sample = tap(100.0);
            FingerControl::strain_value_of(&mut state, &sample, &history);
            history.push(sample);
        }

        let value = FingerControl::strain_value_of(&mut state, &tap(200.0), &history);

        assert_eq!(state.repeat_count, 0);
        assert_eq!(state.prev_repeat_count, 1);
        assert_abs_diff_eq!(value, 2.0 * 0.5_f64.powf(0.45), epsilon = 1e-12);
        assert_abs_diff_eq!(FingerControl::decay_base(&state), 0.307_946_147_657_438_55, epsilon = 1e-12);
    }
}
