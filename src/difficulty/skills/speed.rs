use crate::difficulty::object::MotionSample;

use super::{
    strain::{History, StrainEvaluator},
    SkillKind,
};

/// Raw tapping speed.
#[derive(Copy, Clone, Debug, Default)]
pub struct Speed;

/// The decay base is derived from the last tapped interval; until then
/// nothing decays.
#[derive(Clone, Debug)]
pub struct SpeedState {
    strain_decay: f64,
}

impl Default for SpeedState {
    fn default() -> Self {
        Self {
            strain_decay: Speed::STRAIN_DECAY_BASE,
        }
    }
}

impl Speed {
    /// Shortest interval that is still considered, about 400 BPM streams.
    const MIN_INTERVAL: f64 = 37.5;
    const SINGLE_TAP_INTERVAL: f64 = 75.0;
}

impl StrainEvaluator for Speed {
    type State = SpeedState;

    const KIND: SkillKind = SkillKind::Speed;
    const SKILL_MULTIPLIER: f64 = 20.0;
    const STRAIN_DECAY_BASE: f64 = 1.0;

    fn decay_base(state: &Self::State) -> f64 {
        state.strain_decay
    }

    fn strain_value_of(state: &mut Self::State, curr: &MotionSample, _: &History) -> f64 {
        if curr.is_spinner() {
            return 0.0;
        }

        let interval = curr.delta_time.max(Self::MIN_INTERVAL);
        state.strain_decay = (7.0_f64 / 8.0).powf(1000.0 / interval.min(200.0));

        if interval < Self::SINGLE_TAP_INTERVAL {
            (Self::SINGLE_TAP_INTERVAL / interval).powf(1.75)
        } else {
            Self::SINGLE_TAP_INTERVAL / interval
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn tap(delta_time: f64) -> MotionSample {
        MotionSample {
            delta_time,
            strain_time: delta_time.max(MotionSample::MIN_DELTA_TIME),
            ..Default::default()
        }
    }

    #[test]
    fn decays_by_interval() {
        let mut state = SpeedState::default();
        assert_abs_diff_eq!(Speed::decay_base(&state), 1.0);

        let value = Speed::strain_value_of(&mut state, &tap(200.0), &History::default());

        assert_abs_diff_eq!(value, 0.375);
        assert_abs_diff_eq!(Speed::decay_base(&state), 0.512_908_935_546_875, epsilon = 1e-12);
    }

    #[test]
    fn intervals_are_floored() {
        let mut state = SpeedState::default();
        let history = History::default();

        let fast = Speed::strain_value_of(&mut state, &tap(37.5), &history);
        let faster = Speed::strain_value_of(&mut state, &tap(10.0), &history);

        assert_abs_diff_eq!(fast, faster);
        assert_abs_diff_eq!(fast, 2.0_f64.powf(1.75), epsilon = 1e-12);
    }
}
