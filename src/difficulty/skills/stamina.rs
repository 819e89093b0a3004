use crate::difficulty::object::MotionSample;

use super::{
    strain::{History, StrainEvaluator},
    SkillKind,
};

/// Sustaining tapping density over long stretches.
#[derive(Copy, Clone, Debug, Default)]
pub struct Stamina;

impl StrainEvaluator for Stamina {
    type State = ();

    const KIND: SkillKind = SkillKind::Stamina;
    const SKILL_MULTIPLIER: f64 = 5.0;
    // 0.99^20
    const STRAIN_DECAY_BASE: f64 = 0.817_906_937_597_230_8;

    fn strain_value_of(_: &mut Self::State, curr: &MotionSample, history: &History) -> f64 {
        if curr.is_spinner() {
            return 0.0;
        }

        let change_bonus = history.get(0).map_or(1.0, |prev| {
            let ratio = prev.strain_time / curr.strain_time;

            ratio.min(ratio.recip()).min(2.0)
        });

        change_bonus * (75.0 / curr.strain_time).powf(1.75)
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
    fn changing_intervals_weaken_the_strain() {
        let mut history = History::default();

        let first = Stamina::strain_value_of(&mut (), &tap(75.0), &history);
        assert_abs_diff_eq!(first, 1.0);

        history.push(tap(75.0));
        let steady = Stamina::strain_value_of(&mut (), &tap(75.0), &history);
        let halved = Stamina::strain_value_of(&mut (), &tap(150.0), &history);

        assert_abs_diff_eq!(steady, 1.0);
        assert_abs_diff_eq!(halved, 0.5 * 0.5_f64.powf(1.75), epsilon = 1e-12);
    }
}
