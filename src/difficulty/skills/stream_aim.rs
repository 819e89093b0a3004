use std::f64::consts::{FRAC_PI_3, PI};

use crate::{difficulty::object::MotionSample, util::difficulty::sin_sq_ramp};

use super::{
    strain::{History, StrainEvaluator},
    SkillKind,
};

/// Spacing of tightly packed streams.
#[derive(Copy, Clone, Debug, Default)]
pub struct StreamAim;

impl StreamAim {
    const DISTANCE_SATURATION: f64 = 150.0;
}

impl StrainEvaluator for StreamAim {
    type State = ();

    const KIND: SkillKind = SkillKind::StreamAim;
    const SKILL_MULTIPLIER: f64 = 3000.0;
    const STRAIN_DECAY_BASE: f64 = 0.3;

    fn strain_value_of(_: &mut Self::State, curr: &MotionSample, _: &History) -> f64 {
        if curr.is_spinner() {
            return 0.0;
        }

        let distance =
            curr.travel_dist + curr.jump_dist + (curr.travel_dist * curr.jump_dist).sqrt();
        let strain = sin_sq_ramp(distance, Self::DISTANCE_SATURATION);

        let angle_bonus = match curr.angle {
            Some(angle) if angle < FRAC_PI_3 => 1.25,
            Some(angle) if angle < 5.0 * PI / 6.0 => {
                1.0 + (5.0 * PI / 6.0 - angle).sin().powi(2) / 4.0
            }
            _ => 1.0,
        };

        strain * angle_bonus / curr.strain_time
    }
}
