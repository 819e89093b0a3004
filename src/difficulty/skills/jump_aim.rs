use std::f64::consts::{FRAC_PI_3, PI};

use crate::difficulty::object::MotionSample;

use super::{
    slider_adjusted_decay,
    strain::{History, StrainEvaluator},
    SkillKind,
};

/// Large jumps between placements, their angles, and slider travel.
#[derive(Copy, Clone, Debug, Default)]
pub struct JumpAim;

#[derive(Clone, Debug)]
pub struct JumpAimState {
    strain_decay: f64,
}

impl Default for JumpAimState {
    fn default() -> Self {
        Self {
            strain_decay: JumpAim::STRAIN_DECAY_BASE,
        }
    }
}

impl JumpAim {
    const DISTANCE_THRESHOLD: f64 = 45.0;

    fn diminish(dist: f64) -> f64 {
        (dist - Self::DISTANCE_THRESHOLD).max(0.0)
    }

    fn jump_normalization(min_dist: f64) -> f64 {
        if min_dist > 175.0 {
            1.0
        } else if min_dist > 125.0 {
            (PI * min_dist / 100.0 - 9.0 * PI / 4.0).sin().powi(2)
        } else {
            0.0
        }
    }
}

impl StrainEvaluator for JumpAim {
    type State = JumpAimState;

    const KIND: SkillKind = SkillKind::JumpAim;
    const SKILL_MULTIPLIER: f64 = 25.0;
    const STRAIN_DECAY_BASE: f64 = 0.15;

    fn decay_base(state: &Self::State) -> f64 {
        state.strain_decay
    }

    fn strain_value_of(state: &mut Self::State, curr: &MotionSample, history: &History) -> f64 {
        state.strain_decay = Self::STRAIN_DECAY_BASE;

        if curr.is_spinner() {
            return 0.0;
        }

        let curr_dist = Self::diminish(curr.jump_dist);
        let curr_dist_strain = curr_dist / curr.strain_time;
        let curr_travel_strain = curr.travel_dist / curr.travel_time;

        let mut angle_bonus = 0.0;

        if let Some(prev) = history.get(0) {
            let prev_dist = Self::diminish(prev.jump_dist);
            let prev_dist_strain = prev_dist / prev.strain_time;

            let geometric_mean = (prev_dist_strain * curr_dist_strain).sqrt();
            let jump_norm = Self::jump_normalization(curr_dist.min(prev_dist));

            angle_bonus = match curr.angle {
                Some(angle) if angle > 5.0 * PI / 6.0 => geometric_mean,
                Some(angle) if angle > FRAC_PI_3 => {
                    geometric_mean * (angle - FRAC_PI_3).sin().powi(2)
                }
                _ => 0.0,
            };

            angle_bonus *= jump_norm;
        }

        if curr.is_slider() {
            state.strain_decay = slider_adjusted_decay(curr, Self::STRAIN_DECAY_BASE);
        }

        curr_dist_strain
            + curr_travel_strain
            + (curr_travel_strain * curr_dist_strain).sqrt()
            + angle_bonus
    }
}
