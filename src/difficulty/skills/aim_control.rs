use std::f64::consts::FRAC_PI_4;

use crate::{difficulty::object::MotionSample, util::difficulty::sin_sq_ramp};

use super::{
    slider_adjusted_decay,
    strain::{History, StrainEvaluator},
    SkillKind,
};

/// Awkward changes in velocity and direction, and flow breaks.
#[derive(Copy, Clone, Debug, Default)]
pub struct AimControl;

#[derive(Clone, Debug)]
pub struct AimControlState {
    strain_decay: f64,
}

impl Default for AimControlState {
    fn default() -> Self {
        Self {
            strain_decay: AimControl::STRAIN_DECAY_BASE,
        }
    }
}

impl AimControl {
    /// Minimum jump distance before the velocity counts fully.
    const JUMP_NORM_DISTANCE: f64 = 125.0;

    /// How awkward a velocity change is in relation to the velocities.
    fn awkwardness(velocity_change: f64, geometric_mean: f64) -> f64 {
        sin_sq_ramp(velocity_change.powi(2), geometric_mean.max(0.75))
    }
}

impl StrainEvaluator for AimControl {
    type State = AimControlState;

    const KIND: SkillKind = SkillKind::AimControl;
    const SKILL_MULTIPLIER: f64 = 11.0;
    const STRAIN_DECAY_BASE: f64 = 0.5;

    fn decay_base(state: &Self::State) -> f64 {
        state.strain_decay
    }

    fn strain_value_of(state: &mut Self::State, curr: &MotionSample, history: &History) -> f64 {
        state.strain_decay = Self::STRAIN_DECAY_BASE;

        if curr.is_spinner() {
            return 0.0;
        }

        let curr_vel = curr.jump_dist / curr.strain_time;
        let curr_end_vel = curr.end_jump_dist / (curr.strain_time - curr.travel_duration).max(50.0);
        let slider_vel = (curr.travel_dist / curr.travel_time).min(1.0);

        let normed_vel = if curr_vel > 1.0 {
            curr_vel.sqrt()
        } else {
            curr_vel
        };

        let mut jump_norm = 0.0;
        let mut jump_awk = 0.0;
        let mut angle_awk = 0.0;
        let mut angle_bonus = 0.0;
        let mut flow_bonus = 0.0;

        if let Some(prev) = history.get(0) {
            let prev_vel = prev.jump_dist / prev.strain_time;
            let prev_end_vel =
                prev.end_jump_dist / (prev.strain_time - prev.travel_duration).max(50.0);

            jump_norm = sin_sq_ramp(
                curr.jump_dist.min(prev.jump_dist),
                Self::JUMP_NORM_DISTANCE,
            );

            let geometric_mean = (prev_vel * curr_vel).sqrt();
            let geometric_end_mean = (prev_end_vel * curr_end_vel).sqrt();

            jump_awk = Self::awkwardness(curr_vel - prev_vel, geometric_mean).min(
                Self::awkwardness(curr_end_vel - prev_end_vel, geometric_end_mean),
            );

            if let (Some(angle), Some(prev_angle)) = (curr.angle, prev.angle) {
                angle_awk = ((angle - prev_angle) / 1.5).sin().powi(2);

                let avg_angle = (angle + prev_angle) / 2.0;

                if avg_angle >= 3.0 * FRAC_PI_4 {
                    angle_bonus = 1.0;
                } else if avg_angle > FRAC_PI_4 {
                    angle_bonus = (avg_angle - FRAC_PI_4).sin().powi(2);
                }
            }

            let max_dist = curr.jump_dist.max(prev.jump_dist);

            if prev.normed_det * curr.normed_det < 0.0 && max_dist > 0.0 {
                flow_bonus = f64::from((curr.dist_vec + prev.dist_vec).length()) / max_dist / 2.0;
            }
        }

        if curr.is_slider() {
            state.strain_decay = slider_adjusted_decay(curr, Self::STRAIN_DECAY_BASE);
        }

        normed_vel
            * jump_norm
            * (jump_awk
                + angle_awk
                + flow_bonus
                + angle_bonus
                + slider_vel
                + jump_awk * (angle_awk + flow_bonus + angle_bonus))
    }
}
