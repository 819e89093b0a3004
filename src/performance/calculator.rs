use indexmap::IndexMap;

use crate::{
    attributes::{DifficultyAttributes, PerformanceAttributes, SkillValues},
    difficulty::skills::{SkillGroup, SkillKind},
    rating::{self, GROUP_EXPONENT, TOTAL_EXPONENT},
    score_state::ScoreState,
    util::mods::Mods,
};

use super::{accuracy_model, interpolation};

pub const PERFORMANCE_BASE_MULTIPLIER: f64 = 1.12;

/// Weight of the combo curve against the miss curve.
const COMBO_WEIGHT: f64 = 0.5;

pub(super) struct PerformanceInner {
    pub attrs: DifficultyAttributes,
    pub mods: u32,
    pub state: ScoreState,
    pub breakdown: bool,
}

impl PerformanceInner {
    pub fn calculate(self) -> PerformanceAttributes {
        if !self.mods.ranked() {
            tracing::debug!(mods = self.mods, "unranked mods, skipping calculation");

            return PerformanceAttributes {
                difficulty: self.attrs,
                ..Default::default()
            };
        }

        if self.state.total_hits() == 0 {
            return PerformanceAttributes {
                difficulty: self.attrs,
                ..Default::default()
            };
        }

        let acc = self.state.accuracy();

        let mut effective_ratings = SkillValues::default();
        let mut skill_pp = SkillValues::default();

        for kind in SkillKind::ALL {
            let rating = self.effective_rating(kind);
            effective_ratings.set(kind, rating);

            if kind != SkillKind::Accuracy {
                skill_pp.set(kind, self.skill_value(kind, rating, acc));
            }
        }

        let deviation = accuracy_model::deviation(
            self.attrs.od,
            &self.state,
            self.attrs.n_circles,
            self.attrs.n_sliders,
        );

        let pp_acc = deviation.map_or(0.0, |deviation| {
            accuracy_model::accuracy_value(
                deviation,
                self.attrs.n_circles,
                self.mods,
                self.attrs.accuracy,
            )
        });

        skill_pp.accuracy = pp_acc;

        let group_pp = |group: SkillGroup| {
            let values = skill_pp
                .iter()
                .filter(|(kind, _)| kind.group() == group)
                .map(|(_, pp)| pp);

            rating::power_sum(values, GROUP_EXPONENT)
        };

        let pp_aim = group_pp(SkillGroup::Aim);
        let pp_tap = group_pp(SkillGroup::Tap);

        let mut multiplier = PERFORMANCE_BASE_MULTIPLIER;

        if self.mods.nf() {
            multiplier *= 0.9;
        }

        if self.mods.so() {
            multiplier *= 0.95;
        }

        let pp = rating::power_sum([pp_aim, pp_tap, pp_acc], TOTAL_EXPONENT) * multiplier;

        tracing::debug!(pp, pp_aim, pp_tap, pp_acc, "calculated performance");

        let breakdown = self.breakdown.then(|| {
            self.breakdown_map(&skill_pp, &effective_ratings, deviation, [pp_aim, pp_tap])
        });

        PerformanceAttributes {
            difficulty: self.attrs,
            pp,
            pp_aim,
            pp_tap,
            pp_acc,
            skill_pp,
            effective_ratings,
            deviation,
            breakdown,
        }
    }

    /// The skill's rating with respect to combo and misses.
    fn effective_rating(&self, kind: SkillKind) -> f64 {
        let rating = self.attrs.rating(kind);

        let Some(curves) = self
            .attrs
            .curves(kind)
            .filter(|curves| !curves.combo_ratings.is_empty())
        else {
            return rating;
        };

        let combo_fraction = match self.attrs.max_combo {
            0 => 1.0,
            max_combo => f64::from(self.state.max_combo) / f64::from(max_combo),
        };

        let combo_rating = interpolation::combo_rating(&curves.combo_ratings, combo_fraction);

        let miss_rating = interpolation::miss_rating(
            rating,
            &curves.miss_counts,
            f64::from(self.state.n_misses),
            self.attrs.miss_star_rating_increment,
            f64::from(self.attrs.max_combo),
        );

        combo_rating.powf(COMBO_WEIGHT) * miss_rating.powf(1.0 - COMBO_WEIGHT)
    }

    fn skill_value(&self, kind: SkillKind, rating: f64, acc: f64) -> f64 {
        let total_hits = f64::from(self.state.total_hits());
        let n_misses = f64::from(self.state.n_misses);
        let ar = self.attrs.ar;
        let od = self.attrs.od;

        let rating = if self.mods.td() {
            rating.powf(td_exponent(kind))
        } else {
            rating
        };

        let mut value = rating::points(rating);

        if kind.group() == SkillGroup::Aim {
            // Longer maps are worth more
            let length_bonus = 0.95
                + 0.4 * (total_hits / 2000.0).min(1.0)
                + if total_hits > 2000.0 {
                    (total_hits / 2000.0).log10() * 0.5
                } else {
                    0.0
                };

            value *= length_bonus;
            value *= 0.95_f64.powf(n_misses);
        } else {
            value *= 0.99_f64.powf(n_misses);
        }

        if self.attrs.max_combo > 0 {
            let combo_ratio =
                f64::from(self.state.max_combo) / f64::from(self.attrs.max_combo);

            value *= combo_ratio.powf(combo_exponent(kind)).min(1.0);
        }

        value *= ar_factor(kind, ar);

        if self.mods.hd() {
            value *= hidden_bonus(kind, ar);
        }

        if self.mods.fl() {
            value *= flashlight_bonus(kind, total_hits);
        }

        if kind.group() == SkillGroup::Aim {
            value *= 0.75 + acc / 4.0;
            value *= 0.98 + od * od / 2500.0;
        } else {
            value *= acc + 0.02 / 0.98;
            value *= 1.0 + od * od / 2500.0;
        }

        value
    }

    fn breakdown_map(
        &self,
        skill_pp: &SkillValues,
        effective_ratings: &SkillValues,
        deviation: Option<f64>,
        [pp_aim, pp_tap]: [f64; 2],
    ) -> IndexMap<&'static str, f64> {
        let mut map = IndexMap::with_capacity(2 * SkillKind::ALL.len() + 8);

        for (kind, pp) in skill_pp.iter() {
            map.insert(kind.name(), pp);
        }

        for (kind, rating) in effective_ratings.iter() {
            map.insert(effective_key(kind), rating);
        }

        map.insert("aim", pp_aim);
        map.insert("tap", pp_tap);
        map.insert("ar", self.attrs.ar);
        map.insert("od", self.attrs.od);
        map.insert("deviation", deviation.unwrap_or(f64::NAN));
        map.insert("combo", f64::from(self.state.max_combo));
        map.insert("max_combo", f64::from(self.attrs.max_combo));
        map.insert("misses", f64::from(self.state.n_misses));

        map
    }
}

/// Exponent applied to ratings on touch devices.
const fn td_exponent(kind: SkillKind) -> f64 {
    match kind {
        SkillKind::JumpAim | SkillKind::AimControl | SkillKind::Control => 0.75,
        SkillKind::StreamAim | SkillKind::Speed | SkillKind::FingerControl => 1.25,
        SkillKind::Stamina | SkillKind::Rhythm | SkillKind::Accuracy => 1.0,
    }
}

/// Breaking combo hurts precise aim the most.
const fn combo_exponent(kind: SkillKind) -> f64 {
    match kind {
        SkillKind::JumpAim | SkillKind::AimControl | SkillKind::Control => 1.1,
        SkillKind::StreamAim => 0.8,
        SkillKind::Stamina
        | SkillKind::Speed
        | SkillKind::FingerControl
        | SkillKind::Rhythm
        | SkillKind::Accuracy => 0.6,
    }
}

fn ar_factor(kind: SkillKind, ar: f64) -> f64 {
    let high_ar = |ar: f64| {
        if ar > 10.33 {
            1.0 + 0.3 * (ar - 10.33)
        } else {
            1.0
        }
    };

    match kind {
        SkillKind::JumpAim if ar < 8.0 => 1.0 + 0.01 * (8.0 - ar),
        SkillKind::JumpAim
        | SkillKind::StreamAim
        | SkillKind::AimControl
        | SkillKind::Control
        | SkillKind::Rhythm => high_ar(ar),
        SkillKind::Stamina | SkillKind::Speed | SkillKind::FingerControl | SkillKind::Accuracy => {
            1.0
        }
    }
}

/// Lower approach rates are harder to read with hidden.
fn hidden_bonus(kind: SkillKind, ar: f64) -> f64 {
    match kind {
        SkillKind::JumpAim | SkillKind::AimControl => (1.0 + 0.04 * (9.0 - ar)).max(1.0),
        SkillKind::StreamAim | SkillKind::Control => (1.0 + 0.08 * (12.0 - ar)).max(1.0),
        _ => 1.0,
    }
}

/// Object-based bonus for flashlight.
fn flashlight_bonus(kind: SkillKind, total_hits: f64) -> f64 {
    let bonus = 0.35 * (total_hits / 200.0).min(1.0)
        + if total_hits > 200.0 {
            0.3 * ((total_hits - 200.0) / 300.0).min(1.0)
                + if total_hits > 500.0 {
                    (total_hits - 500.0) / 1200.0
                } else {
                    0.0
                }
        } else {
            0.0
        };

    match kind {
        SkillKind::JumpAim | SkillKind::AimControl | SkillKind::Control => 1.0 + bonus,
        SkillKind::StreamAim => 1.0 + bonus / 2.0,
        _ => 1.0,
    }
}

const fn effective_key(kind: SkillKind) -> &'static str {
    match kind {
        SkillKind::JumpAim => "jump_aim_rating",
        SkillKind::StreamAim => "stream_aim_rating",
        SkillKind::AimControl => "aim_control_rating",
        SkillKind::Control => "control_rating",
        SkillKind::Stamina => "stamina_rating",
        SkillKind::Speed => "speed_rating",
        SkillKind::FingerControl => "finger_control_rating",
        SkillKind::Rhythm => "rhythm_rating",
        SkillKind::Accuracy => "accuracy_rating",
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::difficulty::skills::curves::SkillCurves;

    use super::*;

    fn attrs() -> DifficultyAttributes {
        DifficultyAttributes {
            jump_aim: 2.0,
            stream_aim: 1.0,
            aim_control: 1.5,
            control: 0.8,
            stamina: 1.8,
            speed: 2.2,
            finger_control: 1.2,
            rhythm: 0.9,
            accuracy: 0.6,
            jump_aim_curves: SkillCurves {
                combo_ratings: vec![0.5, 1.0, 1.5, 2.0],
                miss_counts: vec![1.0, 3.0, 6.0],
            },
            miss_star_rating_increment: 0.1,
            ar: 9.0,
            od: 8.0,
            n_circles: 400,
            n_sliders: 100,
            max_combo: 700,
            ..Default::default()
        }
    }

    fn inner(mods: u32, state: ScoreState) -> PerformanceInner {
        PerformanceInner {
            attrs: attrs(),
            mods,
            state,
            breakdown: true,
        }
    }

    fn fc() -> ScoreState {
        ScoreState {
            max_combo: 700,
            n300: 480,
            n100: 20,
            n50: 0,
            n_misses: 0,
        }
    }

    #[test]
    fn unranked_is_worthless() {
        let attrs = inner(1 << 7, fc()).calculate();

        assert_abs_diff_eq!(attrs.pp, 0.0);
        assert!(attrs.breakdown.is_none());
    }

    #[test]
    fn full_combo_keeps_flat_ratings() {
        let attrs = inner(0, fc()).calculate();

        assert_abs_diff_eq!(attrs.effective_ratings.jump_aim, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(attrs.effective_ratings.speed, 2.2);
        assert!(attrs.pp > 0.0);
        assert!(attrs.pp_aim > 0.0 && attrs.pp_tap > 0.0 && attrs.pp_acc > 0.0);
    }

    #[test]
    fn misses_lower_curved_ratings() {
        let state = ScoreState {
            n300: 477,
            n_misses: 3,
            max_combo: 300,
            ..fc()
        };

        let attrs = inner(0, state).calculate();

        assert!(attrs.effective_ratings.jump_aim < 2.0);
        assert_abs_diff_eq!(attrs.effective_ratings.stream_aim, 1.0);
    }

    #[test]
    fn no_fail_discounts() {
        let nomod = inner(0, fc()).calculate();
        let nf = inner(1, fc()).calculate();

        assert_abs_diff_eq!(nf.pp, nomod.pp * 0.9, epsilon = 1e-9);
    }

    #[test]
    fn breakdown_is_ordered() {
        let attrs = inner(0, fc()).calculate();
        let breakdown = attrs.breakdown.unwrap();

        let keys: Vec<_> = breakdown.keys().take(2).copied().collect();
        assert_eq!(keys, ["jump_aim", "stream_aim"]);
        assert_abs_diff_eq!(breakdown["aim"], attrs.pp_aim);
        assert_abs_diff_eq!(breakdown["accuracy"], attrs.pp_acc);
    }

    #[test]
    fn low_ar_jumps_get_a_bonus() {
        assert!(ar_factor(SkillKind::JumpAim, 5.0) > 1.0);
        assert_abs_diff_eq!(ar_factor(SkillKind::StreamAim, 5.0), 1.0);
        assert_abs_diff_eq!(ar_factor(SkillKind::Speed, 11.0), 1.0);
        assert_abs_diff_eq!(ar_factor(SkillKind::Control, 11.0), 1.0 + 0.3 * 0.67, epsilon = 1e-12);
    }
}
