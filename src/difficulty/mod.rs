use crate::{
    attributes::DifficultyAttributes,
    error::{check_clock_rate, CalculateError},
    model::beatmap::{Beatmap, BeatmapAttributes},
    rating::{self, GroupPoints},
    util::mods::Mods,
};

use self::{
    object::create_motion_samples, scaling_factor::ScalingFactor,
    skills::curves::MISS_STAR_RATING_INCREMENT, skills::Skills, strains::Strains,
};

mod lazy_cursor;
pub mod object;
pub mod scaling_factor;
pub mod skills;
pub mod strains;

/// Difficulty calculator on a [`Beatmap`].
///
/// # Example
///
/// ```
/// use skillset_pp::{model::placement::Placement, model::pos::Pos2, Beatmap, Difficulty};
///
/// let placements = (0..64)
///     .map(|i| {
///         let x = if i % 2 == 0 { 128.0 } else { 384.0 };
///
///         Placement::circle(f64::from(i) * 150.0, Pos2::new(x, 192.0))
///     })
///     .collect();
///
/// let map = Beatmap::new(placements).od(8.0).ar(9.0);
///
/// let attrs = Difficulty::new(&map)
///     .mods(8 + 64) // HDDT
///     .calculate();
///
/// assert!(attrs.stars > 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Difficulty<'map> {
    map: &'map Beatmap,
    mods: u32,
    passed_objects: Option<u32>,
    clock_rate: Option<f64>,
}

impl<'map> Difficulty<'map> {
    /// Create a new difficulty calculator for the given beatmap.
    pub const fn new(map: &'map Beatmap) -> Self {
        Self {
            map,
            mods: 0,
            passed_objects: None,
            clock_rate: None,
        }
    }

    /// Specify mods through their bit values.
    ///
    /// See [https://github.com/ppy/osu-api/wiki#mods](https://github.com/ppy/osu-api/wiki#mods)
    pub const fn mods(mut self, mods: u32) -> Self {
        self.mods = mods;

        self
    }

    /// Amount of passed objects for partial plays, e.g. a fail.
    pub const fn passed_objects(mut self, passed_objects: u32) -> Self {
        self.passed_objects = Some(passed_objects);

        self
    }

    /// Adjust the clock rate used in the calculation.
    ///
    /// If none is specified, it will take the clock rate based on the mods
    /// i.e. 1.5 for DT, 0.75 for HT and 1.0 otherwise.
    pub const fn clock_rate(mut self, clock_rate: f64) -> Self {
        self.clock_rate = Some(clock_rate);

        self
    }

    /// Perform the difficulty calculation.
    pub fn calculate(&self) -> DifficultyAttributes {
        let DifficultyValues { skills, mut attrs } = DifficultyValues::calculate(self, true);
        DifficultyValues::eval(&mut attrs, skills);

        tracing::debug!(
            stars = attrs.stars,
            aim = attrs.aim_stars,
            tap = attrs.tap_stars,
            accuracy = attrs.accuracy,
            "calculated difficulty"
        );

        attrs
    }

    /// Same as [`Difficulty::calculate`] but first checks whether the map
    /// is [`TooSuspicious`] and whether the clock rate is usable.
    ///
    /// [`TooSuspicious`]: crate::model::beatmap::TooSuspicious
    pub fn checked_calculate(&self) -> Result<DifficultyAttributes, CalculateError> {
        check_clock_rate(self.get_clock_rate())?;
        self.map.check_suspicion()?;

        Ok(self.calculate())
    }

    /// Perform the difficulty calculation but instead of evaluating the skill
    /// strains, return them as is.
    ///
    /// Suitable to plot the difficulty of a map over time.
    pub fn strains(&self) -> Strains {
        let DifficultyValues { skills, .. } = DifficultyValues::calculate(self, false);

        Strains::from(&skills)
    }

    pub(crate) const fn get_mods(&self) -> u32 {
        self.mods
    }

    pub(crate) fn get_clock_rate(&self) -> f64 {
        self.clock_rate.unwrap_or_else(|| self.mods.clock_rate())
    }

    pub(crate) fn get_passed_objects(&self) -> usize {
        self.passed_objects.map_or(usize::MAX, |n| n as usize)
    }
}

struct DifficultyValues {
    skills: Skills,
    attrs: DifficultyAttributes,
}

impl DifficultyValues {
    fn calculate(difficulty: &Difficulty<'_>, with_curves: bool) -> Self {
        let map = difficulty.map;
        let clock_rate = difficulty.get_clock_rate();

        let BeatmapAttributes {
            ar,
            od,
            cs,
            hp,
            clock_rate,
            hit_windows,
        } = map
            .attributes()
            .mods(difficulty.get_mods())
            .clock_rate(clock_rate)
            .build();

        let take = difficulty.get_passed_objects().min(map.placements.len());
        let placements = &map.placements[..take];

        let mut attrs = DifficultyAttributes {
            ar,
            od,
            cs,
            hp,
            clock_rate,
            preempt: hit_windows.ar,
            great_hit_window: hit_windows.od,
            miss_star_rating_increment: MISS_STAR_RATING_INCREMENT,
            max_combo: placements.iter().map(|h| h.max_combo()).sum(),
            ..Default::default()
        };

        for h in placements {
            if h.is_circle() {
                attrs.n_circles += 1;
            } else if h.is_slider() {
                attrs.n_sliders += 1;
            } else {
                attrs.n_spinners += 1;
            }
        }

        let scaling_factor = ScalingFactor::new(cs);
        let samples = create_motion_samples(placements, clock_rate, &scaling_factor);

        let running_combo: Vec<u32> = placements
            .iter()
            .scan(0, |combo, h| {
                *combo += h.max_combo();

                Some(*combo)
            })
            .skip(1)
            .collect();

        let skills = Skills::process(&samples, with_curves.then_some(running_combo.as_slice()));

        Self { skills, attrs }
    }

    /// Process the skills into the final ratings.
    fn eval(attrs: &mut DifficultyAttributes, skills: Skills) {
        let Skills {
            jump_aim,
            stream_aim,
            aim_control,
            control,
            stamina,
            speed,
            finger_control,
            rhythm,
            accuracy,
        } = skills;

        attrs.jump_aim = jump_aim.rating();
        attrs.stream_aim = stream_aim.rating();
        attrs.aim_control = aim_control.rating();
        attrs.control = control.rating();
        attrs.stamina = stamina.rating();
        attrs.speed = speed.rating();
        attrs.finger_control = finger_control.rating();
        attrs.rhythm = rhythm.rating();
        attrs.accuracy = accuracy.rating();

        attrs.jump_aim_curves = jump_aim.curves;
        attrs.aim_control_curves = aim_control.curves;
        attrs.stamina_curves = stamina.curves;
        attrs.speed_curves = speed.curves;
        attrs.finger_control_curves = finger_control.curves;

        tracing::trace!(
            jump_aim = attrs.jump_aim,
            stream_aim = attrs.stream_aim,
            aim_control = attrs.aim_control,
            control = attrs.control,
            stamina = attrs.stamina,
            speed = attrs.speed,
            finger_control = attrs.finger_control,
            rhythm = attrs.rhythm,
            accuracy = attrs.accuracy,
            "skill ratings"
        );

        // Less than two objects means there is nothing to rate
        if attrs.n_objects() < 2 {
            return;
        }

        let groups = GroupPoints::new(
            [attrs.jump_aim, attrs.stream_aim, attrs.aim_control, attrs.control],
            [attrs.stamina, attrs.speed, attrs.finger_control, attrs.rhythm],
            attrs.accuracy,
        );

        attrs.aim_stars = rating::stars(groups.aim);
        attrs.tap_stars = rating::stars(groups.tap);
        attrs.stars = groups.star_rating();
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use crate::model::{placement::Placement, pos::Pos2};

    use super::*;

    fn jumps(n: u32) -> Beatmap {
        let placements = (0..n)
            .map(|i| {
                let x = if i % 2 == 0 { 64.0 } else { 448.0 };

                Placement::circle(f64::from(i) * 180.0, Pos2::new(x, 192.0))
            })
            .collect();

        Beatmap::new(placements).ar(9.0).od(8.0).cs(4.0)
    }

    #[test]
    fn single_object_is_unrated() {
        let map = jumps(1);
        let attrs = Difficulty::new(&map).calculate();

        assert_abs_diff_eq!(attrs.stars, 0.0);
        assert_abs_diff_eq!(attrs.aim_stars, 0.0);
        assert_abs_diff_eq!(attrs.jump_aim, 0.0);
        assert_eq!(attrs.max_combo, 1);
    }

    #[test]
    fn jumps_are_aim_heavy() {
        let map = jumps(200);
        let attrs = Difficulty::new(&map).calculate();

        assert!(attrs.stars > 0.0);
        assert!(attrs.jump_aim > 0.0);
        assert!(attrs.aim_stars > 0.0);
        assert_eq!(attrs.n_circles, 200);
        assert_eq!(attrs.jump_aim_curves.combo_ratings.len(), 20);
        assert!(attrs.stream_aim.is_finite());
    }

    #[test]
    fn passed_objects_cuts_the_map() {
        let map = jumps(200);
        let full = Difficulty::new(&map).calculate();
        let partial = Difficulty::new(&map).passed_objects(50).calculate();

        assert_eq!(partial.n_circles, 50);
        assert_eq!(partial.max_combo, 50);
        assert!(partial.jump_aim <= full.jump_aim);
    }

    #[test]
    fn double_time_is_harder() {
        let map = jumps(200);
        let nomod = Difficulty::new(&map).calculate();
        let dt = Difficulty::new(&map).mods(64).calculate();

        assert_abs_diff_eq!(dt.clock_rate, 1.5);
        assert!(dt.stars > nomod.stars);
        assert!(dt.ar > nomod.ar);
    }

    #[test]
    fn strains_have_one_entry_per_sample() {
        let map = jumps(30);
        let strains = Difficulty::new(&map).strains();

        assert_eq!(strains.speed.object_strains.len(), 29);
        assert_eq!(strains.get(crate::SkillKind::Speed), &strains.speed);
        assert!(!strains.jump_aim.section_peaks.is_empty());
    }

    #[test]
    fn checked_rejects_dense_maps() {
        let placements = (0..200)
            .map(|i| Placement::circle(f64::from(i), Pos2::zero()))
            .collect();

        let map = Beatmap::new(placements);

        assert!(Difficulty::new(&map).checked_calculate().is_err());
    }
}
