use crate::util::{difficulty::difficulty_range, mods::Mods};

use super::Beatmap;

/// Summary struct for a [`Beatmap`]'s attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct BeatmapAttributes {
    /// The approach rate, adjusted to the clock rate.
    pub ar: f64,
    /// The overall difficulty, adjusted to the clock rate.
    pub od: f64,
    /// The circle size.
    pub cs: f64,
    /// The health drain rate
    pub hp: f64,
    /// The clock rate with respect to mods.
    pub clock_rate: f64,
    /// The hit windows for approach rate and overall difficulty.
    pub hit_windows: HitWindows,
}

/// AR and OD hit windows
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitWindows {
    /// Hit window for approach rate i.e. `TimePreempt` in milliseconds.
    pub ar: f64,
    /// Hit window for overall difficulty i.e. time to hit a 300 ("Great") in milliseconds.
    pub od: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct ModsDependent {
    value: f32,
    with_mods: bool,
}

impl ModsDependent {
    const fn new(value: f32) -> Self {
        Self {
            value,
            with_mods: false,
        }
    }
}

/// A builder for [`BeatmapAttributes`] and [`HitWindows`].
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct BeatmapAttributesBuilder {
    ar: ModsDependent,
    od: ModsDependent,
    cs: ModsDependent,
    hp: ModsDependent,
    mods: u32,
    clock_rate: Option<f64>,
}

impl BeatmapAttributesBuilder {
    const PREEMPT_MIN: f64 = 1800.0;
    const PREEMPT_MID: f64 = 1200.0;
    const PREEMPT_MAX: f64 = 450.0;

    const GREAT_MIN: f64 = 80.0;
    const GREAT_MID: f64 = 50.0;
    const GREAT_MAX: f64 = 20.0;

    /// Create a new [`BeatmapAttributesBuilder`].
    ///
    /// Attributes are set to `5.0`.
    pub const fn new() -> Self {
        Self {
            ar: ModsDependent::new(5.0),
            od: ModsDependent::new(5.0),
            cs: ModsDependent::new(5.0),
            hp: ModsDependent::new(5.0),
            mods: 0,
            clock_rate: None,
        }
    }

    /// Use the given [`Beatmap`]'s attributes.
    pub const fn map(self, map: &Beatmap) -> Self {
        Self {
            ar: ModsDependent::new(map.ar),
            od: ModsDependent::new(map.od),
            cs: ModsDependent::new(map.cs),
            hp: ModsDependent::new(map.hp),
            mods: 0,
            clock_rate: None,
        }
    }

    /// Specify the approach rate.
    ///
    /// `with_mods` determines if the given value should be used before
    /// or after accounting for mods, e.g. on `true` the value will be
    /// used as is and on `false` it will be modified based on the mods.
    pub const fn ar(mut self, ar: f32, with_mods: bool) -> Self {
        self.ar = ModsDependent {
            value: ar,
            with_mods,
        };

        self
    }

    /// Specify the overall difficulty.
    ///
    /// See [`BeatmapAttributesBuilder::ar`] for `with_mods`.
    pub const fn od(mut self, od: f32, with_mods: bool) -> Self {
        self.od = ModsDependent {
            value: od,
            with_mods,
        };

        self
    }

    /// Specify the circle size.
    ///
    /// See [`BeatmapAttributesBuilder::ar`] for `with_mods`.
    pub const fn cs(mut self, cs: f32, with_mods: bool) -> Self {
        self.cs = ModsDependent {
            value: cs,
            with_mods,
        };

        self
    }

    /// Specify the drain rate.
    ///
    /// See [`BeatmapAttributesBuilder::ar`] for `with_mods`.
    pub const fn hp(mut self, hp: f32, with_mods: bool) -> Self {
        self.hp = ModsDependent {
            value: hp,
            with_mods,
        };

        self
    }

    /// Specify the mods.
    pub const fn mods(mut self, mods: u32) -> Self {
        self.mods = mods;

        self
    }

    /// Specify a custom clock rate.
    pub const fn clock_rate(mut self, clock_rate: f64) -> Self {
        self.clock_rate = Some(clock_rate);

        self
    }

    fn get_clock_rate(&self) -> f64 {
        self.clock_rate.unwrap_or_else(|| self.mods.clock_rate())
    }

    fn rate_for(attr: ModsDependent, clock_rate: f64) -> f64 {
        if attr.with_mods {
            1.0
        } else {
            clock_rate
        }
    }

    fn apply_mods(&self, attr: ModsDependent, multiplier: f64) -> f64 {
        let value = f64::from(attr.value);

        if attr.with_mods {
            value
        } else {
            (value * multiplier).min(10.0)
        }
    }

    /// Calculate the AR and OD hit windows.
    pub fn hit_windows(&self) -> HitWindows {
        let clock_rate = self.get_clock_rate();
        let multiplier = self.mods.od_ar_hp_multiplier();

        let raw_ar = self.apply_mods(self.ar, multiplier);
        let preempt = difficulty_range(
            raw_ar,
            Self::PREEMPT_MIN,
            Self::PREEMPT_MID,
            Self::PREEMPT_MAX,
        ) / Self::rate_for(self.ar, clock_rate);

        let raw_od = self.apply_mods(self.od, multiplier);
        let great = difficulty_range(raw_od, Self::GREAT_MIN, Self::GREAT_MID, Self::GREAT_MAX)
            / Self::rate_for(self.od, clock_rate);

        HitWindows {
            ar: preempt,
            od: great,
        }
    }

    /// Calculate the [`BeatmapAttributes`].
    pub fn build(&self) -> BeatmapAttributes {
        let clock_rate = self.get_clock_rate();
        let hit_windows = self.hit_windows();
        let HitWindows {
            ar: preempt,
            od: great,
        } = hit_windows;

        let ar = if preempt > Self::PREEMPT_MID {
            (Self::PREEMPT_MIN - preempt) / 120.0
        } else {
            (Self::PREEMPT_MID - preempt) / 150.0 + 5.0
        };

        let od = (Self::GREAT_MIN - great) / 6.0;

        BeatmapAttributes {
            ar,
            od,
            cs: self.apply_mods(self.cs, self.mods.cs_multiplier()),
            hp: self.apply_mods(self.hp, self.mods.od_ar_hp_multiplier()),
            clock_rate,
            hit_windows,
        }
    }
}

impl Default for BeatmapAttributesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Beatmap> for BeatmapAttributesBuilder {
    fn from(map: &Beatmap) -> Self {
        Self::new().map(map)
    }
}
