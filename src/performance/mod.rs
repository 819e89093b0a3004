use crate::{
    attributes::{DifficultyAttributes, PerformanceAttributes},
    difficulty::Difficulty,
    error::{check_clock_rate, CalculateError},
    model::beatmap::Beatmap,
    score_state::ScoreState,
    util::{map_or_attrs::MapOrAttrs, mods::Mods},
};

use self::{calculator::PerformanceInner, hitresults::HitResultGenerator};

pub mod accuracy_model;
mod calculator;
mod hitresults;
pub mod interpolation;

pub use self::calculator::PERFORMANCE_BASE_MULTIPLIER;

/// Performance calculator on a [`Beatmap`].
///
/// # Example
///
/// ```
/// use skillset_pp::{model::placement::Placement, model::pos::Pos2, Beatmap, Performance};
///
/// let placements = (0..300)
///     .map(|i| {
///         let x = if i % 2 == 0 { 96.0 } else { 416.0 };
///
///         Placement::circle(f64::from(i) * 200.0, Pos2::new(x, 192.0))
///     })
///     .collect();
///
/// let map = Beatmap::new(placements).od(9.0).ar(9.3);
///
/// let attrs = Performance::new(&map)
///     .mods(8) // HD
///     .accuracy(98.5)
///     .n_misses(1)
///     .combo(250)
///     .calculate();
///
/// assert!(attrs.pp > 0.0);
///
/// // Reuse the difficulty attributes for the next calculation
/// let next = attrs.performance().mods(8).accuracy(99.0).calculate();
///
/// assert!(next.pp > 0.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Performance<'map> {
    map_or_attrs: MapOrAttrs<'map>,
    mods: u32,
    acc: Option<f64>,
    combo: Option<u32>,

    n300: Option<u32>,
    n100: Option<u32>,
    n50: Option<u32>,
    n_misses: Option<u32>,
    passed_objects: Option<u32>,
    clock_rate: Option<f64>,
    hitresult_priority: HitResultPriority,
    breakdown: bool,
}

impl<'map> Performance<'map> {
    /// Create a new performance calculator for the given beatmap.
    pub fn new(map: &'map Beatmap) -> Self {
        map.into()
    }

    /// Provide the result of a previous difficulty or performance calculation.
    /// If you already calculated the attributes for the current map-mod combination,
    /// be sure to put them in here so that they don't have to be recalculated.
    pub fn attributes(mut self, attributes: impl Into<DifficultyAttributes>) -> Self {
        self.map_or_attrs = MapOrAttrs::Attrs(attributes.into());

        self
    }

    /// Specify mods through their bit values.
    ///
    /// See [https://github.com/ppy/osu-api/wiki#mods](https://github.com/ppy/osu-api/wiki#mods)
    pub const fn mods(mut self, mods: u32) -> Self {
        self.mods = mods;

        self
    }

    /// Specify the max combo of the play.
    pub const fn combo(mut self, combo: u32) -> Self {
        self.combo = Some(combo);

        self
    }

    /// Specify how hitresults should be generated.
    ///
    /// Defauls to [`HitResultPriority::BestCase`].
    pub const fn hitresult_priority(mut self, priority: HitResultPriority) -> Self {
        self.hitresult_priority = priority;

        self
    }

    /// Specify the amount of 300s of a play.
    pub const fn n300(mut self, n300: u32) -> Self {
        self.n300 = Some(n300);

        self
    }

    /// Specify the amount of 100s of a play.
    pub const fn n100(mut self, n100: u32) -> Self {
        self.n100 = Some(n100);

        self
    }

    /// Specify the amount of 50s of a play.
    pub const fn n50(mut self, n50: u32) -> Self {
        self.n50 = Some(n50);

        self
    }

    /// Specify the amount of misses of a play.
    pub const fn n_misses(mut self, n_misses: u32) -> Self {
        self.n_misses = Some(n_misses);

        self
    }

    /// Amount of passed objects for partial plays, e.g. a fail.
    pub const fn passed_objects(mut self, passed_objects: u32) -> Self {
        self.passed_objects = Some(passed_objects);

        self
    }

    /// Adjust the clock rate used in the calculation.
    /// If none is specified, it will take the clock rate based on the mods
    /// i.e. 1.5 for DT, 0.75 for HT and 1.0 otherwise.
    ///
    /// Only relevant if the difficulty attributes still need to be
    /// calculated.
    pub const fn clock_rate(mut self, clock_rate: f64) -> Self {
        self.clock_rate = Some(clock_rate);

        self
    }

    /// Whether [`PerformanceAttributes::breakdown`] should be filled with
    /// intermediate values.
    pub const fn breakdown(mut self, breakdown: bool) -> Self {
        self.breakdown = breakdown;

        self
    }

    /// Provide parameters through a [`ScoreState`].
    #[allow(clippy::needless_pass_by_value)]
    pub const fn state(mut self, state: ScoreState) -> Self {
        let ScoreState {
            max_combo,
            n300,
            n100,
            n50,
            n_misses,
        } = state;

        self.combo = Some(max_combo);
        self.n300 = Some(n300);
        self.n100 = Some(n100);
        self.n50 = Some(n50);
        self.n_misses = Some(n_misses);

        self
    }

    /// Specify the accuracy of a play between `0.0` and `100.0`.
    /// This will be used to generate matching hitresults.
    pub fn accuracy(mut self, acc: f64) -> Self {
        self.acc = Some(acc.clamp(0.0, 100.0) / 100.0);

        self
    }

    /// Create the [`ScoreState`] that will be used for performance calculation.
    pub fn generate_state(&mut self) -> ScoreState {
        let attrs = match self.map_or_attrs {
            MapOrAttrs::Map(map) => {
                let attrs = self.generate_attributes(map);

                self.map_or_attrs.insert_attrs(attrs)
            }
            MapOrAttrs::Attrs(ref mut attrs) => attrs,
        };

        let n_objects = self
            .passed_objects
            .map_or(attrs.n_objects(), |n| n.min(attrs.n_objects()));

        let n_misses = self.n_misses.map_or(0, |n| n.min(n_objects));

        let generator = HitResultGenerator {
            n_objects,
            n_misses,
            given: [self.n300, self.n100, self.n50],
            acc: self.acc,
            priority: self.hitresult_priority,
        };

        let [n300, n100, n50] = generator.generate();

        let max_possible_combo = attrs.max_combo.saturating_sub(n_misses);

        let max_combo = self
            .combo
            .map_or(max_possible_combo, |combo| combo.min(max_possible_combo));

        ScoreState {
            max_combo,
            n300,
            n100,
            n50,
            n_misses,
        }
    }

    /// Calculate all performance related values, including pp and stars.
    pub fn calculate(mut self) -> PerformanceAttributes {
        let state = self.generate_state();

        let attrs = match self.map_or_attrs {
            MapOrAttrs::Map(map) => self.generate_attributes(map),
            MapOrAttrs::Attrs(attrs) => attrs,
        };

        let inner = PerformanceInner {
            attrs,
            mods: self.mods,
            state,
            breakdown: self.breakdown,
        };

        inner.calculate()
    }

    /// Same as [`Performance::calculate`] but first checks whether the map
    /// is [`TooSuspicious`] and whether the clock rate is usable.
    ///
    /// Provided attributes are not checked.
    ///
    /// [`TooSuspicious`]: crate::model::beatmap::TooSuspicious
    pub fn checked_calculate(self) -> Result<PerformanceAttributes, CalculateError> {
        if let MapOrAttrs::Map(map) = self.map_or_attrs {
            check_clock_rate(self.clock_rate.unwrap_or_else(|| self.mods.clock_rate()))?;
            map.check_suspicion()?;
        }

        Ok(self.calculate())
    }

    fn generate_attributes(&self, map: &Beatmap) -> DifficultyAttributes {
        let mut calculator = Difficulty::new(map).mods(self.mods);

        if let Some(passed_objects) = self.passed_objects {
            calculator = calculator.passed_objects(passed_objects);
        }

        if let Some(clock_rate) = self.clock_rate {
            calculator = calculator.clock_rate(clock_rate);
        }

        calculator.calculate()
    }

    fn from_map_or_attrs(map_or_attrs: MapOrAttrs<'map>) -> Self {
        Self {
            map_or_attrs,
            mods: 0,
            acc: None,
            combo: None,

            n300: None,
            n100: None,
            n50: None,
            n_misses: None,
            passed_objects: None,
            clock_rate: None,
            hitresult_priority: HitResultPriority::default(),
            breakdown: false,
        }
    }
}

impl<'map> From<&'map Beatmap> for Performance<'map> {
    fn from(map: &'map Beatmap) -> Self {
        Self::from_map_or_attrs(map.into())
    }
}

impl From<DifficultyAttributes> for Performance<'_> {
    fn from(attrs: DifficultyAttributes) -> Self {
        Self::from_map_or_attrs(attrs.into())
    }
}

impl From<PerformanceAttributes> for Performance<'_> {
    fn from(attrs: PerformanceAttributes) -> Self {
        Self::from_map_or_attrs(attrs.into())
    }
}

/// While generating remaining hitresults, decide how they should be distributed.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum HitResultPriority {
    /// Prioritize good hitresults over bad ones
    #[default]
    BestCase,
    /// Prioritize bad hitresults over good ones
    WorstCase,
}
