use std::{cmp::Ordering, fmt::Debug};

use crate::util::limited_stack::LimitedStack;

use super::{super::object::MotionSample, SkillKind};

/// The most recent samples handed to an evaluator, `history[0]` being the
/// direct predecessor of the current sample.
pub type History = LimitedStack<MotionSample, 2>;

/// Per-sample difficulty formula of a single skill axis.
pub trait StrainEvaluator {
    /// Evaluator-private memory carried from one sample to the next.
    type State: Clone + Debug + Default + Send;

    const KIND: SkillKind;
    const SKILL_MULTIPLIER: f64;
    const STRAIN_DECAY_BASE: f64;

    /// The decay base to apply before the next evaluation.
    ///
    /// Axes whose decay depends on the last sample store it in their state.
    fn decay_base(_state: &Self::State) -> f64 {
        Self::STRAIN_DECAY_BASE
    }

    fn strain_value_of(state: &mut Self::State, curr: &MotionSample, history: &History) -> f64;
}

pub const DECAY_WEIGHT: f64 = 0.9;
pub const DIFFICULTY_MULTIPLIER: f64 = 0.0675;

/// Strain of a single sample together with where it sits in the sections.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct ObjectStrain {
    pub strain: f64,
    /// Index of the section the sample belongs to.
    pub section: usize,
    /// Running peak of that section right after the sample was processed.
    pub section_peak: f64,
    /// Whether the evaluator added anything for this sample.
    pub raised: bool,
}

/// Decaying strain accumulator sectioned into fixed-length peaks.
#[derive(Clone, Debug)]
pub struct StrainEngine<E: StrainEvaluator> {
    state: E::State,
    history: History,

    current_strain: f64,
    current_section_peak: f64,
    prev_time: Option<f64>,
    /// Whether any sample raised the strain above its decaying baseline.
    raised: bool,

    pub(crate) strain_peaks: Vec<f64>,
    /// Peak each section started out with, i.e. the decayed carry-over.
    pub(crate) section_starts: Vec<f64>,
    pub(crate) object_strains: Vec<ObjectStrain>,
}

impl<E: StrainEvaluator> StrainEngine<E> {
    pub fn new() -> Self {
        Self {
            state: E::State::default(),
            history: History::default(),
            current_strain: 1.0,
            current_section_peak: 1.0,
            prev_time: None,
            raised: false,
            strain_peaks: Vec::with_capacity(128),
            section_starts: vec![1.0],
            object_strains: Vec::new(),
        }
    }

    pub fn save_current_peak(&mut self) {
        if self.prev_time.is_some() {
            self.strain_peaks.push(self.current_section_peak);
        }
    }

    pub fn start_new_section_from(&mut self, time: f64) {
        if let Some(prev_time) = self.prev_time {
            self.current_section_peak = self.peak_strain(time - prev_time);
            self.section_starts.push(self.current_section_peak);
        }
    }

    pub fn process(&mut self, curr: &MotionSample) {
        self.current_strain *= self.strain_decay(curr.delta_time);

        let value = E::strain_value_of(&mut self.state, curr, &self.history);
        let raised = value > 0.0;

        self.current_strain += value * E::SKILL_MULTIPLIER;
        self.raised |= raised;

        self.current_section_peak = self.current_section_peak.max(self.current_strain);

        self.object_strains.push(ObjectStrain {
            strain: self.current_strain,
            section: self.section_starts.len() - 1,
            section_peak: self.current_section_peak,
            raised,
        });

        self.history.push(*curr);
        self.prev_time = Some(curr.start_time);
    }

    /// Weighted sum of all saved section peaks.
    pub fn difficulty_value(&self) -> f64 {
        difficulty_value(self.strain_peaks.iter().copied())
    }

    /// Axis rating of all saved section peaks.
    ///
    /// An axis that no sample raised only carries its starting strain and
    /// rates 0.
    pub fn rating(&self) -> f64 {
        if !self.raised {
            return 0.0;
        }

        rating(self.difficulty_value())
    }

    /// Rating of the first `count` processed samples.
    ///
    /// For the last sample this is exactly [`StrainEngine::rating`].
    pub(crate) fn prefix_rating(&self, count: usize) -> f64 {
        let Some(last) = count.checked_sub(1).and_then(|idx| self.object_strains.get(idx)) else {
            return 0.0;
        };

        if !self.object_strains[..count].iter().any(|strain| strain.raised) {
            return 0.0;
        }

        let completed = &self.strain_peaks[..last.section.min(self.strain_peaks.len())];
        let peaks = completed.iter().copied().chain([last.section_peak]);

        rating(difficulty_value(peaks))
    }

    /// Rating after the samples flagged in `removed` contributed no strain.
    ///
    /// Sections keep their carried-over starting peak.
    pub(crate) fn rating_without(&self, removed: &[bool]) -> f64 {
        if !self.raised {
            return 0.0;
        }

        let mut peaks = self.section_starts.clone();

        for (strain, _) in self
            .object_strains
            .iter()
            .zip(removed)
            .filter(|(_, removed)| !**removed)
        {
            let peak = &mut peaks[strain.section];
            *peak = peak.max(strain.strain);
        }

        rating(difficulty_value(peaks))
    }

    pub fn section_peaks(&self) -> &[f64] {
        &self.strain_peaks
    }

    pub fn object_strains(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.object_strains.iter().map(|strain| strain.strain)
    }

    fn peak_strain(&self, delta_time: f64) -> f64 {
        self.current_strain * self.strain_decay(delta_time)
    }

    fn strain_decay(&self, ms: f64) -> f64 {
        E::decay_base(&self.state).powf(ms / 1000.0)
    }
}

impl<E: StrainEvaluator> Default for StrainEngine<E> {
    fn default() -> Self {
        Self::new()
    }
}

pub fn difficulty_value(peaks: impl IntoIterator<Item = f64>) -> f64 {
    let mut peaks: Vec<_> = peaks.into_iter().collect();
    peaks.sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    let mut difficulty = 0.0;
    let mut weight = 1.0;

    for strain in peaks {
        difficulty += strain * weight;
        weight *= DECAY_WEIGHT;
    }

    difficulty
}

pub fn rating(difficulty_value: f64) -> f64 {
    difficulty_value.sqrt() * DIFFICULTY_MULTIPLIER
}
