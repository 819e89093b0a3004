use std::collections::VecDeque;

use crate::difficulty::object::MotionSample;

use super::{
    strain::{History, StrainEvaluator},
    SkillKind,
};

/// Timing complexity of the rhythm within a short window.
#[derive(Copy, Clone, Debug, Default)]
pub struct Accuracy;

#[derive(Copy, Clone, Debug)]
struct Interval {
    strain_time: f64,
    is_slider: bool,
}

#[derive(Clone, Debug, Default)]
pub struct AccuracyState {
    prev_base_interval: f64,
    intervals: VecDeque<Interval>,
    intervals_sum: f64,
}

impl Accuracy {
    const WINDOW_MS: f64 = 2000.0;
    /// Relative deviation from the base interval considered a new rhythm.
    const OFF_BEAT_TOLERANCE: f64 = 0.05;

    fn is_off_beat(interval: f64, base: f64) -> bool {
        (interval - base).abs() % base / base > Self::OFF_BEAT_TOLERANCE
    }
}

impl AccuracyState {
    /// The interval closest to the window's average.
    fn base_interval(&self) -> f64 {
        let avg = self.intervals_sum / self.intervals.len() as f64;

        let offset = self
            .intervals
            .iter()
            .map(|interval| interval.strain_time - avg)
            .fold(f64::INFINITY, |closest, offset| {
                if closest.abs() < offset.abs() {
                    closest
                } else {
                    offset
                }
            });

        offset + avg
    }
}

impl StrainEvaluator for Accuracy {
    type State = AccuracyState;

    const KIND: SkillKind = SkillKind::Accuracy;
    const SKILL_MULTIPLIER: f64 = 3.0;
    const STRAIN_DECAY_BASE: f64 = 0.5;

    fn strain_value_of(state: &mut Self::State, curr: &MotionSample, _: &History) -> f64 {
        if curr.is_spinner() {
            return 0.0;
        }

        while state.intervals_sum + curr.strain_time > Self::WINDOW_MS {
            let Some(oldest) = state.intervals.pop_front() else {
                break;
            };

            state.intervals_sum -= oldest.strain_time;
        }

        if state.intervals.is_empty() {
            state.intervals_sum = 0.0;
        }

        let mut base_change = 0.0;
        let mut complexity_sum = 0.0;
        let count = state.intervals.len().max(1) as f64;

        if !state.intervals.is_empty() {
            let base = state.base_interval();
            let mut prev_strain_time = base;

            for interval in state.intervals.iter() {
                let off_beat = Accuracy::is_off_beat(interval.strain_time, base);

                if interval.is_slider {
                    if off_beat {
                        complexity_sum += 2.0;
                    }
                } else {
                    if off_beat {
                        complexity_sum += 4.0;
                    }

                    if (prev_strain_time - interval.strain_time).abs() > 2.0 {
                        complexity_sum += 2.0;
                    }

                    prev_strain_time = interval.strain_time;
                }
            }

            if Accuracy::is_off_beat(state.prev_base_interval, base) {
                base_change = 4.0;
            }

            state.prev_base_interval = base;
        }

        state.intervals.push_back(Interval {
            strain_time: curr.strain_time,
            is_slider: curr.is_slider(),
        });
        state.intervals_sum += curr.strain_time;

        base_change + complexity_sum / count
    }
}
