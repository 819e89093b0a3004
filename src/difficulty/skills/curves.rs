use std::cmp::Ordering;

use super::strain::{StrainEngine, StrainEvaluator};

/// Amount of evenly spaced combo fractions sampled for the combo curve.
pub const COMBO_SAMPLES: usize = 20;

/// Rating step between consecutive entries of the miss curve.
pub const MISS_STAR_RATING_INCREMENT: f64 = 0.1;

/// How an axis rating reacts to partial combos and to misses.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillCurves {
    /// Entry `k` is the rating of the shortest prefix of samples whose combo
    /// reaches `(k + 1) / COMBO_SAMPLES` of the max combo, so the last entry
    /// is the full rating.
    pub combo_ratings: Vec<f64>,
    /// Entry `i` is the least amount of removed samples that lowers the
    /// rating by at least `(i + 1) * MISS_STAR_RATING_INCREMENT`.
    pub miss_counts: Vec<f64>,
}

impl SkillCurves {
    /// `running_combo[i]` is the combo reached once the placement of the
    /// `i`-th sample is completed, counting every earlier placement.
    pub(crate) fn new<E: StrainEvaluator>(engine: &StrainEngine<E>, running_combo: &[u32]) -> Self {
        Self {
            combo_ratings: combo_ratings(engine, running_combo),
            miss_counts: miss_counts(engine),
        }
    }
}

fn combo_ratings<E: StrainEvaluator>(engine: &StrainEngine<E>, running_combo: &[u32]) -> Vec<f64> {
    let n = engine.object_strains.len().min(running_combo.len());

    let Some(max_combo) = n.checked_sub(1).map(|last| running_combo[last]) else {
        return Vec::new();
    };

    let running_combo = &running_combo[..n];

    (1..=COMBO_SAMPLES)
        .map(|k| {
            let target = k as f64 * f64::from(max_combo) / COMBO_SAMPLES as f64;

            // First sample whose placement brings the combo up to the target
            let reached = running_combo.partition_point(|&combo| f64::from(combo) < target);

            if k == COMBO_SAMPLES || reached + 1 >= n {
                engine.rating()
            } else {
                engine.prefix_rating(reached + 1)
            }
        })
        .collect()
}

fn miss_counts<E: StrainEvaluator>(engine: &StrainEngine<E>) -> Vec<f64> {
    let n = engine.object_strains.len();

    if n == 0 {
        return Vec::new();
    }

    let full_rating = engine.rating();

    // Hardest samples first
    let mut order: Vec<_> = (0..n).collect();
    order.sort_by(|&a, &b| {
        let a = engine.object_strains[a].strain;
        let b = engine.object_strains[b].strain;

        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    });

    let mut removed = vec![false; n];

    let mut rating_without_hardest = |count: usize| {
        removed.iter_mut().for_each(|removed| *removed = false);

        for &idx in order.iter().take(count) {
            removed[idx] = true;
        }

        engine.rating_without(&removed)
    };

    let mut counts = Vec::new();
    let mut lower = 1;

    for i in 1.. {
        let target = full_rating - i as f64 * MISS_STAR_RATING_INCREMENT;

        if rating_without_hardest(n) > target {
            break;
        }

        // Smallest count reaching the target; ratings only decrease as more
        // samples are removed and targets only decrease with `i`.
        let mut upper = n;

        while lower < upper {
            let mid = lower + (upper - lower) / 2;

            if rating_without_hardest(mid) <= target {
                upper = mid;
            } else {
                lower = mid + 1;
            }
        }

        counts.push(lower as f64);
    }

    counts
}
