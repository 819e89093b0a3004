use std::ops::RangeInclusive;

use super::HitResultPriority;

/// Weight of a 300, 100, and 50 in units of a 50.
const WEIGHTS: [u32; 3] = [6, 2, 1];

/// Fills in the hit results that were not specified.
///
/// `n_misses` must not exceed `n_objects`.
pub(super) struct HitResultGenerator {
    pub n_objects: u32,
    pub n_misses: u32,
    /// Requested 300s, 100s, and 50s.
    pub given: [Option<u32>; 3],
    pub acc: Option<f64>,
    pub priority: HitResultPriority,
}

impl HitResultGenerator {
    /// Returns the amount of 300s, 100s, and 50s.
    pub fn generate(&self) -> [u32; 3] {
        let mut remaining = self.n_objects - self.n_misses;
        let mut counts = [0; 3];

        for (count, given) in counts.iter_mut().zip(self.given) {
            *count = given.map_or(0, |n| n.min(remaining));
            remaining -= *count;
        }

        let free: Vec<usize> = (0..3).filter(|&i| self.given[i].is_none()).collect();

        let Some(acc) = self.acc else {
            self.fill(&mut counts, &free, remaining);

            return counts;
        };

        // Weight the unspecified results still have to make up
        let target = acc * f64::from(6 * self.n_objects) - f64::from(weight(&counts));

        match free.as_slice() {
            [] | [_] => self.fill(&mut counts, &free, remaining),
            &[hi, lo] => {
                let (w_hi, w_lo) = (f64::from(WEIGHTS[hi]), f64::from(WEIGHTS[lo]));
                let estimate = (target - w_lo * f64::from(remaining)) / (w_hi - w_lo);

                let best = self
                    .ordered(candidates(estimate, remaining))
                    .map(|n_hi| {
                        let mut counts = counts;
                        counts[hi] = n_hi;
                        counts[lo] = remaining - n_hi;

                        counts
                    })
                    .min_by(|a, b| distance(a, target).total_cmp(&distance(b, target)));

                if let Some(best) = best {
                    counts = best;
                }
            }
            _ => {
                counts = self.search_all(target, remaining);
                self.shift(&mut counts);
            }
        }

        counts
    }

    /// Assign all remaining objects to one result.
    fn fill(&self, counts: &mut [u32; 3], free: &[usize], remaining: u32) {
        let idx = match self.priority {
            HitResultPriority::BestCase => free.first().copied().unwrap_or(0),
            HitResultPriority::WorstCase => free.last().copied().unwrap_or(2),
        };

        counts[idx] += remaining;
    }

    /// Closest combination when none of the results were specified.
    fn search_all(&self, target: f64, remaining: u32) -> [u32; 3] {
        // 6a + 2b + c = target and a + b + c = remaining
        let estimate = (target - f64::from(remaining)) / 5.0;
        let mut best = [0, 0, remaining];
        let mut best_dist = f64::MAX;

        for n300 in self.ordered(candidates(estimate, remaining)) {
            let rest = remaining - n300;
            let estimate = target - 6.0 * f64::from(n300) - f64::from(rest);

            for n100 in self.ordered(candidates(estimate, rest)) {
                let counts = [n300, n100, rest - n100];
                let dist = distance(&counts, target);

                if dist < best_dist {
                    best_dist = dist;
                    best = counts;
                }
            }
        }

        best
    }

    /// Trade results without changing the accuracy.
    fn shift(&self, [n300, n100, n50]: &mut [u32; 3]) {
        match self.priority {
            // One 300 and four 50s for five 100s
            HitResultPriority::BestCase => {
                let n = (*n300).min(*n50 / 4);
                *n300 -= n;
                *n100 += 5 * n;
                *n50 -= 4 * n;
            }
            HitResultPriority::WorstCase => {
                let n = *n100 / 5;
                *n300 += n;
                *n100 -= 5 * n;
                *n50 += 4 * n;
            }
        }
    }

    /// Best case checks more hits first so ties prefer better results.
    fn ordered(&self, range: RangeInclusive<u32>) -> Box<dyn Iterator<Item = u32>> {
        match self.priority {
            HitResultPriority::BestCase => Box::new(range.rev()),
            HitResultPriority::WorstCase => Box::new(range),
        }
    }
}

fn weight(counts: &[u32; 3]) -> u32 {
    counts.iter().zip(WEIGHTS).map(|(n, w)| n * w).sum()
}

fn distance(counts: &[u32; 3], target: f64) -> f64 {
    (f64::from(weight(counts)) - target).abs()
}

/// Integers around `estimate` within `0..=max`.
fn candidates(estimate: f64, max: u32) -> RangeInclusive<u32> {
    let clamp = |n: f64| n.clamp(0.0, f64::from(max)) as u32;

    clamp(estimate.floor())..=clamp(estimate.ceil())
}
