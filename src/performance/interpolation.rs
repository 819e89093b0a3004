//! Reading skill ratings off sampled [`SkillCurves`].
//!
//! [`SkillCurves`]: crate::difficulty::skills::curves::SkillCurves

use crate::util::difficulty::lerp;

/// Rating after achieving `fraction` of the max combo.
///
/// Entry `k` of `combo_ratings` is the rating at fraction `(k + 1) / len`.
/// Below the first entry, the rating shrinks proportionally towards zero.
pub fn combo_rating(combo_ratings: &[f64], fraction: f64) -> f64 {
    let Some(&last) = combo_ratings.last() else {
        return 0.0;
    };

    let len = combo_ratings.len() as f64;
    let pos = fraction.clamp(0.0, 1.0) * len;

    if pos >= len {
        return last;
    }

    let i = pos.floor() as usize;

    if i == 0 {
        combo_ratings[0] * pos
    } else {
        lerp(combo_ratings[i - 1], combo_ratings[i], pos - i as f64)
    }
}

/// Rating after `n_misses` misses.
///
/// Entry `i` of `miss_counts` is the amount of misses that lowers the rating
/// by `(i + 1) * increment`. Past the last entry, the rating approaches zero
/// linearly until `max_combo` misses.
pub fn miss_rating(
    rating: f64,
    miss_counts: &[f64],
    n_misses: f64,
    increment: f64,
    max_combo: f64,
) -> f64 {
    if n_misses <= 0.0 {
        return rating;
    }

    let Some((&first, &last)) = miss_counts.first().zip(miss_counts.last()) else {
        return fade_out(rating, 0.0, n_misses, max_combo);
    };

    if n_misses < first {
        return lerp(rating, rating - increment, n_misses / first).max(0.0);
    }

    // Last entry that was reached; with duplicates that's the lowest rating
    let i = miss_counts.partition_point(|&count| count <= n_misses) - 1;
    let step_rating = |i: usize| rating - (i + 1) as f64 * increment;

    let value = match miss_counts.get(i + 1) {
        Some(&next) => {
            let curr = miss_counts[i];

            lerp(step_rating(i), step_rating(i + 1), (n_misses - curr) / (next - curr))
        }
        None => fade_out(step_rating(i), last, n_misses, max_combo),
    };

    value.max(0.0)
}

/// Linear decline from `rating` at `from` misses down to zero at `max_combo`.
fn fade_out(rating: f64, from: f64, n_misses: f64, max_combo: f64) -> f64 {
    if max_combo <= from {
        return 0.0;
    }

    let progress = ((n_misses - from) / (max_combo - from)).min(1.0);

    (rating * (1.0 - progress)).max(0.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    const COMBO: [f64; 4] = [1.0, 2.0, 2.5, 3.0];

    #[test]
    fn combo_endpoints() {
        assert_abs_diff_eq!(combo_rating(&COMBO, 1.0), 3.0);
        assert_abs_diff_eq!(combo_rating(&COMBO, 1.5), 3.0);
        assert_abs_diff_eq!(combo_rating(&COMBO, 0.0), 0.0);
        assert_abs_diff_eq!(combo_rating(&[], 0.5), 0.0);
    }

    #[test]
    fn combo_between_samples() {
        // Below the first sample at 0.25
        assert_abs_diff_eq!(combo_rating(&COMBO, 0.125), 0.5);
        assert_abs_diff_eq!(combo_rating(&COMBO, 0.25), 1.0);
        assert_abs_diff_eq!(combo_rating(&COMBO, 0.375), 1.5);
        assert_abs_diff_eq!(combo_rating(&COMBO, 0.625), 2.25);
    }

    #[test]
    fn no_misses_no_change() {
        assert_abs_diff_eq!(miss_rating(4.0, &[2.0, 5.0], 0.0, 0.1, 100.0), 4.0);
    }

    #[test]
    fn misses_step_down_the_curve() {
        let counts = [2.0, 5.0, 5.0, 9.0];

        assert_abs_diff_eq!(miss_rating(4.0, &counts, 1.0, 0.1, 100.0), 3.95, epsilon = 1e-12);
        assert_abs_diff_eq!(miss_rating(4.0, &counts, 2.0, 0.1, 100.0), 3.9, epsilon = 1e-12);
        assert_abs_diff_eq!(miss_rating(4.0, &counts, 3.5, 0.1, 100.0), 3.85, epsilon = 1e-12);

        // Tied entries resolve to the lower rating
        assert_abs_diff_eq!(miss_rating(4.0, &counts, 5.0, 0.1, 100.0), 3.7, epsilon = 1e-12);
        assert_abs_diff_eq!(miss_rating(4.0, &counts, 7.0, 0.1, 100.0), 3.65, epsilon = 1e-12);
    }

    #[test]
    fn misses_beyond_the_curve_fade_out() {
        let counts = [2.0, 4.0];

        // 3.8 at 4 misses, zero at 104
        assert_abs_diff_eq!(miss_rating(4.0, &counts, 54.0, 0.1, 104.0), 1.9, epsilon = 1e-12);
        assert_abs_diff_eq!(miss_rating(4.0, &counts, 104.0, 0.1, 104.0), 0.0);
        assert_abs_diff_eq!(miss_rating(4.0, &counts, 500.0, 0.1, 104.0), 0.0);
        assert_abs_diff_eq!(miss_rating(4.0, &counts, 5.0, 0.1, 3.0), 0.0);
    }

    #[test]
    fn empty_curve_fades_from_full() {
        assert_abs_diff_eq!(miss_rating(2.0, &[], 25.0, 0.1, 100.0), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn never_increases_with_misses() {
        let counts = [1.0, 1.0, 3.0, 8.0, 8.0, 20.0];
        let mut prev = f64::INFINITY;

        for i in 0..=400 {
            let value = miss_rating(1.0, &counts, f64::from(i) / 4.0, 0.1, 90.0);
            assert!(value <= prev, "{value} > {prev} at {i}");
            prev = value;
        }
    }
}
