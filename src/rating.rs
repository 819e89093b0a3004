//! Combining axis ratings into group and star ratings.
//!
//! Ratings are first mapped onto a cubic "points" scale where the
//! combination happens, and the result is mapped back with the exact inverse.

/// Axis rating below which an axis is worth no extra points.
pub const RATING_BASE: f64 = 0.0575;

const POINTS_DIVISOR: f64 = 100_000.0;

/// Exponent for combining axes within the aim and tap groups.
pub const GROUP_EXPONENT: f64 = 5.0;

/// Exponent for combining the aim, tap, and accuracy groups.
pub const TOTAL_EXPONENT: f64 = 1.1;

/// `points` of a rating.
pub fn points(rating: f64) -> f64 {
    (5.0 * (rating / RATING_BASE).max(1.0) - 4.0).powi(3) / POINTS_DIVISOR
}

/// Inverse of [`points`] for ratings of at least [`RATING_BASE`].
pub fn stars(points: f64) -> f64 {
    RATING_BASE / 5.0 * ((POINTS_DIVISOR * points).cbrt() + 4.0)
}

/// `(Σ vᵖ)^(1/p)`
pub fn power_sum(values: impl IntoIterator<Item = f64>, p: f64) -> f64 {
    values
        .into_iter()
        .map(|value| value.powf(p))
        .sum::<f64>()
        .powf(p.recip())
}

/// Points of the three rating groups.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GroupPoints {
    pub aim: f64,
    pub tap: f64,
    pub accuracy: f64,
}

impl GroupPoints {
    pub fn new(aim_ratings: [f64; 4], tap_ratings: [f64; 4], accuracy_rating: f64) -> Self {
        Self {
            aim: power_sum(aim_ratings.map(points), GROUP_EXPONENT),
            tap: power_sum(tap_ratings.map(points), GROUP_EXPONENT),
            accuracy: points(accuracy_rating),
        }
    }

    /// Star rating of all groups combined.
    ///
    /// The combination is normalized such that two equally hard groups
    /// amount to the rating of one of them.
    pub fn star_rating(&self) -> f64 {
        let total = power_sum([self.aim, self.tap, self.accuracy], TOTAL_EXPONENT)
            / 2.0_f64.powf(TOTAL_EXPONENT.recip());

        if total <= 1e-5 {
            0.0
        } else {
            stars(total)
        }
    }
}
