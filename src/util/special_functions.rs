//! Error function and its inverse.
//!
//! `erf` uses an everywhere-positive series for small arguments and the
//! continued fraction of `erfc` for large ones. `erf_inv` starts from Giles'
//! approximation and polishes it with Newton steps against `erf`.

use std::f64::consts::PI;

const TWO_OVER_SQRT_PI: f64 = 1.128_379_167_095_512_6;

/// Beyond this, `erf(x)` rounds to `±1.0`.
const ERF_SATURATION: f64 = 6.0;

/// Switch point between series and continued fraction.
const SERIES_LIMIT: f64 = 3.0;

pub fn erf(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }

    let sign = x.signum();
    let x = x.abs();

    let value = if x >= ERF_SATURATION {
        1.0
    } else if x < SERIES_LIMIT {
        erf_series(x)
    } else {
        1.0 - erfc_continued_fraction(x)
    };

    sign * value
}

/// Inverse of [`erf`] on `(-1, 1)`.
///
/// Returns `±inf` at `±1` and `NaN` outside of `[-1, 1]`.
pub fn erf_inv(p: f64) -> f64 {
    if p.is_nan() || p.abs() > 1.0 {
        return f64::NAN;
    } else if p == 0.0 {
        return 0.0;
    } else if p >= 1.0 {
        return f64::INFINITY;
    } else if p <= -1.0 {
        return f64::NEG_INFINITY;
    }

    let mut x = erf_inv_estimate(p);

    // Newton on erf(x) - p; two steps reach double precision from the
    // single precision estimate.
    for _ in 0..3 {
        let derivative = TWO_OVER_SQRT_PI * (-x * x).exp();

        if derivative == 0.0 {
            break;
        }

        let step = (erf(x) - p) / derivative;
        x -= step;

        if step.abs() <= f64::EPSILON * x.abs() {
            break;
        }
    }

    x
}

// erf(x) = 2/sqrt(pi) * exp(-x²) * Σ 2^n x^(2n+1) / (1·3·…·(2n+1))
fn erf_series(x: f64) -> f64 {
    let x_sq = x * x;
    let mut term = x;
    let mut sum = x;
    let mut n = 0.0;

    while term > sum * f64::EPSILON {
        n += 1.0;
        term *= 2.0 * x_sq / (2.0 * n + 1.0);
        sum += term;
    }

    TWO_OVER_SQRT_PI * (-x_sq).exp() * sum
}

// erfc(x) = exp(-x²)/sqrt(pi) / (x + (1/2)/(x + 1/(x + (3/2)/(x + ...))))
fn erfc_continued_fraction(x: f64) -> f64 {
    const DEPTH: u32 = 60;

    let mut denominator = x;

    for n in (1..=DEPTH).rev() {
        denominator = x + f64::from(n) / 2.0 / denominator;
    }

    (-x * x).exp() / PI.sqrt() / denominator
}

// Giles, "Approximating the erfinv function" (2010).
fn erf_inv_estimate(p: f64) -> f64 {
    let w = -((1.0 - p) * (1.0 + p)).ln();

    let poly = if w < 5.0 {
        let w = w - 2.5;

        [
            3.432_739_39e-7,
            -3.523_387_7e-6,
            -4.391_506_54e-6,
            2.185_808_7e-4,
            -1.253_725_03e-3,
            -4.177_681_64e-3,
            2.466_407_27e-1,
            1.501_409_41,
        ]
        .iter()
        .fold(2.810_226_36e-8, |acc, coeff| coeff + acc * w)
    } else {
        let w = w.sqrt() - 3.0;

        [
            1.009_505_58e-4,
            1.349_343_22e-3,
            -3.673_428_44e-3,
            5.739_507_73e-3,
            -7.622_461_3e-3,
            9.438_870_47e-3,
            1.001_674_06,
            2.832_976_82,
        ]
        .iter()
        .fold(-2.002_142_57e-4, |acc, coeff| coeff + acc * w)
    };

    poly * p
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn erf_reference_values() {
        assert_abs_diff_eq!(erf(0.0), 0.0);
        assert_abs_diff_eq!(erf(0.5), 0.520_499_877_813_046_5, epsilon = 1e-14);
        assert_abs_diff_eq!(erf(1.0), 0.842_700_792_949_714_9, epsilon = 1e-14);
        assert_abs_diff_eq!(erf(2.0), 0.995_322_265_018_952_7, epsilon = 1e-14);
        assert_abs_diff_eq!(erf(3.5), 0.999_999_256_901_627_7, epsilon = 1e-14);
        assert_abs_diff_eq!(erf(10.0), 1.0);
    }

    #[test]
    fn erf_is_odd() {
        for x in [0.1, 0.7, 1.9, 2.99, 3.01, 4.5] {
            assert_abs_diff_eq!(erf(-x), -erf(x), epsilon = 1e-15);
        }
    }

    #[test]
    fn erf_tail_from_continued_fraction() {
        let tail = erfc_continued_fraction(3.0);

        assert_abs_diff_eq!(tail, 2.209_049_699_858_544e-5, epsilon = 1e-18);
        assert_abs_diff_eq!(erf(3.0), 1.0 - 2.209_049_699_858_544e-5, epsilon = 1e-15);
        assert_abs_diff_eq!(erf(4.0), 0.999_999_984_582_742_1, epsilon = 1e-15);
    }

    #[test]
    fn erf_inv_reference_values() {
        assert_abs_diff_eq!(erf_inv(0.5), 0.476_936_276_204_469_9, epsilon = 1e-13);
        assert_abs_diff_eq!(erf_inv(-0.9), -1.163_087_153_676_674_3, epsilon = 1e-12);
        assert_abs_diff_eq!(erf_inv(0.0), 0.0);
        assert!(erf_inv(1.0).is_infinite());
        assert!(erf_inv(1.5).is_nan());
    }

    #[test]
    fn erf_inv_inverts_erf() {
        for x in [0.01, 0.3, 1.0, 1.7, 2.5, 3.2, 4.0] {
            assert_abs_diff_eq!(erf_inv(erf(x)), x, epsilon = 1e-8 * x.max(1.0) * x.exp2());
        }
    }
}
