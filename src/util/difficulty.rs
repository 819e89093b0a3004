/// Map a difficulty setting between 0 and 10 onto a value range, with `mid`
/// being the value at 5.
pub fn difficulty_range(difficulty: f64, min: f64, mid: f64, max: f64) -> f64 {
    if difficulty > 5.0 {
        mid + (max - mid) * (difficulty - 5.0) / 5.0
    } else if difficulty < 5.0 {
        mid - (mid - min) * (5.0 - difficulty) / 5.0
    } else {
        mid
    }
}

pub fn lerp(start: f64, end: f64, amount: f64) -> f64 {
    start + (end - start) * amount
}

/// `sin²` ramp from 0 at `x = 0` up to 1 at `x = end`, constant afterwards.
pub fn sin_sq_ramp(x: f64, end: f64) -> f64 {
    if x >= end {
        1.0
    } else {
        f64::powi(f64::sin(std::f64::consts::FRAC_PI_2 * x / end), 2)
    }
}
