use crate::model::beatmap::TooSuspicious;

/// All the ways that a checked calculation can fail.
#[derive(Copy, Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum CalculateError {
    #[error(transparent)]
    Suspicious(#[from] TooSuspicious),
    #[error("clock rate must be positive and finite, got {0}")]
    ClockRate(f64),
}

/// Reject clock rates that would scale times to nonsense.
pub(crate) fn check_clock_rate(clock_rate: f64) -> Result<(), CalculateError> {
    if clock_rate.is_finite() && clock_rate > 0.0 {
        Ok(())
    } else {
        Err(CalculateError::ClockRate(clock_rate))
    }
}
