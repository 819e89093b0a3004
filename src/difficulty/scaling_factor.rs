const OBJECT_RADIUS: f32 = 64.0;
const NORMALIZED_RADIUS: f32 = 52.0;

/// Radius threshold below which circles receive a bonus.
const SMALL_CIRCLE_RADIUS: f32 = 30.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScalingFactor {
    /// Multiplier so that distances behave as if drawn at the normalized
    /// radius.
    pub factor: f32,
    pub radius: f32,
}

impl ScalingFactor {
    pub fn new(cs: f64) -> Self {
        let scale = (1.0 - 0.7 * (cs as f32 - 5.0) / 5.0) / 2.0;

        let radius = OBJECT_RADIUS * scale;
        let factor = NORMALIZED_RADIUS / radius;

        let factor = if radius < SMALL_CIRCLE_RADIUS {
            factor * (1.0 + (SMALL_CIRCLE_RADIUS - radius).min(5.0) / 50.0)
        } else {
            factor
        };

        Self { factor, radius }
    }

    /// Radius of the follow circle a slider's cursor is dragged along with.
    pub fn follow_radius(&self) -> f32 {
        self.radius * 3.0
    }
}
