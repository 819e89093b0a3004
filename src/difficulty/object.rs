use crate::model::{
    placement::{Placement, PlacementKind},
    pos::Pos2,
};

use super::{lazy_cursor::LazyCursorCache, scaling_factor::ScalingFactor};

/// What kind of placement a [`MotionSample`] was derived from.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum SampleKind {
    #[default]
    Circle,
    Slider {
        velocity: f64,
    },
    Spinner,
}

impl SampleKind {
    fn new(kind: &PlacementKind) -> Self {
        match kind {
            PlacementKind::Circle => Self::Circle,
            PlacementKind::Slider(path) => Self::Slider {
                velocity: path.velocity,
            },
            PlacementKind::Spinner { .. } => Self::Spinner,
        }
    }
}

/// Kinematic features of one placement relative to its predecessors.
///
/// All times are adjusted to the clock rate and all distances are scaled to
/// the normalized radius.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MotionSample {
    /// Index of the placement this sample belongs to.
    pub idx: usize,
    pub start_time: f64,
    pub delta_time: f64,
    /// `delta_time` floored to [`MotionSample::MIN_DELTA_TIME`].
    pub strain_time: f64,
    /// Distance from the previous placement's lazy end position.
    pub jump_dist: f64,
    /// Distance from the previous slider's tail, ignoring its lazy cursor.
    pub end_jump_dist: f64,
    pub dist_vec: Pos2,
    /// Lazy travel distance of the previous placement if it was a slider.
    pub travel_dist: f64,
    pub travel_time: f64,
    /// Full duration of the previous slider.
    pub travel_duration: f64,
    /// Angle between the previous two and the current placement.
    pub angle: Option<f64>,
    /// Signed turn of the same three placements, normalized by the longer leg.
    pub normed_det: f64,
    pub kind: SampleKind,
}

impl MotionSample {
    /// Caps the strain interval at the equivalent of 375 BPM streaming.
    pub const MIN_DELTA_TIME: f64 = 50.0;
    pub const MIN_TRAVEL_TIME: f64 = 50.0;

    /// Create the sample of the placement at `idx`.
    ///
    /// `idx` must be at least 1.
    pub fn new(
        idx: usize,
        placements: &[Placement],
        clock_rate: f64,
        scaling_factor: &ScalingFactor,
        cursors: &mut LazyCursorCache,
    ) -> Self {
        let curr = &placements[idx];
        let last = &placements[idx - 1];

        let delta_time = (curr.start_time - last.start_time) / clock_rate;

        let mut this = Self {
            idx,
            start_time: curr.start_time / clock_rate,
            delta_time,
            strain_time: delta_time.max(Self::MIN_DELTA_TIME),
            kind: SampleKind::new(&curr.kind),
            ..Self::default()
        };

        this.set_distances(placements, clock_rate, scaling_factor, cursors);
        this.travel_time = this.travel_time.max(Self::MIN_TRAVEL_TIME);

        this
    }

    pub const fn is_slider(&self) -> bool {
        matches!(self.kind, SampleKind::Slider { .. })
    }

    pub const fn is_spinner(&self) -> bool {
        matches!(self.kind, SampleKind::Spinner)
    }

    /// Travel distance added on top of the jump.
    pub fn total_dist(&self) -> f64 {
        self.jump_dist + self.travel_dist
    }

    fn set_distances(
        &mut self,
        placements: &[Placement],
        clock_rate: f64,
        scaling_factor: &ScalingFactor,
        cursors: &mut LazyCursorCache,
    ) {
        let factor = scaling_factor.factor;

        let curr = &placements[self.idx];
        let last_idx = self.idx - 1;
        let last = &placements[last_idx];

        if let (Some(cursor), PlacementKind::Slider(ref path)) =
            (cursors.get(last_idx, last), &last.kind)
        {
            self.travel_dist = f64::from(cursor.travel_dist * factor);
            self.travel_time = cursor.travel_time / clock_rate;
            self.travel_duration = path.duration / clock_rate;

            let tail_pos = path.tail().map_or(last.pos, |tail| tail.pos);
            self.end_jump_dist = f64::from((curr.pos * factor - tail_pos * factor).length());
        }

        let last_cursor_pos = cursors.end_pos(last_idx, last);

        // Don't need to jump to reach spinners
        if !curr.is_spinner() {
            self.dist_vec = curr.pos * factor - last_cursor_pos * factor;
            self.jump_dist = f64::from(self.dist_vec.length());

            if self.end_jump_dist == 0.0 {
                self.end_jump_dist = self.jump_dist;
            }
        }

        if let Some(last_last_idx) = self.idx.checked_sub(2) {
            let last_last_cursor_pos = cursors.end_pos(last_last_idx, &placements[last_last_idx]);

            let v1 = last_last_cursor_pos - last.pos;
            let v2 = curr.pos - last_cursor_pos;

            let dot = f64::from(v1.dot(v2));
            let det = f64::from(v1.cross(v2));

            let max_len = f64::from(v1.length().max(v2.length()));

            if max_len > 0.0 {
                self.normed_det = det / (max_len * max_len);
            }

            self.angle = Some(det.atan2(dot).abs());
        }
    }
}

/// Derive one [`MotionSample`] for each placement after the first.
pub fn create_motion_samples(
    placements: &[Placement],
    clock_rate: f64,
    scaling_factor: &ScalingFactor,
) -> Vec<MotionSample> {
    let mut cursors = LazyCursorCache::new(scaling_factor.follow_radius());

    (1..placements.len())
        .map(|idx| MotionSample::new(idx, placements, clock_rate, scaling_factor, &mut cursors))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI};

    use crate::model::placement::{NestedKind, NestedSample, SlidingPath};

    use super::*;

    fn circles(points: &[(f64, f32, f32)]) -> Vec<Placement> {
        points
            .iter()
            .map(|&(time, x, y)| Placement::circle(time, Pos2::new(x, y)))
            .collect()
    }

    #[test]
    fn first_placement_has_no_sample() {
        let scaling = ScalingFactor::new(5.0);

        assert!(create_motion_samples(&[], 1.0, &scaling).is_empty());
        assert!(create_motion_samples(&circles(&[(0.0, 0.0, 0.0)]), 1.0, &scaling).is_empty());
    }

    #[test]
    fn stacked_taps_have_zero_distance() {
        let placements = circles(&[
            (0.0, 256.0, 192.0),
            (200.0, 256.0, 192.0),
            (400.0, 256.0, 192.0),
            (600.0, 256.0, 192.0),
        ]);
        let samples = create_motion_samples(&placements, 1.0, &ScalingFactor::new(4.0));

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].angle, None);

        for sample in samples.iter() {
            assert!(sample.jump_dist.abs() < f64::EPSILON);
            assert!((sample.strain_time - 200.0).abs() < f64::EPSILON);
        }

        assert_eq!(samples[1].angle, Some(0.0));
        assert_eq!(samples[2].angle, Some(0.0));
    }

    #[test]
    fn angles_and_turn_sign() {
        let scaling = ScalingFactor::new(5.0);

        // straight line
        let line = circles(&[(0.0, 0.0, 0.0), (300.0, 100.0, 0.0), (600.0, 200.0, 0.0)]);
        let samples = create_motion_samples(&line, 1.0, &scaling);
        assert!((samples[1].angle.unwrap() - PI).abs() < 1e-6);
        assert!(samples[1].normed_det.abs() < 1e-9);

        // right angle, turning both ways
        let left = circles(&[(0.0, 0.0, 0.0), (300.0, 100.0, 0.0), (600.0, 100.0, 100.0)]);
        let right = circles(&[(0.0, 0.0, 0.0), (300.0, 100.0, 0.0), (600.0, 100.0, -100.0)]);

        let left = create_motion_samples(&left, 1.0, &scaling);
        let right = create_motion_samples(&right, 1.0, &scaling);

        assert!((left[1].angle.unwrap() - FRAC_PI_2).abs() < 1e-6);
        assert!((right[1].angle.unwrap() - FRAC_PI_2).abs() < 1e-6);
        assert!(left[1].normed_det * right[1].normed_det < 0.0);
    }

    #[test]
    fn clock_rate_and_floor() {
        let placements = circles(&[(0.0, 0.0, 0.0), (60.0, 0.0, 0.0)]);
        let samples = create_motion_samples(&placements, 1.5, &ScalingFactor::new(5.0));

        assert!((samples[0].delta_time - 40.0).abs() < 1e-9);
        assert!((samples[0].strain_time - 50.0).abs() < f64::EPSILON);
        assert!((samples[0].travel_time - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn slider_travel_feeds_next_sample() {
        let path = SlidingPath {
            duration: 400.0,
            repeats: 0,
            velocity: 0.75,
            nested: vec![
                NestedSample::new(200.0, Pos2::new(250.0, 0.0), NestedKind::Tick),
                NestedSample::new(400.0, Pos2::new(300.0, 0.0), NestedKind::Tail),
            ],
        };

        let placements = vec![
            Placement::slider(0.0, Pos2::zero(), path),
            Placement::circle(600.0, Pos2::new(300.0, 100.0)),
        ];

        let scaling = ScalingFactor::new(5.0);
        let samples = create_motion_samples(&placements, 1.0, &scaling);
        let sample = &samples[0];

        // follow radius 96: tick drags to 154, tail to 204
        let factor = f64::from(scaling.factor);
        assert!((sample.travel_dist - 204.0 * factor).abs() < 1e-3);
        assert!((sample.travel_time - 200.0).abs() < f64::EPSILON);
        assert!((sample.travel_duration - 400.0).abs() < f64::EPSILON);
        assert!((sample.end_jump_dist - 100.0 * factor).abs() < 1e-3);

        let expected_jump = f64::from(Pos2::new(96.0, 100.0).length()) * factor;
        assert!((sample.jump_dist - expected_jump).abs() < 1e-3);
        assert!(sample.end_jump_dist < sample.jump_dist);
    }
}
