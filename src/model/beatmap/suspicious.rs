use thiserror::Error;

use crate::model::{
    placement::{Placement, PlacementKind},
    pos::Pos2,
};

use super::Beatmap;

/// Resulting error type of [`Beatmap::check_suspicion`].
///
/// [`Beatmap::check_suspicion`]: crate::model::beatmap::Beatmap::check_suspicion
/// [`Beatmap`]: crate::model::beatmap::Beatmap
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TooSuspicious {
    /// Notes are too dense time-wise.
    #[error("the map seems too suspicious for further calculation: notes are too dense")]
    Density,
    /// The map seems too long.
    #[error("the map seems too suspicious for further calculation: map is too long")]
    Length,
    /// Too many objects.
    #[error("the map seems too suspicious for further calculation: too many objects")]
    ObjectCount,
    /// General red flag.
    #[error("the map seems too suspicious for further calculation: red flag")]
    RedFlag,
    /// Too many sliders' positions were suspicious.
    #[error("the map seems too suspicious for further calculation: slider positions")]
    SliderPositions,
    /// Too many sliders had a very high amount of repeats.
    #[error("the map seems too suspicious for further calculation: slider repeats")]
    SliderRepeats,
}

impl TooSuspicious {
    pub(crate) fn new(map: &Beatmap) -> Option<Self> {
        fn too_long(placements: &[Placement]) -> bool {
            const DAY_MS: f64 = 60.0 * 60.0 * 24.0 * 1000.0;

            match placements {
                [first, .., last] => last.start_time - first.start_time > DAY_MS,
                _ => false,
            }
        }

        fn too_dense(i: usize, curr: &Placement, placements: &[Placement]) -> bool {
            const THRESHOLD_1S: usize = 100; // 100 notes per 1s = 6000BPM
            const THRESHOLD_10S: usize = 250; // 250 notes per 10s = 1500BPM

            let within = |n: usize, ms: f64| {
                placements
                    .get(i + n)
                    .is_some_and(|h| h.start_time - curr.start_time < ms)
            };

            within(THRESHOLD_1S, 1000.0) || within(THRESHOLD_10S, 10_000.0)
        }

        fn check_pos(pos: Pos2) -> bool {
            /// The playfield is `512x384`
            const THRESHOLD: f32 = 10_000.0;

            f32::abs(pos.x) > THRESHOLD || f32::abs(pos.y) > THRESHOLD
        }

        const fn check_repeats(repeats: usize) -> bool {
            const THRESHOLD: usize = 1000;

            repeats > THRESHOLD
        }

        const OBJECT_THRESHOLD: usize = 500_000;
        const SLIDER_THRESHOLD: usize = 256;

        let placements = map.placements.as_slice();

        if placements.len() > OBJECT_THRESHOLD {
            return Some(Self::ObjectCount);
        } else if too_long(placements) {
            return Some(Self::Length);
        }

        let mut pos_beyond_threshold = 0;
        let mut repeats_beyond_threshold = 0;

        for (i, h) in placements.iter().enumerate() {
            if too_dense(i, h, placements) {
                return Some(Self::Density);
            }

            if let PlacementKind::Slider(ref path) = h.kind {
                if check_repeats(path.repeats) {
                    if check_pos(h.pos) {
                        return Some(Self::RedFlag);
                    }

                    repeats_beyond_threshold += 1;
                } else if check_pos(h.pos) {
                    pos_beyond_threshold += 1;
                }
            }
        }

        if pos_beyond_threshold > SLIDER_THRESHOLD {
            Some(Self::SliderPositions)
        } else if repeats_beyond_threshold > SLIDER_THRESHOLD {
            Some(Self::SliderRepeats)
        } else {
            None
        }
    }
}
