use std::collections::HashMap;

use crate::model::{
    placement::{NestedKind, Placement, PlacementKind, SlidingPath},
    pos::Pos2,
};

/// Where a lazily following cursor ends up after a slider and how much it
/// had to travel to get there.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LazyCursor {
    pub end_pos: Pos2,
    /// Unscaled travel distance.
    pub travel_dist: f32,
    /// Time from the slider head to the last nested sample before the tail.
    pub travel_time: f64,
}

impl LazyCursor {
    fn compute(start_time: f64, head: Pos2, path: &SlidingPath, follow_radius: f32) -> Self {
        let mut cursor = Self {
            end_pos: head,
            travel_dist: 0.0,
            travel_time: 0.0,
        };

        for nested in path.nested.iter() {
            let diff = nested.pos - cursor.end_pos;
            let mut dist = diff.length();

            if dist > follow_radius {
                dist -= follow_radius;
                cursor.end_pos += diff.normalize() * dist;
                cursor.travel_dist += dist;
            }

            if nested.kind != NestedKind::Tail {
                cursor.travel_time = nested.time - start_time;
            }
        }

        cursor
    }
}

/// Memoized [`LazyCursor`]s keyed by placement index.
///
/// A slider's cursor is needed both by the sample right after it and by the
/// one after that, so each is computed at most once.
#[derive(Clone, Debug, Default)]
pub struct LazyCursorCache {
    follow_radius: f32,
    cursors: HashMap<usize, LazyCursor>,
}

impl LazyCursorCache {
    pub fn new(follow_radius: f32) -> Self {
        Self {
            follow_radius,
            cursors: HashMap::new(),
        }
    }

    /// The lazy cursor of the placement at `idx`, or `None` if it's not a
    /// slider.
    pub fn get(&mut self, idx: usize, placement: &Placement) -> Option<LazyCursor> {
        let PlacementKind::Slider(ref path) = placement.kind else {
            return None;
        };

        let follow_radius = self.follow_radius;

        let cursor = self.cursors.entry(idx).or_insert_with(|| {
            LazyCursor::compute(placement.start_time, placement.pos, path, follow_radius)
        });

        Some(*cursor)
    }

    /// Position of the cursor once the placement is done with.
    pub fn end_pos(&mut self, idx: usize, placement: &Placement) -> Pos2 {
        self.get(idx, placement)
            .map_or(placement.pos, |cursor| cursor.end_pos)
    }
}
