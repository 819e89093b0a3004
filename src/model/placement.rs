use std::cmp::Ordering;

use super::pos::Pos2;

/// A scored object of the sequence.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Start time in milliseconds.
    pub start_time: f64,
    /// Stacked position on the playfield.
    pub pos: Pos2,
    pub kind: PlacementKind,
}

impl Placement {
    /// Create a tappable circle.
    pub const fn circle(start_time: f64, pos: Pos2) -> Self {
        Self {
            start_time,
            pos,
            kind: PlacementKind::Circle,
        }
    }

    /// Create a slider along the given path.
    pub const fn slider(start_time: f64, pos: Pos2, path: SlidingPath) -> Self {
        Self {
            start_time,
            pos,
            kind: PlacementKind::Slider(path),
        }
    }

    /// Create a spinner lasting `duration` milliseconds.
    pub const fn spinner(start_time: f64, pos: Pos2, duration: f64) -> Self {
        Self {
            start_time,
            pos,
            kind: PlacementKind::Spinner { duration },
        }
    }

    /// Whether the placement is a circle.
    pub const fn is_circle(&self) -> bool {
        matches!(self.kind, PlacementKind::Circle)
    }

    /// Whether the placement is a slider.
    pub const fn is_slider(&self) -> bool {
        matches!(self.kind, PlacementKind::Slider(_))
    }

    /// Whether the placement is a spinner.
    pub const fn is_spinner(&self) -> bool {
        matches!(self.kind, PlacementKind::Spinner { .. })
    }

    /// How much combo this placement is worth when hit completely.
    pub fn max_combo(&self) -> u32 {
        match self.kind {
            PlacementKind::Circle | PlacementKind::Spinner { .. } => 1,
            PlacementKind::Slider(ref path) => 1 + path.nested.len() as u32,
        }
    }
}

impl PartialOrd for Placement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.start_time.partial_cmp(&other.start_time)
    }
}

/// Additional data of a [`Placement`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementKind {
    Circle,
    Slider(SlidingPath),
    /// Hold-and-release region.
    Spinner { duration: f64 },
}

/// The sampled path of a slider.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlidingPath {
    /// Full duration including all repeats in milliseconds.
    pub duration: f64,
    pub repeats: usize,
    /// Travel speed along the path.
    pub velocity: f64,
    /// Scoring points after the head in chronological order, the last one
    /// being the tail.
    pub nested: Vec<NestedSample>,
}

impl SlidingPath {
    /// The tail sample, if the path has any nested samples.
    pub fn tail(&self) -> Option<&NestedSample> {
        self.nested.last()
    }
}

/// A scoring point along a [`SlidingPath`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NestedSample {
    /// Absolute time in milliseconds.
    pub time: f64,
    /// Absolute playfield position.
    pub pos: Pos2,
    pub kind: NestedKind,
}

impl NestedSample {
    pub const fn new(time: f64, pos: Pos2, kind: NestedKind) -> Self {
        Self { time, pos, kind }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NestedKind {
    Tick,
    Repeat,
    Tail,
}
