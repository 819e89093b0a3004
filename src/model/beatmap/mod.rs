use crate::{Difficulty, Performance};

use super::placement::Placement;

pub use self::{
    attributes::{BeatmapAttributes, BeatmapAttributesBuilder, HitWindows},
    suspicious::TooSuspicious,
};

mod attributes;
mod suspicious;

/// All beatmap data that is relevant for difficulty and performance
/// calculation.
///
/// Placements must be sorted by start time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Beatmap {
    pub ar: f32,
    pub cs: f32,
    pub hp: f32,
    pub od: f32,
    pub placements: Vec<Placement>,
}

impl Beatmap {
    /// Create a [`Beatmap`] with all difficulty settings on `5.0`.
    pub fn new(placements: Vec<Placement>) -> Self {
        Self {
            placements,
            ..Default::default()
        }
    }

    /// Specify the approach rate.
    pub const fn ar(mut self, ar: f32) -> Self {
        self.ar = ar;

        self
    }

    /// Specify the circle size.
    pub const fn cs(mut self, cs: f32) -> Self {
        self.cs = cs;

        self
    }

    /// Specify the drain rate.
    pub const fn hp(mut self, hp: f32) -> Self {
        self.hp = hp;

        self
    }

    /// Specify the overall difficulty.
    pub const fn od(mut self, od: f32) -> Self {
        self.od = od;

        self
    }

    /// Returns a [`BeatmapAttributesBuilder`] to calculate modified beatmap
    /// attributes.
    pub fn attributes(&self) -> BeatmapAttributesBuilder {
        BeatmapAttributesBuilder::new().map(self)
    }

    /// Create a difficulty calculator for this [`Beatmap`].
    pub const fn difficulty(&self) -> Difficulty<'_> {
        Difficulty::new(self)
    }

    /// Create a performance calculator for this [`Beatmap`].
    pub fn performance(&self) -> Performance<'_> {
        Performance::new(self)
    }

    /// The maximum achievable combo, counting every slider tick, repeat, and
    /// tail on top of each placement itself.
    pub fn max_combo(&self) -> u32 {
        self.placements.iter().map(Placement::max_combo).sum()
    }

    /// The amount of circles.
    pub fn n_circles(&self) -> u32 {
        self.placements.iter().filter(|h| h.is_circle()).count() as u32
    }

    /// The amount of sliders.
    pub fn n_sliders(&self) -> u32 {
        self.placements.iter().filter(|h| h.is_slider()).count() as u32
    }

    /// The amount of spinners.
    pub fn n_spinners(&self) -> u32 {
        self.placements.iter().filter(|h| h.is_spinner()).count() as u32
    }

    /// Check whether placements appear too suspicious for further calculation.
    ///
    /// Sometimes a [`Beatmap`] isn't created for gameplay but rather to test
    /// the limits of the game itself. Difficulty- and/or performance
    /// calculation should likely be avoided on these maps due to potential
    /// performance issues.
    pub fn check_suspicion(&self) -> Result<(), TooSuspicious> {
        match TooSuspicious::new(self) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}

impl Default for Beatmap {
    fn default() -> Self {
        Self {
            ar: 5.0,
            cs: 5.0,
            hp: 5.0,
            od: 5.0,
            placements: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{
        placement::{NestedKind, NestedSample, Placement, SlidingPath},
        pos::Pos2,
    };

    use super::Beatmap;

    #[test]
    fn max_combo_counts_nested() {
        let path = SlidingPath {
            duration: 300.0,
            repeats: 1,
            velocity: 1.0,
            nested: vec![
                NestedSample::new(250.0, Pos2::new(100.0, 0.0), NestedKind::Repeat),
                NestedSample::new(400.0, Pos2::new(0.0, 0.0), NestedKind::Tail),
            ],
        };

        let map = Beatmap::new(vec![
            Placement::circle(0.0, Pos2::zero()),
            Placement::slider(100.0, Pos2::zero(), path),
            Placement::spinner(1000.0, Pos2::new(256.0, 192.0), 500.0),
        ]);

        assert_eq!(map.max_combo(), 5);
        assert_eq!(map.n_circles(), 1);
        assert_eq!(map.n_sliders(), 1);
        assert_eq!(map.n_spinners(), 1);
    }
}
