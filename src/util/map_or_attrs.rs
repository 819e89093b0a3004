use crate::{
    attributes::{DifficultyAttributes, PerformanceAttributes},
    model::beatmap::Beatmap,
};

#[derive(Clone, Debug, PartialEq)]
pub enum MapOrAttrs<'map> {
    Map(&'map Beatmap),
    Attrs(DifficultyAttributes),
}

impl MapOrAttrs<'_> {
    /// Return a mutable reference to the attributes.
    ///
    /// If `self` is of variant `Map`, store `attrs` in `self`, and return a
    /// mutable reference to it.
    pub fn insert_attrs(&mut self, attrs: DifficultyAttributes) -> &mut DifficultyAttributes {
        if let Self::Map(_) = self {
            *self = Self::Attrs(attrs);
        }

        match self {
            Self::Attrs(attrs) => attrs,
            Self::Map(_) => unreachable!(),
        }
    }
}

impl<'map> From<&'map Beatmap> for MapOrAttrs<'map> {
    fn from(map: &'map Beatmap) -> Self {
        Self::Map(map)
    }
}

impl From<DifficultyAttributes> for MapOrAttrs<'_> {
    fn from(attrs: DifficultyAttributes) -> Self {
        Self::Attrs(attrs)
    }
}

impl From<PerformanceAttributes> for MapOrAttrs<'_> {
    fn from(attrs: PerformanceAttributes) -> Self {
        Self::Attrs(attrs.difficulty)
    }
}
