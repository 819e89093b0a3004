/// Beatmap related types.
pub mod beatmap;

/// Placements and their sliding paths.
pub mod placement;

/// Playfield positions.
pub mod pos;
