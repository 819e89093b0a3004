#![allow(unused)]

use std::sync::Once;

use skillset_pp::{
    model::{
        placement::{NestedKind, NestedSample, Placement, SlidingPath},
        pos::Pos2,
    },
    Beatmap,
};

pub use self::mods::*;

/// Bit values for mods
mod mods {
    pub const NM: u32 = 0;
    pub const NF: u32 = 1 << 0;
    pub const EZ: u32 = 1 << 1;
    pub const HD: u32 = 1 << 3;
    pub const HR: u32 = 1 << 4;
    pub const DT: u32 = 1 << 6;
    pub const RX: u32 = 1 << 7;
    pub const HT: u32 = 1 << 8;
    pub const FL: u32 = 1 << 10;
    pub const AUTO: u32 = 1 << 11;
    pub const SO: u32 = 1 << 12;
}

static INIT: Once = Once::new();

/// Install a subscriber so calculations log through the test writer.
///
/// The level is taken from `RUST_LOG` and defaults to `warn`.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Circles on a single position, `interval` ms apart.
pub fn stacked_taps(n: usize, interval: f64) -> Beatmap {
    let placements = (0..n)
        .map(|i| Placement::circle(i as f64 * interval, Pos2::new(256.0, 192.0)))
        .collect();

    Beatmap::new(placements).ar(9.0).od(8.0).cs(4.0)
}

/// Circles alternating between both ends of the playfield.
pub fn jumps(n: usize, interval: f64) -> Beatmap {
    let placements = (0..n)
        .map(|i| {
            let x = if i % 2 == 0 { 64.0 } else { 448.0 };
            let y = 192.0 + 40.0 * ((i / 2) % 3) as f32;

            Placement::circle(i as f64 * interval, Pos2::new(x, y))
        })
        .collect();

    Beatmap::new(placements).ar(9.3).od(8.5).cs(4.0)
}

/// Circles along a circular path with varying spacing.
pub fn mixed(n: usize) -> Beatmap {
    let mut time = 0.0;

    let placements = (0..n)
        .map(|i| {
            let angle = i as f64 * 0.9;
            let radius = if (i / 16) % 2 == 0 { 60.0 } else { 170.0 };
            let x = 256.0 + (radius * angle.cos()) as f32;
            let y = 192.0 + (radius * angle.sin()) as f32;

            let placement = Placement::circle(time, Pos2::new(x, y));
            time += if (i / 8) % 3 == 0 { 120.0 } else { 240.0 };

            placement
        })
        .collect();

    Beatmap::new(placements).ar(9.0).od(8.0).cs(4.2)
}

/// Sliders with a tick and a tail, separated by short gaps.
pub fn sliders(n: usize) -> Beatmap {
    const DURATION: f64 = 300.0;
    const GAP: f64 = 150.0;

    let placements = (0..n)
        .map(|i| {
            let start = i as f64 * (DURATION + GAP);
            let (from, to) = if i % 2 == 0 {
                (Pos2::new(100.0, 100.0), Pos2::new(300.0, 100.0))
            } else {
                (Pos2::new(300.0, 300.0), Pos2::new(100.0, 300.0))
            };

            let mid = Pos2::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);

            let path = SlidingPath {
                duration: DURATION,
                repeats: 0,
                velocity: 200.0 / DURATION,
                nested: vec![
                    NestedSample::new(start + DURATION / 2.0, mid, NestedKind::Tick),
                    NestedSample::new(start + DURATION, to, NestedKind::Tail),
                ],
            };

            Placement::slider(start, from, path)
        })
        .collect();

    Beatmap::new(placements).ar(8.5).od(7.0).cs(4.0)
}

/// Wide jumps followed by calm sliders worth ten combo each.
pub fn jumps_then_sliders(n_jumps: usize, n_sliders: usize) -> Beatmap {
    const JUMP_INTERVAL: f64 = 200.0;
    const DURATION: f64 = 900.0;
    const GAP: f64 = 300.0;
    const TICKS: usize = 8;

    let mut placements: Vec<_> = jumps(n_jumps, JUMP_INTERVAL).placements;
    let offset = n_jumps as f64 * JUMP_INTERVAL + GAP;

    placements.extend((0..n_sliders).map(|i| {
        let start = offset + i as f64 * (DURATION + GAP);
        let from = Pos2::new(236.0, 192.0);
        let to = Pos2::new(276.0, 192.0);

        let mut nested: Vec<_> = (1..=TICKS)
            .map(|tick| {
                let progress = tick as f32 / (TICKS + 1) as f32;
                let time = start + DURATION * f64::from(progress);
                let pos = Pos2::new(from.x + (to.x - from.x) * progress, from.y);

                NestedSample::new(time, pos, NestedKind::Tick)
            })
            .collect();

        nested.push(NestedSample::new(start + DURATION, to, NestedKind::Tail));

        let path = SlidingPath {
            duration: DURATION,
            repeats: 0,
            velocity: 40.0 / DURATION,
            nested,
        };

        Placement::slider(start, from, path)
    }));

    Beatmap::new(placements).ar(9.3).od(8.5).cs(4.0)
}
