//! Library to calculate multi-skill difficulty and performance attributes for
//! osu!standard-like placement sequences.
//!
//! ## Description
//!
//! A sequence of placements is turned into kinematic samples, each sample is
//! rated on nine skills through decaying strains, and the skill ratings are
//! combined into aim, tap, and accuracy groups and finally one star rating.
//!
//! Performance calculation reads the same skill ratings, adjusted for the
//! achieved combo and misses through sampled curves, and adds an accuracy
//! value derived from an estimated hit error deviation.
//!
//! ## Usage
//!
//! ```
//! use skillset_pp::{
//!     model::{placement::Placement, pos::Pos2},
//!     Beatmap,
//! };
//!
//! let placements = (0..400)
//!     .map(|i| {
//!         let x = 256.0 + 160.0 * (f64::from(i) * 0.7).cos() as f32;
//!         let y = 192.0 + 120.0 * (f64::from(i) * 0.7).sin() as f32;
//!
//!         Placement::circle(f64::from(i) * 180.0, Pos2::new(x, y))
//!     })
//!     .collect();
//!
//! let map = Beatmap::new(placements).ar(9.3).od(8.5).cs(4.0);
//!
//! // Calculate difficulty attributes
//! let diff_attrs = map.difficulty()
//!     .mods(8 + 16) // HDHR
//!     .calculate();
//!
//! let stars = diff_attrs.stars;
//!
//! // Calculate performance attributes
//! let perf_attrs = map.performance()
//!     // To speed up the calculation significantly, we can re-use the previous
//!     // attributes.
//!     // **Note** that this should only be done if the map, mods, and amount
//!     // of passed objects stay the same. Otherwise, the resulting attributes
//!     // will be incorrect.
//!     .attributes(diff_attrs)
//!     .mods(24) // HDHR, same as before
//!     .combo(350)
//!     .accuracy(98.2)
//!     .n_misses(2)
//!     .calculate();
//!
//! let pp = perf_attrs.pp();
//!
//! // Again, we re-use the previous attributes for maximum efficiency.
//! // This time we do it directly instead of through the map.
//! let max_pp = perf_attrs.performance()
//!     .mods(24) // Still the same
//!     .calculate()
//!     .pp();
//!
//! assert!(pp <= max_pp);
//! println!("Stars: {stars} | PP: {pp}/{max_pp}");
//! ```
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | No features |
//! | `serde` | Derive `Serialize` and `Deserialize` for attributes and input types | [`serde`]
//! | `parallel` | Evaluate the skills on separate threads | [`rayon`]
//!
//! ## Logging
//!
//! Calculations emit [`tracing`] events: `debug` for final results and
//! `trace` for per-skill values and the accuracy model. No subscriber is
//! installed by the library.
//!
//! [`serde`]: https://docs.rs/serde
//! [`rayon`]: https://docs.rs/rayon
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::struct_excessive_bools,
    clippy::match_same_arms,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::explicit_iter_loop,
    clippy::similar_names,
    clippy::cast_possible_wrap
)]

#[doc(inline)]
pub use self::{
    attributes::{DifficultyAttributes, PerformanceAttributes, SkillValues},
    difficulty::{
        skills::{curves::SkillCurves, SkillGroup, SkillKind},
        strains::{SkillStrains, Strains},
        Difficulty,
    },
    error::CalculateError,
    model::beatmap::{Beatmap, TooSuspicious},
    performance::{HitResultPriority, Performance},
    score_state::ScoreState,
    util::mods::Mods,
};

/// Difficulty and performance attributes.
pub mod attributes;

/// Difficulty calculation and the skills it consists of.
pub mod difficulty;

/// Types used in and around this crate.
pub mod model;

/// Performance calculation.
pub mod performance;

/// Combining skill ratings into star ratings.
pub mod rating;

mod error;
mod score_state;
mod util;
