use indexmap::IndexMap;

use crate::{
    difficulty::skills::{curves::SkillCurves, SkillKind},
    performance::Performance,
};

/// The result of a difficulty calculation.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DifficultyAttributes {
    /// The difficulty of the jump aim skill.
    pub jump_aim: f64,
    /// The difficulty of the stream aim skill.
    pub stream_aim: f64,
    /// The difficulty of the aim control skill.
    pub aim_control: f64,
    /// The difficulty of the control skill.
    pub control: f64,
    /// The difficulty of the stamina skill.
    pub stamina: f64,
    /// The difficulty of the speed skill.
    pub speed: f64,
    /// The difficulty of the finger control skill.
    pub finger_control: f64,
    /// The difficulty of the rhythm skill.
    pub rhythm: f64,
    /// The difficulty of the accuracy skill.
    pub accuracy: f64,
    pub jump_aim_curves: SkillCurves,
    pub aim_control_curves: SkillCurves,
    pub stamina_curves: SkillCurves,
    pub speed_curves: SkillCurves,
    pub finger_control_curves: SkillCurves,
    /// Rating step between entries of the miss curves.
    pub miss_star_rating_increment: f64,
    /// Star rating of the aim skills combined.
    pub aim_stars: f64,
    /// Star rating of the tap skills combined.
    pub tap_stars: f64,
    /// The approach rate.
    pub ar: f64,
    /// The overall difficulty
    pub od: f64,
    /// The circle size.
    pub cs: f64,
    /// The health drain rate.
    pub hp: f64,
    /// The clock rate the attributes were calculated with.
    pub clock_rate: f64,
    /// Time between an object appearing and having to be hit in ms.
    pub preempt: f64,
    /// Hit window for a 300 in ms.
    pub great_hit_window: f64,
    /// The amount of circles.
    pub n_circles: u32,
    /// The amount of sliders.
    pub n_sliders: u32,
    /// The amount of spinners.
    pub n_spinners: u32,
    /// The maximum combo.
    pub max_combo: u32,
    /// The final star rating
    pub stars: f64,
}

impl DifficultyAttributes {
    /// Return the maximum combo.
    pub const fn max_combo(&self) -> u32 {
        self.max_combo
    }

    /// Return the amount of hitobjects.
    pub const fn n_objects(&self) -> u32 {
        self.n_circles + self.n_sliders + self.n_spinners
    }

    /// The rating of a single skill.
    pub const fn rating(&self, kind: SkillKind) -> f64 {
        match kind {
            SkillKind::JumpAim => self.jump_aim,
            SkillKind::StreamAim => self.stream_aim,
            SkillKind::AimControl => self.aim_control,
            SkillKind::Control => self.control,
            SkillKind::Stamina => self.stamina,
            SkillKind::Speed => self.speed,
            SkillKind::FingerControl => self.finger_control,
            SkillKind::Rhythm => self.rhythm,
            SkillKind::Accuracy => self.accuracy,
        }
    }

    /// The combo and miss curves of a skill, if it keeps any.
    pub const fn curves(&self, kind: SkillKind) -> Option<&SkillCurves> {
        match kind {
            SkillKind::JumpAim => Some(&self.jump_aim_curves),
            SkillKind::AimControl => Some(&self.aim_control_curves),
            SkillKind::Stamina => Some(&self.stamina_curves),
            SkillKind::Speed => Some(&self.speed_curves),
            SkillKind::FingerControl => Some(&self.finger_control_curves),
            SkillKind::StreamAim | SkillKind::Control | SkillKind::Rhythm | SkillKind::Accuracy => {
                None
            }
        }
    }

    /// Returns a builder for performance calculation.
    pub fn performance<'a>(self) -> Performance<'a> {
        self.into()
    }
}

/// One value for each skill.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillValues {
    pub jump_aim: f64,
    pub stream_aim: f64,
    pub aim_control: f64,
    pub control: f64,
    pub stamina: f64,
    pub speed: f64,
    pub finger_control: f64,
    pub rhythm: f64,
    pub accuracy: f64,
}

impl SkillValues {
    pub const fn get(&self, kind: SkillKind) -> f64 {
        match kind {
            SkillKind::JumpAim => self.jump_aim,
            SkillKind::StreamAim => self.stream_aim,
            SkillKind::AimControl => self.aim_control,
            SkillKind::Control => self.control,
            SkillKind::Stamina => self.stamina,
            SkillKind::Speed => self.speed,
            SkillKind::FingerControl => self.finger_control,
            SkillKind::Rhythm => self.rhythm,
            SkillKind::Accuracy => self.accuracy,
        }
    }

    pub fn set(&mut self, kind: SkillKind, value: f64) {
        let slot = match kind {
            SkillKind::JumpAim => &mut self.jump_aim,
            SkillKind::StreamAim => &mut self.stream_aim,
            SkillKind::AimControl => &mut self.aim_control,
            SkillKind::Control => &mut self.control,
            SkillKind::Stamina => &mut self.stamina,
            SkillKind::Speed => &mut self.speed,
            SkillKind::FingerControl => &mut self.finger_control,
            SkillKind::Rhythm => &mut self.rhythm,
            SkillKind::Accuracy => &mut self.accuracy,
        };

        *slot = value;
    }

    /// Iterate over all skills in the order of [`SkillKind::ALL`].
    pub fn iter(&self) -> impl Iterator<Item = (SkillKind, f64)> + '_ {
        SkillKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

/// The result of a performance calculation.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PerformanceAttributes {
    /// The difficulty attributes that were used for the performance calculation
    pub difficulty: DifficultyAttributes,
    /// The final performance points.
    pub pp: f64,
    /// The aim portion of the final pp.
    pub pp_aim: f64,
    /// The tap portion of the final pp.
    pub pp_tap: f64,
    /// The accuracy portion of the final pp.
    pub pp_acc: f64,
    /// Performance points of each skill.
    ///
    /// The accuracy entry is the same as `pp_acc`.
    pub skill_pp: SkillValues,
    /// Skill ratings after accounting for combo and misses.
    pub effective_ratings: SkillValues,
    /// Estimated standard deviation of hit errors in ms, `None` if there were
    /// no objects to estimate it from.
    pub deviation: Option<f64>,
    /// Named intermediate values, if requested.
    pub breakdown: Option<IndexMap<&'static str, f64>>,
}

impl PerformanceAttributes {
    /// Return the star value.
    pub const fn stars(&self) -> f64 {
        self.difficulty.stars
    }

    /// Return the performance point value.
    pub const fn pp(&self) -> f64 {
        self.pp
    }

    /// Return the maximum combo of the map.
    pub const fn max_combo(&self) -> u32 {
        self.difficulty.max_combo
    }

    /// Return the amount of hitobjects.
    pub const fn n_objects(&self) -> u32 {
        self.difficulty.n_objects()
    }

    /// Returns a builder for performance calculation.
    pub fn performance<'a>(self) -> Performance<'a> {
        self.difficulty.into()
    }
}

impl From<PerformanceAttributes> for DifficultyAttributes {
    fn from(attributes: PerformanceAttributes) -> Self {
        attributes.difficulty
    }
}
