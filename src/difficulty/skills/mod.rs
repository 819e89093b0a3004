use std::fmt::{Display, Formatter, Result as FmtResult};

use self::{
    accuracy::Accuracy,
    aim_control::AimControl,
    control::Control,
    curves::SkillCurves,
    finger_control::FingerControl,
    jump_aim::JumpAim,
    rhythm::Rhythm,
    speed::Speed,
    stamina::Stamina,
    strain::{StrainEngine, StrainEvaluator},
    stream_aim::StreamAim,
};

use super::object::MotionSample;

pub mod accuracy;
pub mod aim_control;
pub mod control;
pub mod curves;
pub mod finger_control;
pub mod jump_aim;
pub mod rhythm;
pub mod speed;
pub mod stamina;
pub mod strain;
pub mod stream_aim;

/// Length of a strain section in clock-adjusted milliseconds.
pub const SECTION_LEN: f64 = 400.0;

/// The skill axes a sequence is rated on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    JumpAim,
    StreamAim,
    AimControl,
    Control,
    Stamina,
    Speed,
    FingerControl,
    Rhythm,
    Accuracy,
}

/// Which part of the rating tree a [`SkillKind`] belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SkillGroup {
    Aim,
    Tap,
    Accuracy,
}

impl SkillKind {
    pub const ALL: [Self; 9] = [
        Self::JumpAim,
        Self::StreamAim,
        Self::AimControl,
        Self::Control,
        Self::Stamina,
        Self::Speed,
        Self::FingerControl,
        Self::Rhythm,
        Self::Accuracy,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::JumpAim => "jump_aim",
            Self::StreamAim => "stream_aim",
            Self::AimControl => "aim_control",
            Self::Control => "control",
            Self::Stamina => "stamina",
            Self::Speed => "speed",
            Self::FingerControl => "finger_control",
            Self::Rhythm => "rhythm",
            Self::Accuracy => "accuracy",
        }
    }

    pub const fn group(self) -> SkillGroup {
        match self {
            Self::JumpAim | Self::StreamAim | Self::AimControl | Self::Control => SkillGroup::Aim,
            Self::Stamina | Self::Speed | Self::FingerControl | Self::Rhythm => SkillGroup::Tap,
            Self::Accuracy => SkillGroup::Accuracy,
        }
    }

    /// Whether the axis keeps combo and miss curves.
    pub const fn has_curves(self) -> bool {
        matches!(
            self,
            Self::JumpAim | Self::AimControl | Self::Stamina | Self::Speed | Self::FingerControl
        )
    }
}

impl Display for SkillKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

/// Strain decay for a slider sample, blending the base decay over the time
/// spent travelling with a faster decay driven by the travel velocity.
pub(crate) fn slider_adjusted_decay(curr: &MotionSample, base: f64) -> f64 {
    let strain_time = curr.strain_time;
    let travel_time = curr.travel_time;

    let travel_share = travel_time.min(strain_time - 30.0) / strain_time;
    let travel_decay =
        1.0 - (1.0 - base).powf((2.0 + curr.travel_dist / travel_time.max(30.0)).powi(3));
    let rest_share = (strain_time - travel_time).max(30.0) / strain_time;

    travel_share * travel_decay + rest_share * base
}

/// A finished [`StrainEngine`] and, if requested, its curves.
#[derive(Clone, Debug)]
pub struct SkillOutput<E: StrainEvaluator> {
    pub engine: StrainEngine<E>,
    pub curves: SkillCurves,
}

impl<E: StrainEvaluator> SkillOutput<E> {
    fn new(samples: &[MotionSample], running_combo: Option<&[u32]>) -> Self {
        let engine = process::<E>(samples);

        let curves = match running_combo {
            Some(running_combo) if E::KIND.has_curves() => {
                SkillCurves::new(&engine, running_combo)
            }
            _ => SkillCurves::default(),
        };

        Self { engine, curves }
    }

    pub fn rating(&self) -> f64 {
        self.engine.rating()
    }
}

impl<E: StrainEvaluator> Default for SkillOutput<E> {
    fn default() -> Self {
        Self {
            engine: StrainEngine::new(),
            curves: SkillCurves::default(),
        }
    }
}

/// Run a single axis over all samples.
fn process<E: StrainEvaluator>(samples: &[MotionSample]) -> StrainEngine<E> {
    let mut engine = StrainEngine::<E>::new();

    let Some(first) = samples.first() else {
        return engine;
    };

    // The first placement has no sample, its time is the first sample's
    // start minus its delta
    let first_time = first.start_time - first.delta_time;
    let mut current_section_end = (first_time / SECTION_LEN).ceil() * SECTION_LEN;

    // Handle the first sample separately to remove later if-branching
    while first.start_time > current_section_end {
        current_section_end += SECTION_LEN;
    }

    engine.process(first);

    for sample in samples.iter().skip(1) {
        while sample.start_time > current_section_end {
            engine.save_current_peak();
            engine.start_new_section_from(current_section_end);
            current_section_end += SECTION_LEN;
        }

        engine.process(sample);
    }

    engine.save_current_peak();

    engine
}

/// All skill axes after processing a sequence.
#[derive(Clone, Debug, Default)]
pub struct Skills {
    pub jump_aim: SkillOutput<JumpAim>,
    pub stream_aim: SkillOutput<StreamAim>,
    pub aim_control: SkillOutput<AimControl>,
    pub control: SkillOutput<Control>,
    pub stamina: SkillOutput<Stamina>,
    pub speed: SkillOutput<Speed>,
    pub finger_control: SkillOutput<FingerControl>,
    pub rhythm: SkillOutput<Rhythm>,
    pub accuracy: SkillOutput<Accuracy>,
}

impl Skills {
    /// Curves are only built if the running combo after each sample is
    /// given.
    #[cfg(not(feature = "parallel"))]
    pub fn process(samples: &[MotionSample], running_combo: Option<&[u32]>) -> Self {
        Self {
            jump_aim: SkillOutput::new(samples, running_combo),
            stream_aim: SkillOutput::new(samples, running_combo),
            aim_control: SkillOutput::new(samples, running_combo),
            control: SkillOutput::new(samples, running_combo),
            stamina: SkillOutput::new(samples, running_combo),
            speed: SkillOutput::new(samples, running_combo),
            finger_control: SkillOutput::new(samples, running_combo),
            rhythm: SkillOutput::new(samples, running_combo),
            accuracy: SkillOutput::new(samples, running_combo),
        }
    }

    /// Axes don't share any state so each one runs as its own task.
    #[cfg(feature = "parallel")]
    pub fn process(samples: &[MotionSample], running_combo: Option<&[u32]>) -> Self {
        let mut skills = Self::default();

        {
            let Self {
                jump_aim,
                stream_aim,
                aim_control,
                control,
                stamina,
                speed,
                finger_control,
                rhythm,
                accuracy,
            } = &mut skills;

            rayon::scope(|s| {
                s.spawn(|_| *jump_aim = SkillOutput::new(samples, running_combo));
                s.spawn(|_| *stream_aim = SkillOutput::new(samples, running_combo));
                s.spawn(|_| *aim_control = SkillOutput::new(samples, running_combo));
                s.spawn(|_| *control = SkillOutput::new(samples, running_combo));
                s.spawn(|_| *stamina = SkillOutput::new(samples, running_combo));
                s.spawn(|_| *speed = SkillOutput::new(samples, running_combo));
                s.spawn(|_| *finger_control = SkillOutput::new(samples, running_combo));
                s.spawn(|_| *rhythm = SkillOutput::new(samples, running_combo));
                s.spawn(|_| *accuracy = SkillOutput::new(samples, running_combo));
            });
        }

        skills
    }
}
