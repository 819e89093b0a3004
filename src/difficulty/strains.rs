use super::skills::{strain::StrainEvaluator, SkillKind, SkillOutput, Skills, SECTION_LEN};

/// Strains of a single skill.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillStrains {
    /// Peak strain of each section.
    pub section_peaks: Vec<f64>,
    /// Strain right after each object.
    pub object_strains: Vec<f64>,
}

impl<E: StrainEvaluator> From<&SkillOutput<E>> for SkillStrains {
    fn from(output: &SkillOutput<E>) -> Self {
        Self {
            section_peaks: output.engine.section_peaks().to_vec(),
            object_strains: output.engine.object_strains().collect(),
        }
    }
}

/// The result of calculating the strains of a map.
///
/// Suitable to plot the difficulty of a map over time.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Strains {
    pub jump_aim: SkillStrains,
    pub stream_aim: SkillStrains,
    pub aim_control: SkillStrains,
    pub control: SkillStrains,
    pub stamina: SkillStrains,
    pub speed: SkillStrains,
    pub finger_control: SkillStrains,
    pub rhythm: SkillStrains,
    pub accuracy: SkillStrains,
}

impl Strains {
    /// Time between two section peaks in ms.
    pub const SECTION_LEN: f64 = SECTION_LEN;

    pub const fn get(&self, kind: SkillKind) -> &SkillStrains {
        match kind {
            SkillKind::JumpAim => &self.jump_aim,
            SkillKind::StreamAim => &self.stream_aim,
            SkillKind::AimControl => &self.aim_control,
            SkillKind::Control => &self.control,
            SkillKind::Stamina => &self.stamina,
            SkillKind::Speed => &self.speed,
            SkillKind::FingerControl => &self.finger_control,
            SkillKind::Rhythm => &self.rhythm,
            SkillKind::Accuracy => &self.accuracy,
        }
    }
}

impl From<&Skills> for Strains {
    fn from(skills: &Skills) -> Self {
        Self {
            jump_aim: (&skills.jump_aim).into(),
            stream_aim: (&skills.stream_aim).into(),
            aim_control: (&skills.aim_control).into(),
            control: (&skills.control).into(),
            stamina: (&skills.stamina).into(),
            speed: (&skills.speed).into(),
            finger_control: (&skills.finger_control).into(),
            rhythm: (&skills.rhythm).into(),
            accuracy: (&skills.accuracy).into(),
        }
    }
}
