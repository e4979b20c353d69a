use serde::{Deserialize, Serialize};

use crate::localization::types::LocalizerError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = LocalizerError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(LocalizerError::UnknownVocabulary {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

// Labels are matched exactly, including the typographic apostrophe in Horner’s.
str_enum!(Symptom {
    RightHemiparesisEqual => "Right hemiparesis (Upper & Lower equally)",
    RightHemiparesisArm => "Right hemiparesis (Upper> Lower)",
    RightHemiparesisLeg => "Right hemiparesis (Lower> Upper)",
    LeftHemiparesisEqual => "Left hemiparesis (Upper & Lower equally)",
    LeftHemiparesisArm => "Left hemiparesis (Upper> Lower)",
    LeftHemiparesisLeg => "Left hemiparesis (Lower> Upper)",
    Aphasia => "Aphasia",
    Neglect => "Neglect",
    FacialPalsyComplete => "Facial palsy (Upper & Lower face equally affected)",
    FacialPalsyLowerFace => "Facial palsy (Lower face only affected)",
    Vertigo => "Vertigo",
    Dysarthria => "Dysarthria",
    PartialSeizure => "Partial seizure",
    GeneralizedSeizure => "Generalized seizure",
    EmotionalDisturbances => "Emotional disturbances",
    HomonymousHemianopia => "Vision loss (Homonymous Hemianopia)",
    MonocularVisionLoss => "Vision loss (Unilateral - optic nerve related)",
    LimbAtaxia => "Ataxia (Limb)",
    TruncalAtaxia => "Ataxia (Truncal)",
    HemibodySensoryLoss => "Sensory loss (Hemibody, all modalities)",
    DissociatedSensoryLoss => "Sensory loss (Dissociated - e.g., pain/temp affected, light touch spared)",
    TongueDeviation => "Tongue deviation",
    HornerSyndrome => "Horner’s syndrome",
    GazePalsyToward => "Gaze palsy (Conjugate, toward lesion)",
    GazePalsyAway => "Gaze palsy (Conjugate, away from lesion)",
    InternuclearOphthalmoplegia => "Gaze palsy (Internuclear Ophthalmoplegia - INO)",
});

str_enum!(Side {
    Left => "Left",
    Right => "Right",
});

impl Side {
    pub fn opposite(&self) -> Side {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl Symptom {
    /// Body side of a hemiparesis pattern, `None` for every other symptom.
    pub fn hemiparesis_side(&self) -> Option<Side> {
        match self {
            Self::RightHemiparesisEqual | Self::RightHemiparesisArm | Self::RightHemiparesisLeg => {
                Some(Side::Right)
            }
            Self::LeftHemiparesisEqual | Self::LeftHemiparesisArm | Self::LeftHemiparesisLeg => {
                Some(Side::Left)
            }
            _ => None,
        }
    }
}
