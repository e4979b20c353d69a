//! Vascular syndrome matcher.
//!
//! Classic multi-symptom constellations checked in priority order. A match
//! adds the syndrome statement, its extra lesion sites, and forces imaging.

use serde::{Deserialize, Serialize};

use crate::models::Symptom;

use super::types::EvaluationContext;
use super::vessel::{
    self, LENTICULOSTRIATE, MCA_BRANCHES, MCA_INFERIOR, MCA_SUPERIOR, PCA, PICA, VERTEBRAL,
};

/// One recognisable constellation.
#[derive(Debug, PartialEq, Eq)]
pub struct SyndromeRule {
    pub name: &'static str,
    /// All must be present.
    pub required: &'static [Symptom],
    /// Statement reported to the user.
    pub description: &'static str,
    /// Canonical vessels this syndrome already accounts for.
    pub implicated_vessels: &'static [&'static str],
    pub extra_lesions: &'static [&'static str],
    pub notes: &'static [&'static str],
}

impl SyndromeRule {
    pub fn matches(&self, ctx: &EvaluationContext) -> bool {
        ctx.has_all(self.required)
    }

    /// Whether `candidate` is already implied by this syndrome, directly or
    /// through the specific/general table.
    pub fn accounts_for(&self, candidate: &str) -> bool {
        self.description.contains(candidate)
            || self
                .implicated_vessels
                .iter()
                .any(|implicated| vessel::related(implicated, candidate))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyndromeMatchMode {
    /// Stop at the first matching syndrome.
    #[default]
    FirstMatch,
    /// Report every matching syndrome.
    AllMatches,
}

pub const NOTE_MCA_OR_PCA: &str = "This combination could indicate a large MCA stroke or a complex PCA stroke affecting language areas.";

/// Syndromes in priority order.
pub static SYNDROMES: &[SyndromeRule] = &[
    SyndromeRule {
        name: "left_mca_superior",
        required: &[Symptom::RightHemiparesisArm, Symptom::Aphasia],
        description: "Left Middle Cerebral Artery (MCA) - Superior Division (classic for Broca's aphasia and right arm/face weakness)",
        implicated_vessels: &[MCA_SUPERIOR],
        extra_lesions: &["Left Frontal Lobe", "Left Parietal Lobe"],
        notes: &[],
    },
    SyndromeRule {
        name: "right_mca_inferior",
        required: &[Symptom::LeftHemiparesisArm, Symptom::Neglect],
        description: "Right Middle Cerebral Artery (MCA) - Inferior Division (classic for neglect and left arm/face weakness)",
        implicated_vessels: &[MCA_INFERIOR],
        extra_lesions: &["Right Parietal Lobe", "Right Temporal Lobe"],
        notes: &[],
    },
    SyndromeRule {
        name: "mca_or_pca_with_aphasia",
        required: &[Symptom::HomonymousHemianopia, Symptom::Aphasia],
        description: "Left Middle Cerebral Artery (MCA) - complete occlusion or Posterior Cerebral Artery (PCA) - with cortical aphasia",
        implicated_vessels: &[MCA_BRANCHES, PCA],
        extra_lesions: &[],
        notes: &[NOTE_MCA_OR_PCA],
    },
    SyndromeRule {
        name: "lateral_medullary",
        required: &[
            Symptom::Vertigo,
            Symptom::Dysarthria,
            Symptom::FacialPalsyComplete,
            Symptom::DissociatedSensoryLoss,
        ],
        description: "Vertebrobasilar System - Posterior Inferior Cerebellar Artery (PICA) - for Lateral Medullary (Wallenberg's) Syndrome",
        implicated_vessels: &[PICA, VERTEBRAL],
        extra_lesions: &["Ipsilateral Lateral Medulla"],
        notes: &[],
    },
    SyndromeRule {
        name: "left_lacunar",
        required: &[
            Symptom::RightHemiparesisEqual,
            Symptom::FacialPalsyLowerFace,
            Symptom::HemibodySensoryLoss,
        ],
        description: "Left Lenticulostriate arteries (deep branches of MCA) - for Lacunar Syndrome (Pure Motor or Sensorimotor Stroke)",
        implicated_vessels: &[LENTICULOSTRIATE],
        extra_lesions: &["Left Internal Capsule", "Left Basal Ganglia"],
        notes: &[],
    },
    SyndromeRule {
        name: "right_lacunar",
        required: &[
            Symptom::LeftHemiparesisEqual,
            Symptom::FacialPalsyLowerFace,
            Symptom::HemibodySensoryLoss,
        ],
        description: "Right Lenticulostriate arteries (deep branches of MCA) - for Lacunar Syndrome (Pure Motor or Sensorimotor Stroke)",
        implicated_vessels: &[LENTICULOSTRIATE],
        extra_lesions: &["Right Internal Capsule", "Right Basal Ganglia"],
        notes: &[],
    },
];

/// Record matching syndromes on the context. Returns how many matched.
pub fn match_syndromes(ctx: &mut EvaluationContext, mode: SyndromeMatchMode) -> usize {
    let mut matched = 0;

    for syndrome in SYNDROMES {
        if !syndrome.matches(ctx) {
            continue;
        }

        tracing::debug!(syndrome = syndrome.name, "Vascular syndrome matched");
        ctx.syndromes.push(syndrome);
        for lesion in syndrome.extra_lesions {
            ctx.lesions.add(lesion);
        }
        for note in syndrome.notes {
            ctx.add_note(note);
        }
        ctx.recommend_imaging();
        matched += 1;

        if mode == SyndromeMatchMode::FirstMatch {
            break;
        }
    }

    matched
}

/// Vessels not already explained by any matched syndrome, sorted.
pub fn additional_vessels(ctx: &EvaluationContext) -> Vec<String> {
    ctx.vessels
        .iter()
        .filter(|v| !ctx.syndromes.iter().any(|s| s.accounts_for(v)))
        .cloned()
        .collect()
}
