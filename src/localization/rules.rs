//! Per-symptom localization rules.
//!
//! Rules are data: an ordered list of [`RuleGroup`]s, each either a single
//! independent rule or a first-match chain of mutually exclusive variants
//! (e.g. the three hemiparesis patterns for one side). Evaluation order is
//! the list order, which matters for rules whose imaging decision reads the
//! lesions accumulated so far.

use crate::models::{Side, Symptom};

use super::types::EvaluationContext;

/// How a rule affects the imaging recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagingEffect {
    Always,
    /// Raised only when the severity scale was triggered.
    IfSeverityTriggered,
    /// Raised when a brainstem site is already localized or severity triggered.
    IfBrainstemOrSeverity,
}

/// Raw lesion/vessel strings and notes emitted by one rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub lesions: &'static [&'static str],
    pub vessels: &'static [&'static str],
    pub notes: &'static [&'static str],
}

impl Contribution {
    fn apply(&self, ctx: &mut EvaluationContext) {
        for lesion in self.lesions {
            ctx.lesions.add(lesion);
        }
        for vessel in self.vessels {
            ctx.vessels.add(vessel);
        }
        for note in self.notes {
            ctx.add_note(note);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Findings {
    Fixed(Contribution),
    /// Laterality taken from the accompanying hemiparesis; `unknown` when
    /// no hemiparesis was selected.
    ByHemiparesisSide {
        right: Contribution,
        left: Contribution,
        unknown: Contribution,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymptomRule {
    pub symptom: Symptom,
    pub findings: Findings,
    pub imaging: ImagingEffect,
}

impl SymptomRule {
    pub fn apply(&self, ctx: &mut EvaluationContext) {
        let contribution = match &self.findings {
            Findings::Fixed(c) => c,
            Findings::ByHemiparesisSide { right, left, unknown } => match ctx.hemiparesis_side() {
                Some(Side::Right) => right,
                Some(Side::Left) => left,
                None => unknown,
            },
        };
        contribution.apply(ctx);

        match self.imaging {
            ImagingEffect::Always => ctx.recommend_imaging(),
            ImagingEffect::IfSeverityTriggered => {
                let triggered = ctx.severity_triggered;
                ctx.recommend_imaging_if(triggered);
            }
            ImagingEffect::IfBrainstemOrSeverity => {
                let condition = ctx.lesions.mentions("Brainstem") || ctx.severity_triggered;
                ctx.recommend_imaging_if(condition);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleGroup {
    Single(SymptomRule),
    /// At most one rule fires: the first whose symptom is present.
    FirstMatch {
        name: &'static str,
        rules: Vec<SymptomRule>,
    },
}

impl RuleGroup {
    /// Apply the group; returns the symptom whose rule fired.
    pub fn apply(&self, ctx: &mut EvaluationContext) -> Option<Symptom> {
        match self {
            Self::Single(rule) => {
                if !ctx.has(rule.symptom) {
                    return None;
                }
                rule.apply(ctx);
                Some(rule.symptom)
            }
            Self::FirstMatch { name, rules } => {
                let mut present = rules.iter().filter(|r| ctx.has(r.symptom));
                let rule = present.next()?;
                let shadowed: Vec<&str> = present.map(|r| r.symptom.as_str()).collect();
                if !shadowed.is_empty() {
                    tracing::debug!(
                        chain = *name,
                        fired = rule.symptom.as_str(),
                        shadowed = ?shadowed,
                        "Exclusive variants selected together, lower-priority ignored"
                    );
                }
                rule.apply(ctx);
                Some(rule.symptom)
            }
        }
    }

    pub fn symptoms(&self) -> Vec<Symptom> {
        match self {
            Self::Single(rule) => vec![rule.symptom],
            Self::FirstMatch { rules, .. } => rules.iter().map(|r| r.symptom).collect(),
        }
    }
}

const fn fixed(
    lesions: &'static [&'static str],
    vessels: &'static [&'static str],
    notes: &'static [&'static str],
) -> Findings {
    Findings::Fixed(Contribution {
        lesions,
        vessels,
        notes,
    })
}

const fn rule(symptom: Symptom, findings: Findings, imaging: ImagingEffect) -> SymptomRule {
    SymptomRule {
        symptom,
        findings,
        imaging,
    }
}

// ── Notes ───────────────────────────────────────────────────

pub const NOTE_FACIAL_COMPLETE: &str =
    "For upper & lower face palsy, consider Bell's palsy (peripheral) vs. brainstem stroke/lesion.";
pub const NOTE_FACIAL_LOWER_ISOLATED: &str =
    "Lower face palsy without hemiparesis might suggest a focal cortical lesion or lacunar infarct.";
pub const NOTE_VERTIGO: &str = "Vertigo can be peripheral (inner ear) or central (brainstem/cerebellum). Consider other brainstem signs for central origin.";
pub const NOTE_TRUNCAL_ATAXIA: &str = "Truncal ataxia is highly suggestive of cerebellar vermis involvement, often associated with gait instability.";
pub const NOTE_DYSARTHRIA: &str = "Dysarthria is a non-localizing sign alone, but in combination with other deficits, it helps pinpoint the lesion.";
pub const NOTE_PARTIAL_SEIZURE: &str =
    "Partial seizures require localization of the seizure focus. Imaging is crucial.";
pub const NOTE_GENERALIZED_SEIZURE: &str = "Generalized seizures often don't have a single focal lesion on imaging but can be associated with metabolic, toxic, or genetic causes. Imaging may still be useful to rule out structural causes.";
pub const NOTE_EMOTIONAL: &str = "Emotional disturbances are highly non-specific and can result from various neurological or psychiatric conditions. Lesion localization is challenging without other signs.";
pub const NOTE_HEMIANOPIA: &str = "For Homonymous Hemianopia, consider the contralateral lesion. E.g., Left HH -> Right Occipital/Optic Radiation.";
pub const NOTE_MONOCULAR: &str = "Unilateral vision loss can also be ocular in origin. Neurological causes usually involve optic nerve or chiasm.";
pub const NOTE_DISSOCIATED: &str =
    "Dissociated sensory loss strongly suggests a brainstem or spinal cord lesion.";
pub const NOTE_HORNER: &str = "Horner's syndrome requires careful evaluation for the level of sympathetic chain involvement (central, preganglionic, postganglionic).";

// ── Rule table ──────────────────────────────────────────────

/// The full rule set in evaluation order.
pub fn default_rules() -> Vec<RuleGroup> {
    use ImagingEffect::*;
    use Symptom::*;

    vec![
        // Right-sided weakness localizes to the left hemisphere.
        RuleGroup::FirstMatch {
            name: "right_hemiparesis",
            rules: vec![
                rule(
                    RightHemiparesisEqual,
                    fixed(
                        &[
                            "Left internal capsule (Subcortical)",
                            "Left Thalamus (if sensory also affected)",
                        ],
                        &[
                            "Lenticulostriate arteries (MCA deep branches)",
                            "Thalamoperforating arteries (PCA deep branches)",
                        ],
                        &[],
                    ),
                    Always,
                ),
                rule(
                    RightHemiparesisArm,
                    fixed(
                        &["Left motor cortex (Middle Cerebral Artery territory)"],
                        &["Left Middle Cerebral Artery (MCA) - Superior Division"],
                        &[],
                    ),
                    Always,
                ),
                rule(
                    RightHemiparesisLeg,
                    fixed(
                        &["Left motor cortex (Anterior Cerebral Artery territory)"],
                        &["Left Anterior Cerebral Artery (ACA)"],
                        &[],
                    ),
                    Always,
                ),
            ],
        },
        RuleGroup::FirstMatch {
            name: "left_hemiparesis",
            rules: vec![
                rule(
                    LeftHemiparesisEqual,
                    fixed(
                        &[
                            "Right internal capsule (Subcortical)",
                            "Right Thalamus (if sensory also affected)",
                        ],
                        &[
                            "Lenticulostriate arteries (MCA deep branches)",
                            "Thalamoperforating arteries (PCA deep branches)",
                        ],
                        &[],
                    ),
                    Always,
                ),
                rule(
                    LeftHemiparesisArm,
                    fixed(
                        &["Right motor cortex (Middle Cerebral Artery territory)"],
                        &["Right Middle Cerebral Artery (MCA) - Superior Division"],
                        &[],
                    ),
                    Always,
                ),
                rule(
                    LeftHemiparesisLeg,
                    fixed(
                        &["Right motor cortex (Anterior Cerebral Artery territory)"],
                        &["Right Anterior Cerebral Artery (ACA)"],
                        &[],
                    ),
                    Always,
                ),
            ],
        },
        RuleGroup::Single(rule(
            Aphasia,
            fixed(
                &[
                    "Left frontal lobe (Broca's area) - Expressive Aphasia",
                    "Left temporal lobe (Wernicke's area) - Receptive Aphasia",
                    "Left parietal lobe (Conduction Aphasia)",
                ],
                &["Left MCA - Superior or Inferior Division (depending on type)"],
                &[],
            ),
            Always,
        )),
        RuleGroup::Single(rule(
            Neglect,
            fixed(
                &[
                    "Right parietal lobe",
                    "Right frontal lobe",
                    "Right thalamus",
                    "Right subcortical white matter",
                ],
                &["Right Middle Cerebral Artery (MCA) - Inferior Division"],
                &[],
            ),
            Always,
        )),
        RuleGroup::FirstMatch {
            name: "facial_palsy",
            rules: vec![
                rule(
                    FacialPalsyComplete,
                    fixed(
                        &[
                            "Ipsilateral Pons (Facial nerve nucleus or exiting fascicles)",
                            "Ipsilateral Facial Nerve (Peripheral palsy)",
                        ],
                        &[
                            "Anterior Inferior Cerebellar Artery (AICA)",
                            "Basilar Artery branches (pontine arteries)",
                            "External Carotid Artery branches (peripheral facial nerve supply)",
                        ],
                        &[NOTE_FACIAL_COMPLETE],
                    ),
                    IfSeverityTriggered,
                ),
                rule(
                    FacialPalsyLowerFace,
                    Findings::ByHemiparesisSide {
                        right: Contribution {
                            lesions: &[
                                "Left precentral gyrus (Lower face motor cortex)",
                                "Left internal capsule (Corticobulbar tract)",
                            ],
                            vessels: &[
                                "Left Middle Cerebral Artery (MCA) - Superior Division (cortical)",
                                "Lenticulostriate arteries (subcortical)",
                            ],
                            notes: &[],
                        },
                        left: Contribution {
                            lesions: &[
                                "Right precentral gyrus (Lower face motor cortex)",
                                "Right internal capsule (Corticobulbar tract)",
                            ],
                            vessels: &[
                                "Right Middle Cerebral Artery (MCA) - Superior Division (cortical)",
                                "Lenticulostriate arteries (subcortical)",
                            ],
                            notes: &[],
                        },
                        unknown: Contribution {
                            lesions: &["Contralateral motor cortex or corticobulbar tract"],
                            vessels: &[
                                "Contralateral Middle Cerebral Artery (MCA) branches",
                                "Lenticulostriate arteries",
                            ],
                            notes: &[NOTE_FACIAL_LOWER_ISOLATED],
                        },
                    },
                    Always,
                ),
            ],
        },
        RuleGroup::Single(rule(
            Vertigo,
            fixed(
                &[
                    "Cerebellum (Vestibulocerebellum)",
                    "Brainstem (Vestibular nuclei - e.g., lateral medulla for Wallenberg's)",
                ],
                &[
                    "PICA for lateral medulla (Wallenberg's)",
                    "AICA for cerebellum/pons",
                    "Superior Cerebellar Artery (SCA) for cerebellum/pons",
                ],
                &[NOTE_VERTIGO],
            ),
            IfBrainstemOrSeverity,
        )),
        RuleGroup::Single(rule(
            LimbAtaxia,
            fixed(
                &[
                    "Ipsilateral Cerebellar hemisphere",
                    "Cerebellar peduncles",
                    "Brainstem (cerebellar connections)",
                ],
                &[
                    "Superior Cerebellar Artery (SCA)",
                    "AICA",
                    "PICA",
                ],
                &[],
            ),
            Always,
        )),
        RuleGroup::Single(rule(
            TruncalAtaxia,
            fixed(
                &["Cerebellar vermis"],
                &["Superior Cerebellar Artery (SCA)", "PICA (inferior vermis)"],
                &[NOTE_TRUNCAL_ATAXIA],
            ),
            Always,
        )),
        RuleGroup::Single(rule(
            Dysarthria,
            fixed(
                &[
                    "Pons (Corticobulbar tracts, lower cranial nerves)",
                    "Cerebellum",
                    "Internal capsule",
                    "Motor cortex (Bilateral lesions)",
                ],
                &[
                    "Basilar Artery branches (pontine arteries)",
                    "Lenticulostriate arteries",
                ],
                &[NOTE_DYSARTHRIA],
            ),
            IfSeverityTriggered,
        )),
        RuleGroup::Single(rule(
            PartialSeizure,
            fixed(
                &["Focal cortical lesion (seizure focus, any lobe)"],
                &[],
                &[NOTE_PARTIAL_SEIZURE],
            ),
            Always,
        )),
        RuleGroup::Single(rule(
            GeneralizedSeizure,
            fixed(
                &["Diffuse cortical dysfunction"],
                &[],
                &[NOTE_GENERALIZED_SEIZURE],
            ),
            Always,
        )),
        RuleGroup::Single(rule(
            EmotionalDisturbances,
            fixed(
                &[
                    "Frontal lobe (Orbitofrontal, medial prefrontal cortex)",
                    "Temporal lobe (Amygdala, hippocampus)",
                    "Limbic system structures",
                ],
                &[
                    "Anterior Cerebral Artery (ACA) branches (for frontal lobe)",
                    "Middle Cerebral Artery (MCA) branches (for temporal lobe)",
                ],
                &[NOTE_EMOTIONAL],
            ),
            IfSeverityTriggered,
        )),
        RuleGroup::FirstMatch {
            name: "vision_loss",
            rules: vec![
                rule(
                    HomonymousHemianopia,
                    fixed(
                        &[
                            "Contralateral Occipital lobe (Visual cortex)",
                            "Contralateral Optic radiation (retrochiasmal pathway)",
                            "Contralateral Thalamus (Lateral Geniculate Nucleus)",
                        ],
                        &[
                            "Posterior Cerebral Artery (PCA) - Calcarine branch (occipital cortex)",
                            "Middle Cerebral Artery (MCA) - deep branches (optic radiations)",
                        ],
                        &[NOTE_HEMIANOPIA],
                    ),
                    Always,
                ),
                rule(
                    MonocularVisionLoss,
                    fixed(
                        &["Ipsilateral Optic nerve", "Optic Chiasm"],
                        &[
                            "Ophthalmic Artery (branch of Internal Carotid Artery)",
                            "Anterior Cerebral Artery (ACA) branches (optic chiasm)",
                        ],
                        &[NOTE_MONOCULAR],
                    ),
                    Always,
                ),
            ],
        },
        RuleGroup::FirstMatch {
            name: "sensory_loss",
            rules: vec![
                rule(
                    HemibodySensoryLoss,
                    fixed(
                        &[
                            "Contralateral Parietal lobe (Somatosensory cortex)",
                            "Contralateral Thalamus (VPL/VPM nucleus)",
                            "Contralateral Internal capsule (Sensory tracts)",
                        ],
                        &[
                            "Middle Cerebral Artery (MCA) - Parietal branches",
                            "Thalamoperforating arteries (from PCA)",
                            "Lenticulostriate arteries (from MCA)",
                            "Anterior Choroidal Artery (from ICA)",
                        ],
                        &[],
                    ),
                    Always,
                ),
                rule(
                    DissociatedSensoryLoss,
                    fixed(
                        &[
                            "Brainstem (Lateral Medulla for Wallenberg's syndrome - ipsilateral face/contralateral body pain/temp)",
                            "Spinal Cord (Syringomyelia, Brown-Séquard - level dependent)",
                        ],
                        &[
                            "Posterior Inferior Cerebellar Artery (PICA) for lateral medulla",
                            "Spinal Arteries (Anterior or Posterior Spinal Arteries)",
                        ],
                        &[NOTE_DISSOCIATED],
                    ),
                    Always,
                ),
            ],
        },
        RuleGroup::Single(rule(
            TongueDeviation,
            fixed(
                &[
                    "Ipsilateral Medulla (Hypoglossal nucleus - CN XII)",
                    "Ipsilateral Hypoglossal Nerve (Peripheral)",
                ],
                &[],
                &[],
            ),
            IfSeverityTriggered,
        )),
        RuleGroup::Single(rule(
            HornerSyndrome,
            fixed(
                &[
                    "Ipsilateral Lateral Medulla (Wallenberg's syndrome)",
                    "Ipsilateral Pons",
                    "Hypothalamospinal tract (anywhere from hypothalamus down to T1)",
                    "Carotid Artery dissection (sympathetic chain involvement)",
                ],
                &[
                    "Posterior Inferior Cerebellar Artery (PICA) for lateral medulla",
                    "Basilar Artery branches (pontine arteries) for pons",
                    "Carotid Artery (for dissection)",
                ],
                &[NOTE_HORNER],
            ),
            Always,
        )),
        RuleGroup::FirstMatch {
            name: "gaze_palsy",
            rules: vec![
                rule(
                    GazePalsyToward,
                    fixed(
                        &[
                            "Ipsilateral Frontal eye field",
                            "Ipsilateral Pontine gaze center (PPRF)",
                        ],
                        &[
                            "Middle Cerebral Artery (MCA) - Superior Division (frontal eye field)",
                            "Basilar Artery branches (pontine arteries) for PPRF",
                        ],
                        &[],
                    ),
                    Always,
                ),
                rule(
                    GazePalsyAway,
                    fixed(
                        &[
                            "Contralateral Frontal eye field (Irritative lesion)",
                            "Basal Ganglia/Thalamus (less common for conjugate deviation)",
                        ],
                        &[
                            "Contralateral Middle Cerebral Artery (MCA) - Superior Division",
                            "Lenticulostriate arteries (from MCA)",
                            "Thalamoperforating arteries (from PCA)",
                        ],
                        &[],
                    ),
                    Always,
                ),
                rule(
                    InternuclearOphthalmoplegia,
                    fixed(
                        &["Medial Longitudinal Fasciculus (MLF)", "Pons (MLF, paramedian)"],
                        &["Basilar Artery branches (pontine arteries, e.g., paramedian branches)"],
                        &[],
                    ),
                    Always,
                ),
            ],
        },
    ]
}
