use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Side, Symptom};

use super::lesion::LesionSet;
use super::severity::ScaleItem;
use super::syndromes::SyndromeRule;
use super::vessel::VesselSet;

// ---------------------------------------------------------------------------
// EvaluationContext
// ---------------------------------------------------------------------------

/// Per-request accumulator threaded through every rule.
///
/// Built fresh from one input snapshot and consumed into an [`Assessment`].
/// The imaging flag can only be raised, never cleared.
#[derive(Debug)]
pub struct EvaluationContext {
    /// Recognised symptoms from the fixed vocabulary.
    pub symptoms: BTreeSet<Symptom>,
    /// Every submitted label, recognised or not (used for keyword matching).
    pub raw_labels: BTreeSet<String>,
    /// Trimmed chief complaint.
    pub chief_complaint: String,
    pub lesions: LesionSet,
    pub vessels: VesselSet,
    pub notes: BTreeSet<String>,
    pub syndromes: Vec<&'static SyndromeRule>,
    pub severity_triggered: bool,
    imaging: bool,
}

impl EvaluationContext {
    pub fn new(symptom_labels: &[&str], chief_complaint: &str) -> Self {
        let mut symptoms = BTreeSet::new();
        let mut raw_labels = BTreeSet::new();

        for label in symptom_labels {
            raw_labels.insert((*label).to_string());
            match label.parse::<Symptom>() {
                Ok(symptom) => {
                    symptoms.insert(symptom);
                }
                Err(_) => {
                    tracing::debug!(label = *label, "Unrecognised symptom label, no rule applies");
                }
            }
        }

        Self {
            symptoms,
            raw_labels,
            chief_complaint: chief_complaint.trim().to_string(),
            lesions: LesionSet::new(),
            vessels: VesselSet::new(),
            notes: BTreeSet::new(),
            syndromes: Vec::new(),
            severity_triggered: false,
            imaging: false,
        }
    }

    pub fn has(&self, symptom: Symptom) -> bool {
        self.symptoms.contains(&symptom)
    }

    pub fn has_all(&self, symptoms: &[Symptom]) -> bool {
        symptoms.iter().all(|s| self.symptoms.contains(s))
    }

    /// Side of the accompanying hemiparesis. Right is checked first.
    pub fn hemiparesis_side(&self) -> Option<Side> {
        let sides: Vec<Side> = self
            .symptoms
            .iter()
            .filter_map(Symptom::hemiparesis_side)
            .collect();
        [Side::Right, Side::Left]
            .into_iter()
            .find(|side| sides.contains(side))
    }

    pub fn add_note(&mut self, note: &str) {
        self.notes.insert(note.to_string());
    }

    pub fn recommend_imaging(&mut self) {
        self.imaging = true;
    }

    /// Raise the imaging flag when `condition` holds; otherwise leave it as is.
    pub fn recommend_imaging_if(&mut self, condition: bool) {
        self.imaging |= condition;
    }

    pub fn imaging_recommended(&self) -> bool {
        self.imaging
    }
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

/// Output payload handed to the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assessment {
    /// Canonical lesion locations, sorted.
    pub locations: Vec<String>,
    /// Matched vascular syndrome statements, sorted.
    pub syndromes: Vec<String>,
    /// Vessels not already implied by a matched syndrome, sorted.
    pub additional_vessels: Vec<String>,
    /// Every canonical vessel accumulated, sorted.
    pub vessels: Vec<String>,
    /// Deduplicated ambiguity notes, sorted.
    pub notes: Vec<String>,
    pub imaging_recommended: bool,
    /// A spinal cord site is among the locations; spine MRI should be considered.
    pub spinal_imaging_advised: bool,
    pub severity_triggered: bool,
    /// NIHSS items to request; present only when the scale was triggered.
    pub severity_items: Option<Vec<ScaleItem>>,
    pub next_steps: Vec<String>,
}

impl Assessment {
    /// No lesion and no vascular finding at all.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty() && self.vessels.is_empty() && self.syndromes.is_empty()
    }
}

// ---------------------------------------------------------------------------
// LocalizerError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum LocalizerError {
    #[error("Unknown {field} value: {value}")]
    UnknownVocabulary { field: String, value: String },

    #[error("Unknown scale item: {0}")]
    UnknownScaleItem(String),

    #[error("Response {value} for '{item}' is outside 0..={max}")]
    OrdinalOutOfRange { item: String, value: u8, max: u8 },

    #[error("Invalid scale response '{0}', expected key=value")]
    InvalidResponse(String),

    #[error("Config load failed ({0}): {1}")]
    ConfigLoad(String, String),

    #[error("Config parse failed ({0}): {1}")]
    ConfigParse(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_separates_known_and_unknown_labels() {
        let ctx = EvaluationContext::new(&["Aphasia", "Hiccups"], "  slurred speech ");
        assert_eq!(ctx.symptoms.len(), 1);
        assert!(ctx.has(Symptom::Aphasia));
        assert_eq!(ctx.raw_labels.len(), 2);
        assert_eq!(ctx.chief_complaint, "slurred speech");
    }

    #[test]
    fn imaging_flag_is_monotonic() {
        let mut ctx = EvaluationContext::new(&[], "");
        assert!(!ctx.imaging_recommended());
        ctx.recommend_imaging_if(false);
        assert!(!ctx.imaging_recommended());
        ctx.recommend_imaging();
        ctx.recommend_imaging_if(false);
        assert!(ctx.imaging_recommended());
    }

    #[test]
    fn hemiparesis_side_prefers_right() {
        let ctx = EvaluationContext::new(
            &[
                "Left hemiparesis (Upper> Lower)",
                "Right hemiparesis (Lower> Upper)",
            ],
            "",
        );
        assert_eq!(ctx.hemiparesis_side(), Some(Side::Right));

        let ctx = EvaluationContext::new(&["Left hemiparesis (Lower> Upper)"], "");
        assert_eq!(ctx.hemiparesis_side(), Some(Side::Left));

        let ctx = EvaluationContext::new(&["Aphasia"], "");
        assert_eq!(ctx.hemiparesis_side(), None);
    }

    #[test]
    fn notes_collapse_duplicates() {
        let mut ctx = EvaluationContext::new(&[], "");
        ctx.add_note("same");
        ctx.add_note("same");
        assert_eq!(ctx.notes.len(), 1);
    }

    #[test]
    fn error_messages() {
        let err = LocalizerError::OrdinalOutOfRange {
            item: "Motor arm".into(),
            value: 7,
            max: 4,
        };
        assert_eq!(err.to_string(), "Response 7 for 'Motor arm' is outside 0..=4");
    }
}
