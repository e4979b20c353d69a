use std::collections::BTreeMap;
use std::time::Instant;

use crate::config::EngineConfig;

use super::messages::GuidanceTemplates;
use super::rules::{default_rules, RuleGroup};
use super::severity::{self, SeverityScale, SeverityScore};
use super::syndromes::{additional_vessels, match_syndromes};
use super::types::{Assessment, EvaluationContext, LocalizerError};

const SPINAL_CORD: &str = "Spinal Cord";
const SEVERITY_SCALE_NAME: &str = "NIHSS";

/// Symptom-to-lesion localization and severity scoring.
pub trait Localizer {
    /// Evaluate one snapshot of selected symptom labels and a free-text
    /// complaint. Unknown labels are tolerated; evaluation never fails.
    fn evaluate(&self, symptoms: &[&str], chief_complaint: &str) -> Assessment;

    /// Score severity responses keyed by scale item key.
    fn score_severity(
        &self,
        responses: &BTreeMap<String, u8>,
    ) -> Result<SeverityScore, LocalizerError>;
}

/// Default implementation of the localizer.
/// Runs the per-symptom rule set, then the syndrome matcher, over a fresh
/// context per call. Holds no per-request state.
pub struct DefaultLocalizer {
    config: EngineConfig,
    rules: Vec<RuleGroup>,
    scale: SeverityScale,
}

impl DefaultLocalizer {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            rules: default_rules(),
            scale: SeverityScale::nihss(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scale(&self) -> &SeverityScale {
        &self.scale
    }

    /// Rule set and syndrome pass. Returns the number of rules that fired.
    fn run_rules(&self, ctx: &mut EvaluationContext) -> usize {
        let fired = self
            .rules
            .iter()
            .filter_map(|group| group.apply(ctx))
            .count();
        match_syndromes(ctx, self.config.syndrome_match);
        fired
    }

    fn next_steps(&self, ctx: &EvaluationContext, spinal: bool) -> Vec<String> {
        let mut steps = Vec::new();

        if ctx.lesions.is_empty() {
            steps.push(GuidanceTemplates::no_specific_finding());
            if !ctx.chief_complaint.is_empty() {
                steps.push(GuidanceTemplates::vague_complaint());
            }
        } else {
            if ctx.vessels.is_empty() && ctx.syndromes.is_empty() {
                steps.push(GuidanceTemplates::no_arterial_territory());
            }
            if ctx.imaging_recommended() {
                steps.push(GuidanceTemplates::imaging());
                if spinal {
                    steps.push(GuidanceTemplates::spinal_imaging());
                }
                steps.push(GuidanceTemplates::neurology_consult());
            }
        }

        if ctx.severity_triggered {
            steps.push(GuidanceTemplates::severity_prompt(SEVERITY_SCALE_NAME));
        }

        steps
    }

    fn assemble(&self, ctx: &EvaluationContext) -> Assessment {
        let spinal_imaging_advised = ctx.imaging_recommended() && ctx.lesions.mentions(SPINAL_CORD);

        let mut syndromes: Vec<String> = ctx
            .syndromes
            .iter()
            .map(|s| s.description.to_string())
            .collect();
        syndromes.sort();

        Assessment {
            locations: ctx.lesions.to_sorted_vec(),
            syndromes,
            additional_vessels: additional_vessels(ctx),
            vessels: ctx.vessels.to_sorted_vec(),
            notes: ctx.notes.iter().cloned().collect(),
            imaging_recommended: ctx.imaging_recommended(),
            spinal_imaging_advised,
            severity_triggered: ctx.severity_triggered,
            severity_items: ctx
                .severity_triggered
                .then(|| self.scale.items().to_vec()),
            next_steps: self.next_steps(ctx, spinal_imaging_advised),
        }
    }
}

impl Default for DefaultLocalizer {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Localizer for DefaultLocalizer {
    fn evaluate(&self, symptoms: &[&str], chief_complaint: &str) -> Assessment {
        let start = Instant::now();

        let mut ctx = EvaluationContext::new(symptoms, chief_complaint);
        ctx.severity_triggered = severity::is_triggered(
            &self.config.severity_keywords,
            &ctx.raw_labels,
            &ctx.chief_complaint,
        );

        let fired = self.run_rules(&mut ctx);

        // Suspected stroke is imaged regardless of which rules fired.
        let triggered = ctx.severity_triggered;
        ctx.recommend_imaging_if(triggered);

        let assessment = self.assemble(&ctx);

        tracing::info!(
            symptoms = ctx.symptoms.len(),
            rules_fired = fired,
            syndromes = assessment.syndromes.len(),
            locations = assessment.locations.len(),
            vessels = assessment.vessels.len(),
            imaging = assessment.imaging_recommended,
            severity = assessment.severity_triggered,
            processing_us = start.elapsed().as_micros() as u64,
            "Localization complete"
        );

        assessment
    }

    fn score_severity(
        &self,
        responses: &BTreeMap<String, u8>,
    ) -> Result<SeverityScore, LocalizerError> {
        let score = self.scale.score(responses)?;
        if !score.is_complete() {
            tracing::info!(
                missing = score.missing_items.len(),
                "Severity score computed on partial responses"
            );
        }
        Ok(score)
    }
}

/// Evaluate with the default configuration.
pub fn evaluate(symptoms: &[&str], chief_complaint: &str) -> Assessment {
    DefaultLocalizer::default().evaluate(symptoms, chief_complaint)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::rules::NOTE_TRUNCAL_ATAXIA;
    use crate::localization::syndromes::SyndromeMatchMode;
    use crate::localization::vessel::{LENTICULOSTRIATE, MCA_SUPERIOR};
    use crate::models::Symptom;

    #[test]
    fn broca_presentation() {
        let a = evaluate(&["Right hemiparesis (Upper> Lower)", "Aphasia"], "");
        for expected in ["Left Motor Cortex", "Left Frontal Lobe", "Left Temporal Lobe"] {
            assert!(a.locations.contains(&expected.to_string()), "missing {expected}");
        }
        assert_eq!(a.syndromes.len(), 1);
        assert!(a.syndromes[0].contains("Broca's aphasia"));
        assert!(a.imaging_recommended);
        assert!(a.vessels.contains(&MCA_SUPERIOR.to_string()));
        assert!(!a.additional_vessels.contains(&MCA_SUPERIOR.to_string()));
    }

    #[test]
    fn empty_input_yields_empty_assessment() {
        let a = evaluate(&[], "");
        assert!(a.is_empty());
        assert!(a.notes.is_empty());
        assert!(!a.imaging_recommended);
        assert!(!a.severity_triggered);
        assert!(a.severity_items.is_none());
        assert_eq!(a.next_steps, vec![GuidanceTemplates::no_specific_finding()]);
    }

    #[test]
    fn truncal_ataxia_alone() {
        let a = evaluate(&["Ataxia (Truncal)"], "");
        assert_eq!(a.locations, vec!["Cerebellar vermis"]);
        assert_eq!(a.notes, vec![NOTE_TRUNCAL_ATAXIA]);
        assert!(a.imaging_recommended);
    }

    #[test]
    fn complaint_alone_triggers_severity_and_imaging() {
        let a = evaluate(&[], "sudden weakness and numbness");
        assert!(a.severity_triggered);
        assert!(a.imaging_recommended);
        assert_eq!(a.severity_items.as_ref().map(Vec::len), Some(13));
        assert!(a.locations.is_empty());
        assert!(a.next_steps.contains(&GuidanceTemplates::vague_complaint()));
    }

    #[test]
    fn unknown_labels_are_tolerated() {
        let a = evaluate(&["Hiccups", "Tinnitus"], "");
        assert!(a.is_empty());
        assert!(!a.imaging_recommended);
    }

    #[test]
    fn unknown_label_still_counts_for_severity() {
        let a = evaluate(&["Transient stroke-like episode"], "");
        assert!(a.severity_triggered);
        assert!(a.locations.is_empty());
    }

    #[test]
    fn imaging_never_cleared_by_later_rules() {
        // Only "stroke" triggers severity here, so the conditional rules
        // that follow aphasia cannot raise imaging and must not lower it.
        let config = EngineConfig {
            severity_keywords: vec!["stroke".into()],
            ..EngineConfig::default()
        };
        let localizer = DefaultLocalizer::new(config);
        let a = localizer.evaluate(&["Aphasia", "Emotional disturbances", "Tongue deviation"], "");
        assert!(!a.severity_triggered);
        assert!(a.imaging_recommended);
    }

    #[test]
    fn conditional_rules_alone_do_not_image_without_severity() {
        let config = EngineConfig {
            severity_keywords: vec!["stroke".into()],
            ..EngineConfig::default()
        };
        let localizer = DefaultLocalizer::new(config);
        let a = localizer.evaluate(&["Emotional disturbances", "Tongue deviation"], "");
        assert!(!a.imaging_recommended);
        assert!(!a.locations.is_empty());
        assert!(!a.next_steps.contains(&GuidanceTemplates::imaging()));
    }

    #[test]
    fn spinal_site_advises_spine_imaging() {
        let a = evaluate(
            &["Sensory loss (Dissociated - e.g., pain/temp affected, light touch spared)"],
            "",
        );
        assert!(a.spinal_imaging_advised);
        assert!(a.next_steps.contains(&GuidanceTemplates::spinal_imaging()));
    }

    #[test]
    fn lacunar_syndrome_end_to_end() {
        let a = evaluate(
            &[
                "Right hemiparesis (Upper & Lower equally)",
                "Facial palsy (Lower face only affected)",
                "Sensory loss (Hemibody, all modalities)",
            ],
            "",
        );
        assert_eq!(a.syndromes.len(), 1);
        assert!(a.syndromes[0].starts_with("Left Lenticulostriate"));
        assert!(a.locations.contains(&"Left Basal Ganglia".to_string()));
        assert!(a.locations.contains(&"Left Internal Capsule".to_string()));
        assert!(!a.locations.contains(&"Internal Capsule".to_string()));
        assert!(a.vessels.contains(&LENTICULOSTRIATE.to_string()));
        assert!(!a.additional_vessels.contains(&LENTICULOSTRIATE.to_string()));
    }

    #[test]
    fn all_matches_mode_reports_overlapping_syndromes() {
        let labels = [
            "Right hemiparesis (Upper> Lower)",
            "Aphasia",
            "Vision loss (Homonymous Hemianopia)",
        ];
        assert_eq!(evaluate(&labels, "").syndromes.len(), 1);

        let localizer = DefaultLocalizer::new(EngineConfig {
            syndrome_match: SyndromeMatchMode::AllMatches,
            ..EngineConfig::default()
        });
        assert_eq!(localizer.evaluate(&labels, "").syndromes.len(), 2);
    }

    #[test]
    fn outputs_are_sorted_and_deduplicated() {
        let a = evaluate(
            &[
                "Neglect",
                "Vertigo",
                "Ataxia (Limb)",
                "Horner’s syndrome",
                "Vision loss (Homonymous Hemianopia)",
            ],
            "",
        );
        for list in [&a.locations, &a.vessels, &a.notes, &a.additional_vessels] {
            let mut sorted = list.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(list, &sorted);
        }
    }

    #[test]
    fn every_symptom_evaluates() {
        for symptom in Symptom::ALL {
            let a = evaluate(&[symptom.as_str()], "");
            assert!(!a.locations.is_empty(), "{symptom} produced no location");
        }
    }

    #[test]
    fn severity_scoring_through_trait() {
        let localizer = DefaultLocalizer::default();
        let responses = BTreeMap::from([("loc".to_string(), 1), ("motor_leg".to_string(), 3)]);
        let score = localizer.score_severity(&responses).unwrap();
        assert_eq!(score.total, 4);
        assert_eq!(score.missing_items.len(), 11);

        let bad = BTreeMap::from([("loc".to_string(), 9)]);
        assert!(localizer.score_severity(&bad).is_err());
    }
}
