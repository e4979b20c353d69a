/// Guidance text attached to an assessment.
/// Wording is advisory: every recommendation defers to a clinician.
pub struct GuidanceTemplates;

impl GuidanceTemplates {
    /// Brain imaging recommendation.
    pub fn imaging() -> String {
        "Given the symptoms and potential vascular involvement, imaging (CT or MRI scan of the brain) \
         is highly recommended to confirm the lesion location and etiology (e.g., ischemic stroke, hemorrhage)."
            .to_string()
    }

    /// Spine imaging, when a spinal cord site is among the locations.
    pub fn spinal_imaging() -> String {
        "If spinal cord involvement is suspected (e.g., dissociated sensory loss), \
         MRI of the spine may also be indicated."
            .to_string()
    }

    pub fn neurology_consult() -> String {
        "Consult with a neurologist for definitive diagnosis and management.".to_string()
    }

    /// Nothing localized.
    pub fn no_specific_finding() -> String {
        "No specific lesion or vascular territory suggested. \
         Please refine symptom selection or enter a chief complaint."
            .to_string()
    }

    /// Nothing localized, but a complaint was given.
    pub fn vague_complaint() -> String {
        "If symptoms are vague or non-localizing, consultation is recommended for further evaluation."
            .to_string()
    }

    /// Locations found but no arterial territory.
    pub fn no_arterial_territory() -> String {
        "No specific arterial territory analysis available for selected symptoms.".to_string()
    }

    /// Why the severity questionnaire is being requested.
    pub fn severity_prompt(scale: &str) -> String {
        format!(
            "{} scoring is requested because a relevant chief complaint or symptom was entered \
             (e.g., 'weakness', 'aphasia').",
            scale,
        )
    }

    /// Score summary line.
    pub fn severity_total(scale: &str, total: u32, max: u32) -> String {
        format!("Total {} score: {} of {}", scale, total, max)
    }

    /// Unanswered items, in scale order.
    pub fn missing_items(labels: &[String]) -> String {
        format!("Missing data for: {}", labels.join(", "))
    }
}
