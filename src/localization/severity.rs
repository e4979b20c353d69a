//! Severity scale gate and scorer (NIHSS).
//!
//! The gate is plain keyword containment over symptom labels and the chief
//! complaint. The scorer sums answered items only; unanswered items are
//! reported back, never counted as zero.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::types::LocalizerError;

// ── Keyword vocabulary ──────────────────────────────────────

/// Default trigger vocabulary: the union of every revision's keyword list.
pub const DEFAULT_SEVERITY_KEYWORDS: &[&str] = &[
    "stroke", "tia", "cva", "ischemia", "hemorrhage", "infarct",
    "weakness", "weak", "numbness", "numb", "mute", "stuporous",
    "palsy", "dysarthria", "hemiparesis", "aoc", "alteration",
    "passing out", "seizure", "aphasia", "neglect", "vertigo",
    "ataxia", "sensory loss", "gaze palsy",
    "chorea", "nystagmus", "hiccup",
];

/// Whether the severity questionnaire should be requested.
///
/// `keywords` are expected lower-case; both inputs are lower-cased here.
pub fn is_triggered<'a, I>(keywords: &[String], symptom_labels: I, chief_complaint: &str) -> bool
where
    I: IntoIterator<Item = &'a String>,
{
    let hit = |text: &str| {
        let lower = text.to_lowercase();
        keywords
            .iter()
            .find(|kw| !kw.is_empty() && lower.contains(kw.as_str()))
            .cloned()
    };

    for label in symptom_labels {
        if let Some(keyword) = hit(label) {
            tracing::debug!(keyword = %keyword, source = "symptom", "Severity scale triggered");
            return true;
        }
    }

    if let Some(keyword) = hit(chief_complaint) {
        tracing::debug!(keyword = %keyword, source = "chief_complaint", "Severity scale triggered");
        return true;
    }

    false
}

// ── Scale definition ────────────────────────────────────────

/// One questionnaire item with a closed ordinal range `0..=max`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScaleItem {
    /// Stable identifier used for responses.
    pub key: String,
    /// Display label.
    pub label: String,
    pub max: u8,
}

impl ScaleItem {
    pub fn new(key: &str, label: &str, max: u8) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            max,
        }
    }

    pub fn options(&self) -> RangeInclusive<u8> {
        0..=self.max
    }
}

/// Result of scoring a (possibly partial) set of responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeverityScore {
    pub total: u32,
    pub answered: usize,
    /// Labels of items without a response, in scale order.
    pub missing_items: Vec<String>,
}

impl SeverityScore {
    pub fn is_complete(&self) -> bool {
        self.missing_items.is_empty()
    }
}

/// An ordered ordinal questionnaire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityScale {
    items: Vec<ScaleItem>,
}

impl SeverityScale {
    pub fn new(items: Vec<ScaleItem>) -> Self {
        Self { items }
    }

    /// The 13-item NIH Stroke Scale as presented to the examiner.
    pub fn nihss() -> Self {
        Self::new(vec![
            ScaleItem::new("loc", "LOC (Alert to Unresponsive)", 3),
            ScaleItem::new("month_age", "Month & Age", 2),
            ScaleItem::new("commands", "Blink eyes & Squeeze hands", 2),
            ScaleItem::new("gaze", "Horizontal gaze palsy (Normal to Forced gaze palsy)", 2),
            ScaleItem::new("visual", "Visual (No to Complete hemianopia)", 3),
            ScaleItem::new("facial_palsy", "Facial palsy (No to Complete paralysis)", 3),
            ScaleItem::new(
                "motor_arm",
                "Motor arm (No drift, Drift no Hit, Drift & Hit, Some against gravity, No against gravity, No movement)",
                4,
            ),
            ScaleItem::new("motor_leg", "Motor leg (Same as arm)", 4),
            ScaleItem::new("limb_ataxia", "Limb ataxia (No to Both limbs ataxia)", 2),
            ScaleItem::new("sensory", "Sensory (Normal, Can sense Touch, No sense)", 2),
            ScaleItem::new("language", "Language (Normal to Global aphasia)", 3),
            ScaleItem::new("dysarthria", "Dysarthria (No to Severe dysarthria)", 2),
            ScaleItem::new("extinction", "Extinction/Inattention (Normal to Neglect)", 2),
        ])
    }

    pub fn items(&self) -> &[ScaleItem] {
        &self.items
    }

    pub fn item(&self, key: &str) -> Option<&ScaleItem> {
        self.items.iter().find(|i| i.key == key)
    }

    /// Highest attainable total.
    pub fn max_total(&self) -> u32 {
        self.items.iter().map(|i| u32::from(i.max)).sum()
    }

    /// Sum the provided responses, keyed by item key.
    ///
    /// Unknown keys and out-of-range ordinals are rejected; items without a
    /// response are listed in `missing_items` and excluded from the total.
    pub fn score(&self, responses: &BTreeMap<String, u8>) -> Result<SeverityScore, LocalizerError> {
        if let Some(unknown) = responses.keys().find(|k| self.item(k).is_none()) {
            return Err(LocalizerError::UnknownScaleItem(unknown.clone()));
        }

        let mut total = 0u32;
        let mut answered = 0usize;
        let mut missing_items = Vec::new();

        for item in &self.items {
            match responses.get(&item.key) {
                Some(&value) if value > item.max => {
                    return Err(LocalizerError::OrdinalOutOfRange {
                        item: item.label.clone(),
                        value,
                        max: item.max,
                    });
                }
                Some(&value) => {
                    total += u32::from(value);
                    answered += 1;
                }
                None => missing_items.push(item.label.clone()),
            }
        }

        Ok(SeverityScore {
            total,
            answered,
            missing_items,
        })
    }
}

/// Parse `key=value` pairs into a response map.
pub fn parse_responses<S: AsRef<str>>(pairs: &[S]) -> Result<BTreeMap<String, u8>, LocalizerError> {
    pairs
        .iter()
        .map(|pair| {
            let pair = pair.as_ref();
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| LocalizerError::InvalidResponse(pair.to_string()))?;
            let value = value
                .trim()
                .parse::<u8>()
                .map_err(|_| LocalizerError::InvalidResponse(pair.to_string()))?;
            Ok((key.trim().to_string(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> Vec<String> {
        DEFAULT_SEVERITY_KEYWORDS.iter().map(|s| s.to_string()).collect()
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn chief_complaint_triggers() {
        let none: Vec<String> = vec![];
        assert!(is_triggered(&keywords(), &none, "sudden weakness and numbness"));
        assert!(is_triggered(&keywords(), &none, "Possible STROKE"));
    }

    #[test]
    fn nothing_matches_nothing_triggers() {
        let none: Vec<String> = vec![];
        assert!(!is_triggered(&keywords(), &none, ""));
        assert!(!is_triggered(&keywords(), &labels(&["Emotional disturbances"]), "headache"));
    }

    #[test]
    fn symptom_label_triggers() {
        assert!(is_triggered(&keywords(), &labels(&["Ataxia (Truncal)"]), ""));
        assert!(is_triggered(&keywords(), &labels(&["Gaze palsy (Conjugate, toward lesion)"]), ""));
    }

    #[test]
    fn empty_keyword_never_matches() {
        let kws = vec![String::new()];
        assert!(!is_triggered(&kws, &labels(&["Aphasia"]), "anything"));
    }

    #[test]
    fn nihss_shape() {
        let scale = SeverityScale::nihss();
        assert_eq!(scale.items().len(), 13);
        assert_eq!(scale.max_total(), 34);
        assert_eq!(scale.item("motor_arm").unwrap().options(), 0..=4);
        assert_eq!(scale.item("loc").unwrap().max, 3);
        assert_eq!(scale.item("dysarthria").unwrap().max, 2);
    }

    #[test]
    fn partial_responses_reduced_scale() {
        let scale = SeverityScale::new(vec![
            ScaleItem::new("item1", "item1", 2),
            ScaleItem::new("item2", "item2", 3),
            ScaleItem::new("item3", "item3", 4),
        ]);
        let responses = BTreeMap::from([("item1".to_string(), 2), ("item3".to_string(), 1)]);
        let score = scale.score(&responses).unwrap();
        assert_eq!(score.total, 3);
        assert_eq!(score.answered, 2);
        assert_eq!(score.missing_items, vec!["item2"]);
        assert!(!score.is_complete());
    }

    #[test]
    fn no_responses_all_missing() {
        let scale = SeverityScale::nihss();
        let score = scale.score(&BTreeMap::new()).unwrap();
        assert_eq!(score.total, 0);
        assert_eq!(score.missing_items.len(), 13);
    }

    #[test]
    fn full_responses_complete() {
        let scale = SeverityScale::nihss();
        let responses: BTreeMap<String, u8> =
            scale.items().iter().map(|i| (i.key.clone(), i.max)).collect();
        let score = scale.score(&responses).unwrap();
        assert_eq!(score.total, 34);
        assert!(score.is_complete());
    }

    #[test]
    fn out_of_range_rejected() {
        let scale = SeverityScale::nihss();
        let responses = BTreeMap::from([("month_age".to_string(), 3)]);
        let err = scale.score(&responses).unwrap_err();
        assert!(matches!(err, LocalizerError::OrdinalOutOfRange { value: 3, max: 2, .. }));
    }

    #[test]
    fn unknown_item_rejected() {
        let scale = SeverityScale::nihss();
        let responses = BTreeMap::from([("pupils".to_string(), 1)]);
        let err = scale.score(&responses).unwrap_err();
        assert!(matches!(err, LocalizerError::UnknownScaleItem(k) if k == "pupils"));
    }

    #[test]
    fn parse_response_pairs() {
        let parsed = parse_responses(&["loc=1", " motor_arm = 4 "]).unwrap();
        assert_eq!(parsed.get("loc"), Some(&1));
        assert_eq!(parsed.get("motor_arm"), Some(&4));
        assert!(parse_responses(&["loc"]).is_err());
        assert!(parse_responses(&["loc=high"]).is_err());
    }
}
