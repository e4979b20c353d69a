//! Lesion normalizer.
//!
//! Canonicalizes raw anatomical strings into one label per structure.
//! Side-specific forms ("Left Thalamus") supersede the generic form
//! ("Thalamus"), and named brainstem subregions supersede
//! "Brainstem (General)". Matchers are consulted in priority order and the
//! first hit wins; compound strings are never split.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::Side;

pub const BRAINSTEM_GENERAL: &str = "Brainstem (General)";
pub const LATERAL_MEDULLA: &str = "Lateral Medulla (Brainstem)";
pub const MEDULLA: &str = "Medulla (Brainstem)";
pub const PONS: &str = "Pons (Brainstem)";

/// Named brainstem subregions, each superseding [`BRAINSTEM_GENERAL`].
pub const BRAINSTEM_PARTS: &[&str] = &[LATERAL_MEDULLA, MEDULLA, PONS];

/// What a matcher canonicalizes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LesionConcept {
    /// Brainstem subregion with a fixed canonical form.
    BrainstemPart(&'static str),
    /// Brainstem with no subregion named.
    BrainstemGeneral,
    /// Hemispheric structure rendered as "{Side} {name}" or bare `name`.
    Lateralized(&'static str),
}

struct LesionMatcher {
    regex: Regex,
    concept: LesionConcept,
    /// Match only against the label with parenthetical asides removed.
    outside_parens: bool,
}

fn matcher(regex_str: &str, concept: LesionConcept) -> LesionMatcher {
    LesionMatcher {
        regex: Regex::new(regex_str).expect("Invalid lesion matcher regex"),
        concept,
        outside_parens: false,
    }
}

/// Lobe names must be followed by "lobe(s)" in the label itself, so
/// "Frontal eye field" or an "(e.g., Parietal or Temporal lobe)" aside
/// does not count.
fn lobe(name: &str, canonical: &'static str) -> LesionMatcher {
    LesionMatcher {
        regex: Regex::new(&format!(r"\b{name}\b.*?\blobes?\b"))
            .expect("Invalid lobe matcher regex"),
        concept: LesionConcept::Lateralized(canonical),
        outside_parens: true,
    }
}

/// Drop every parenthesized segment, nesting included.
fn strip_parenthetical(text: &str) -> String {
    let mut depth = 0usize;
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Ordered matchers: brainstem family, then capsule/thalamus/cortex/lobes,
/// then basal ganglia and white matter.
static LESION_MATCHERS: LazyLock<Vec<LesionMatcher>> = LazyLock::new(|| {
    vec![
        matcher(r"\blateral medulla", LesionConcept::BrainstemPart(LATERAL_MEDULLA)),
        matcher(r"\bmedulla", LesionConcept::BrainstemPart(MEDULLA)),
        matcher(r"\bpons\b", LesionConcept::BrainstemPart(PONS)),
        matcher(r"\bbrain\s?stem\b", LesionConcept::BrainstemGeneral),
        matcher(r"\binternal capsule\b", LesionConcept::Lateralized("Internal Capsule")),
        matcher(r"\bthalamus\b", LesionConcept::Lateralized("Thalamus")),
        matcher(
            r"\bmotor cortex\b|\bprecentral gyrus\b",
            LesionConcept::Lateralized("Motor Cortex"),
        ),
        lobe("parietal", "Parietal Lobe"),
        lobe("frontal", "Frontal Lobe"),
        lobe("temporal", "Temporal Lobe"),
        lobe("occipital", "Occipital Lobe"),
        matcher(r"\bbasal ganglia\b", LesionConcept::Lateralized("Basal Ganglia")),
        matcher(
            r"\bwhite matter\b",
            LesionConcept::Lateralized("Subcortical White Matter"),
        ),
    ]
});

static SIDE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(left|right)\b").expect("Invalid side regex"));

/// First side qualifier in a lower-cased label.
fn detect_side(lower: &str) -> Option<Side> {
    SIDE_PATTERN
        .captures(lower)
        .and_then(|caps| caps.get(1))
        .map(|m| if m.as_str() == "left" { Side::Left } else { Side::Right })
}

fn lateralized(side: Side, name: &str) -> String {
    format!("{} {}", side.as_str(), name)
}

/// Classify a raw label without touching any set. `None` means passthrough.
pub fn classify(raw: &str) -> Option<LesionConcept> {
    let lower = raw.trim().to_lowercase();
    let outside = strip_parenthetical(&lower);
    LESION_MATCHERS
        .iter()
        .find(|m| {
            let haystack = if m.outside_parens { &outside } else { &lower };
            m.regex.is_match(haystack)
        })
        .map(|m| m.concept)
}

/// Accumulating set of canonical lesion locations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LesionSet {
    locations: BTreeSet<String>,
}

impl LesionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalize `raw` and merge it into the set.
    pub fn add(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        let lower = trimmed.to_lowercase();

        match classify(trimmed) {
            Some(LesionConcept::BrainstemPart(canonical)) => {
                self.locations.remove(BRAINSTEM_GENERAL);
                self.locations.insert(canonical.to_string());
            }
            Some(LesionConcept::BrainstemGeneral) => {
                if !BRAINSTEM_PARTS.iter().any(|p| self.locations.contains(*p)) {
                    self.locations.insert(BRAINSTEM_GENERAL.to_string());
                }
            }
            Some(LesionConcept::Lateralized(name)) => {
                self.add_lateralized(name, detect_side(&lower));
            }
            None => {
                tracing::debug!(label = trimmed, "No anatomical matcher, keeping label verbatim");
                self.locations.insert(trimmed.to_string());
            }
        }
    }

    fn add_lateralized(&mut self, name: &str, side: Option<Side>) {
        match side {
            Some(side) => {
                if self.locations.contains(&lateralized(side.opposite(), name)) {
                    tracing::debug!(structure = name, "Bilateral involvement recorded");
                }
                self.locations.remove(name);
                self.locations.insert(lateralized(side, name));
            }
            None => {
                let sided = Side::ALL
                    .iter()
                    .any(|s| self.locations.contains(&lateralized(*s, name)));
                if !sided {
                    self.locations.insert(name.to_string());
                }
            }
        }
    }

    pub fn contains(&self, location: &str) -> bool {
        self.locations.contains(location)
    }

    /// Whether any location mentions `fragment` (case-sensitive substring).
    pub fn mentions(&self, fragment: &str) -> bool {
        self.locations.iter().any(|l| l.contains(fragment))
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Locations in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.locations.iter()
    }

    pub fn to_sorted_vec(&self) -> Vec<String> {
        self.locations.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(labels: &[&str]) -> LesionSet {
        let mut set = LesionSet::new();
        for label in labels {
            set.add(label);
        }
        set
    }

    #[test]
    fn add_is_idempotent() {
        let once = set_of(&["Left internal capsule (Subcortical)"]);
        let twice = set_of(&[
            "Left internal capsule (Subcortical)",
            "Left internal capsule (Subcortical)",
        ]);
        assert_eq!(once, twice);
        assert_eq!(once.to_sorted_vec(), vec!["Left Internal Capsule"]);
    }

    #[test]
    fn side_supersedes_generic() {
        let set = set_of(&["Internal Capsule", "Right Internal Capsule"]);
        assert_eq!(set.to_sorted_vec(), vec!["Right Internal Capsule"]);
    }

    #[test]
    fn generic_never_downgrades_side() {
        let set = set_of(&["Right Internal Capsule", "Internal Capsule"]);
        assert_eq!(set.to_sorted_vec(), vec!["Right Internal Capsule"]);
    }

    #[test]
    fn opposite_sides_kept_as_bilateral() {
        let set = set_of(&["Left thalamus", "Right Thalamus (if sensory also affected)"]);
        assert_eq!(set.to_sorted_vec(), vec!["Left Thalamus", "Right Thalamus"]);
    }

    #[test]
    fn precentral_gyrus_is_motor_cortex() {
        let set = set_of(&["Left precentral gyrus (Lower face motor cortex)"]);
        assert_eq!(set.to_sorted_vec(), vec!["Left Motor Cortex"]);
    }

    #[test]
    fn brainstem_part_supersedes_general() {
        let set = set_of(&["Brainstem (cerebellar connections)", "Ipsilateral Pons"]);
        assert_eq!(set.to_sorted_vec(), vec![PONS]);
    }

    #[test]
    fn general_brainstem_skipped_when_part_present() {
        let set = set_of(&["Ipsilateral Medulla (Hypoglossal nucleus - CN XII)", "Brainstem"]);
        assert_eq!(set.to_sorted_vec(), vec![MEDULLA]);
    }

    #[test]
    fn lateral_medulla_checked_before_medulla() {
        assert_eq!(
            classify("Ipsilateral Lateral Medulla"),
            Some(LesionConcept::BrainstemPart(LATERAL_MEDULLA))
        );
        assert_eq!(
            classify("Brainstem (Vestibular nuclei - e.g., lateral medulla for Wallenberg's)"),
            Some(LesionConcept::BrainstemPart(LATERAL_MEDULLA))
        );
    }

    #[test]
    fn compound_label_takes_first_matching_concept() {
        // Parietal is consulted before frontal; the compound is not split.
        let set = set_of(&["Left Frontal and Parietal Lobes"]);
        assert_eq!(set.to_sorted_vec(), vec!["Left Parietal Lobe"]);

        // Internal capsule outranks basal ganglia.
        let set = set_of(&["Left Internal Capsule or Basal Ganglia"]);
        assert_eq!(set.to_sorted_vec(), vec!["Left Internal Capsule"]);
    }

    #[test]
    fn thalamus_outranks_basal_ganglia() {
        let set = set_of(&["Basal Ganglia/Thalamus (less common for conjugate deviation)"]);
        assert_eq!(set.to_sorted_vec(), vec!["Thalamus"]);
    }

    #[test]
    fn hypothalamus_is_not_thalamus() {
        let set = set_of(&["Hypothalamospinal tract (anywhere from hypothalamus down to T1)"]);
        assert_eq!(
            set.to_sorted_vec(),
            vec!["Hypothalamospinal tract (anywhere from hypothalamus down to T1)"]
        );
    }

    #[test]
    fn lobe_requires_lobe_word_outside_parentheses() {
        assert_eq!(classify("Ipsilateral Frontal eye field"), None);
        assert_eq!(classify("Contralateral Optic radiation (Parietal or Temporal lobe)"), None);
        assert_eq!(
            classify("Contralateral Parietal lobe (Somatosensory cortex)"),
            Some(LesionConcept::Lateralized("Parietal Lobe"))
        );
    }

    #[test]
    fn parenthetical_asides_stripped() {
        assert_eq!(strip_parenthetical("a (b (c)) d"), "a  d");
        assert_eq!(
            classify("Focal cortical lesion (e.g., Frontal, Temporal, Parietal, Occipital lobe)"),
            None
        );
    }

    #[test]
    fn unknown_label_passes_through_trimmed() {
        let set = set_of(&["  Cerebellar vermis "]);
        assert_eq!(set.to_sorted_vec(), vec!["Cerebellar vermis"]);
    }

    #[test]
    fn empty_label_ignored() {
        let set = set_of(&["   "]);
        assert!(set.is_empty());
    }

    #[test]
    fn white_matter_and_basal_ganglia_are_lateralized() {
        let set = set_of(&["Right subcortical white matter", "Left Basal Ganglia"]);
        assert_eq!(
            set.to_sorted_vec(),
            vec!["Left Basal Ganglia", "Right Subcortical White Matter"]
        );
    }

    #[test]
    fn output_is_sorted() {
        let set = set_of(&["Right parietal lobe", "Cerebellum", "Left Thalamus"]);
        assert_eq!(
            set.to_sorted_vec(),
            vec!["Cerebellum", "Left Thalamus", "Right Parietal Lobe"]
        );
    }

    #[test]
    fn mentions_spinal_cord() {
        let set = set_of(&["Spinal Cord (Syringomyelia, Brown-Séquard - level dependent)"]);
        assert!(set.mentions("Spinal Cord"));
        assert!(!set.mentions("Brainstem"));
    }
}
