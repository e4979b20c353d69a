//! Vessel normalizer.
//!
//! [`standardize`] maps raw vessel phrasings onto one canonical label per
//! artery through an ordered pattern table. [`VesselSet`] then applies the
//! specific→general redundancy table: a specific branch evicts its general
//! parent, and a general parent is not added once a specific branch is known.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

pub const MCA_SUPERIOR: &str = "Middle Cerebral Artery (MCA) - Superior Division";
pub const MCA_INFERIOR: &str = "Middle Cerebral Artery (MCA) - Inferior Division";
pub const MCA_BRANCHES: &str = "Middle Cerebral Artery (MCA) branches";
pub const PICA: &str = "Posterior Inferior Cerebellar Artery (PICA)";
pub const AICA: &str = "Anterior Inferior Cerebellar Artery (AICA)";
pub const SCA: &str = "Superior Cerebellar Artery (SCA)";
pub const LENTICULOSTRIATE: &str = "Lenticulostriate Arteries (MCA deep branches)";
pub const THALAMOPERFORATING: &str = "Thalamoperforating Arteries (PCA deep branches)";
pub const ACA: &str = "Anterior Cerebral Artery (ACA)";
pub const PCA_CALCARINE: &str = "Posterior Cerebral Artery (PCA) - Calcarine Branch";
pub const PCA: &str = "Posterior Cerebral Artery (PCA)";
pub const BASILAR_BRANCHES: &str = "Basilar Artery branches (pontine arteries)";
pub const BASILAR: &str = "Basilar Artery";
pub const VERTEBRAL: &str = "Vertebral Artery";
pub const OPHTHALMIC: &str = "Ophthalmic Artery";
pub const ICA: &str = "Internal Carotid Artery (ICA)";
pub const ECA: &str = "External Carotid Artery (ECA)";
pub const SPINAL: &str = "Spinal Arteries (Anterior/Posterior)";
pub const ANTERIOR_CHOROIDAL: &str = "Anterior Choroidal Artery";

/// (specific, general) pairs.
pub const REDUNDANCY: &[(&str, &str)] = &[
    (MCA_SUPERIOR, MCA_BRANCHES),
    (MCA_INFERIOR, MCA_BRANCHES),
    (PCA_CALCARINE, PCA),
    (AICA, BASILAR_BRANCHES),
    (SCA, BASILAR_BRANCHES),
    (PICA, VERTEBRAL),
];

struct VesselPattern {
    regex: Regex,
    canonical: &'static str,
}

fn pattern(regex_str: &str, canonical: &'static str) -> VesselPattern {
    VesselPattern {
        regex: Regex::new(regex_str).expect("Invalid vessel pattern regex"),
        canonical,
    }
}

/// Order is load-bearing: branch names precede the parent artery they are
/// often described relative to ("Lenticulostriate arteries (from MCA)").
static VESSEL_PATTERNS: LazyLock<Vec<VesselPattern>> = LazyLock::new(|| {
    vec![
        pattern(r"anterior choroidal", ANTERIOR_CHOROIDAL),
        pattern(r"lenticulostriate", LENTICULOSTRIATE),
        pattern(r"thalamoperforat", THALAMOPERFORATING),
        pattern(r"(?:\bmca\b|middle cerebral artery)[^a-z]*superior division", MCA_SUPERIOR),
        pattern(r"(?:\bmca\b|middle cerebral artery)[^a-z]*inferior division", MCA_INFERIOR),
        pattern(r"\bpica\b|posterior inferior cerebellar", PICA),
        pattern(r"\baica\b|anterior inferior cerebellar", AICA),
        pattern(r"\bsca\b|superior cerebellar", SCA),
        pattern(r"calcarine", PCA_CALCARINE),
        pattern(r"\bpca\b|posterior cerebral", PCA),
        pattern(r"\baca\b|anterior cerebral", ACA),
        pattern(r"ophthalmic", OPHTHALMIC),
        pattern(r"external carotid|\beca\b", ECA),
        pattern(r"internal carotid|\bica\b|carotid", ICA),
        pattern(r"spinal arter", SPINAL),
        pattern(r"basilar.*branch|pontine arter|paramedian", BASILAR_BRANCHES),
        pattern(r"\bbasilar\b", BASILAR),
        pattern(r"\bvertebral\b|vertebrobasilar", VERTEBRAL),
        pattern(r"\bmca\b|middle cerebral", MCA_BRANCHES),
    ]
});

/// Canonical label for `raw`, or the trimmed input when no pattern applies.
pub fn standardize(raw: &str) -> String {
    let trimmed = raw.trim();
    let lower = trimmed.to_lowercase();
    VESSEL_PATTERNS
        .iter()
        .find(|p| p.regex.is_match(&lower))
        .map(|p| p.canonical.to_string())
        .unwrap_or_else(|| trimmed.to_string())
}

/// General parent of a specific canonical vessel.
pub fn general_of(vessel: &str) -> Option<&'static str> {
    REDUNDANCY
        .iter()
        .find(|(specific, _)| *specific == vessel)
        .map(|(_, general)| *general)
}

/// Known specific branches of a general canonical vessel.
pub fn specifics_of(vessel: &str) -> impl Iterator<Item = &'static str> + '_ {
    REDUNDANCY
        .iter()
        .filter(move |(_, general)| *general == vessel)
        .map(|(specific, _)| *specific)
}

/// Whether `a` and `b` name the same vessel or sit in one specific/general row.
pub fn related(a: &str, b: &str) -> bool {
    a == b || general_of(a) == Some(b) || general_of(b) == Some(a)
}

/// Accumulating set of canonical vessels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VesselSet {
    vessels: BTreeSet<String>,
}

impl VesselSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standardize `raw` and merge it, resolving specific/general redundancy.
    pub fn add(&mut self, raw: &str) {
        let canonical = standardize(raw);
        if canonical.is_empty() {
            return;
        }

        if let Some(general) = general_of(&canonical) {
            self.vessels.remove(general);
        }

        if specifics_of(&canonical).any(|s| self.vessels.contains(s)) {
            tracing::debug!(vessel = %canonical, "General vessel already covered by a branch");
            return;
        }

        self.vessels.insert(canonical);
    }

    pub fn contains(&self, vessel: &str) -> bool {
        self.vessels.contains(vessel)
    }

    pub fn len(&self) -> usize {
        self.vessels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vessels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.vessels.iter()
    }

    pub fn to_sorted_vec(&self) -> Vec<String> {
        self.vessels.iter().cloned().collect()
    }
}
