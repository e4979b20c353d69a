//! Symptom-driven lesion localization.
//!
//! ```text
//! labels + complaint -> rules (lesion/vessel normalizers) -> syndromes -> Assessment
//!                    \-> severity trigger -------------------------------^
//! ```
//!
//! Each evaluation builds a fresh [`EvaluationContext`]; nothing is shared
//! between calls.

pub mod types;
pub mod lesion;
pub mod vessel;
pub mod rules;
pub mod syndromes;
pub mod severity;
pub mod messages;
pub mod engine;

pub use types::*;
pub use engine::{evaluate, DefaultLocalizer, Localizer};
pub use lesion::LesionSet;
pub use severity::{parse_responses, ScaleItem, SeverityScale, SeverityScore};
pub use syndromes::SyndromeMatchMode;
pub use vessel::VesselSet;
