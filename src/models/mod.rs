pub mod enums;

pub use enums::{Side, Symptom};
