//! Rendering module for serializing reports.

mod flat;
mod json;

pub use flat::{FlatReport, CUSTOM_PREFIX};
pub use json::{to_json, JsonFormat};
