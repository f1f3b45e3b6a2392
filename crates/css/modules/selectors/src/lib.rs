//! Selectors Level 3: selector-group helpers for structural optimization.
//! Spec: <https://www.w3.org/TR/selectors-3/>
//!
//! This module covers what the rule-merging passes need from selectors:
//! - A compatibility profile deciding which selectors are "special"
//! - Normalization of a merged selector list (Section 4, groups of selectors)

mod cleanup;
mod compatibility;

// Re-export public API
pub use cleanup::{clean_selectors, reduce_selector};
pub use compatibility::{Compatibility, UnknownCompatibility};
