//! CSS Cascading and Inheritance Level 4: declaration override collapsing.
//! Spec: <https://www.w3.org/TR/css-cascade-4/>
//!
//! The structural passes hand concatenated declaration lists to a
//! [`PropertyOptimizer`]; [`OverrideOptimizer`] is the default implementation.

#![forbid(unsafe_code)]

mod optimizer;
mod overrides;

pub use optimizer::{OptimizeMode, PassThrough, PropertyOptimizer};
pub use overrides::OverrideOptimizer;
