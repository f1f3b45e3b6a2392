//! Structural stylesheet optimizer.
//!
//! Coordinates the passes that shrink a token tree without changing which
//! declarations win the cascade: duplicate removal, adjacent merging and
//! non-adjacent reduction. Property-level collapsing is delegated to a
//! [`css_cascade::PropertyOptimizer`].

mod engine;
mod error;
mod passes;
mod prune;
mod reducer;

pub use engine::{AdvancedOptimizer, DEFAULT_MAX_PASSES, OptimizeStats};
pub use error::OptimizeError;
