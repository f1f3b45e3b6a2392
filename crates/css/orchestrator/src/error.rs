//! Errors surfaced by the rewrite engine.

use core::fmt;

/// The pass loop hit its ceiling before two consecutive passes made no change.
///
/// The token tree is left as the last completed pass produced it, which is
/// still a valid (if less optimized) stylesheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptimizeError {
    GaveUp {
        /// Passes run on the sequence that failed to converge.
        passes: usize,
    },
}

impl fmt::Display for OptimizeError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GaveUp { passes } => {
                write!(formatter, "gave up optimizing after {passes} passes without converging")
            }
        }
    }
}

impl core::error::Error for OptimizeError {}
