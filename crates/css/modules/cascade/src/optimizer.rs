//! The property optimizer seam consumed by the structural passes.

use css_syntax::Declaration;

/// How the declarations handed to a [`PropertyOptimizer`] were assembled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptimizeMode<'joins> {
    /// One declaration list, normalized on its own.
    Single,
    /// Two adjacent rules with the same selector, concatenated.
    Append {
        /// Cumulative declaration counts where each original list ends.
        join_at: &'joins [usize],
    },
    /// Every occurrence of one selector, concatenated in document order.
    Merge {
        /// Cumulative declaration counts where each original list ends.
        join_at: &'joins [usize],
    },
}

/// Collapses overridden declarations within one (possibly concatenated) list.
///
/// Implementations must return a subsequence of `body`: declarations may be
/// dropped but never rewritten or reordered, because the reducer attributes
/// each surviving declaration back to the rule it came from by equality.
pub trait PropertyOptimizer {
    /// Optimize `body` for the rule(s) selected by `selector`.
    fn optimize(
        &self,
        body: Vec<Declaration>,
        mode: OptimizeMode<'_>,
        selector: &str,
    ) -> Vec<Declaration>;
}

/// Leaves every declaration list untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassThrough;

impl PropertyOptimizer for PassThrough {
    #[inline]
    fn optimize(
        &self,
        body: Vec<Declaration>,
        _mode: OptimizeMode<'_>,
        _selector: &str,
    ) -> Vec<Declaration> {
        body
    }
}
