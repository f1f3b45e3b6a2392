//! The three structural passes run by the rewrite engine.
//!
//! Every pass computes its full set of edits before touching the sequence, so
//! a pass either applies completely or leaves the tokens as they were.

mod adjacent;
mod duplicates;
mod non_adjacent;

pub use adjacent::merge_adjacent;
pub use duplicates::remove_duplicates;
pub use non_adjacent::reduce_non_adjacent;

use css_cascade::PropertyOptimizer;
use css_selectors::Compatibility;
use css_syntax::Token;

/// Read-only inputs shared by every pass of one optimization run.
#[derive(Clone, Copy)]
pub struct PassContext<'opt> {
    pub compatibility: Compatibility,
    pub optimizer: &'opt dyn PropertyOptimizer,
}

/// Drop every token whose index is marked, keeping the order of the rest.
///
/// Returns the number of tokens removed.
fn retain_unmarked(tokens: &mut Vec<Token>, marked: &[bool]) -> usize {
    let before = tokens.len();
    let mut flags = marked.iter();
    tokens.retain(|_| !flags.next().is_some_and(|flag| *flag));
    before.saturating_sub(tokens.len())
}
