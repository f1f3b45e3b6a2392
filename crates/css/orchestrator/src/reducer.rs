//! Declaration-list reduction shared by the non-adjacent passes.
//!
//! Given every place one selector occurs, the reducer merges their bodies in
//! document order through the property optimizer and hands each occurrence the
//! trailing run of surviving declarations it already had. The oldest surviving
//! occurrence absorbs whatever is left, so no declaration is ever lost.

use core::mem::take;

use css_cascade::{OptimizeMode, PropertyOptimizer};
use css_syntax::{Declaration, Token};

/// One place a selector appears in a token sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Occurrence {
    /// Index of the rule in the sequence.
    pub position: usize,
    /// The selector is one member of a larger group rather than the rule's only
    /// selector.
    pub partial: bool,
}

/// Body computed for one surviving occurrence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proposal {
    pub occurrence: Occurrence,
    /// Rank among surviving occurrences; 0 is the oldest.
    pub slot: usize,
    pub body: Vec<Declaration>,
}

/// Cumulative declaration counts at which each non-empty body ends.
fn join_offsets(bodies: &[&[Declaration]]) -> Vec<usize> {
    let mut total = 0_usize;
    bodies
        .iter()
        .filter(|body| !body.is_empty())
        .map(|body| {
            total = total.saturating_add(body.len());
            total
        })
        .collect()
}

/// Split the start of `flattened` off the trailing declarations `original`
/// already contains.
fn take_trailing(flattened: &mut Vec<Declaration>, original: &[Declaration]) -> Vec<Declaration> {
    let mut cursor = flattened.len();
    while let Some(previous) = cursor.checked_sub(1) {
        if !flattened
            .get(previous)
            .is_some_and(|declaration| original.contains(declaration))
        {
            break;
        }
        cursor = previous;
    }
    flattened.split_off(cursor)
}

/// Reduce the bodies of `occurrences` (newest first, as discovered).
///
/// `skip` is called oldest first with each occurrence and the number of bodies
/// collected so far; returning true leaves that occurrence out entirely.
/// Proposals come back newest first.
pub fn reduce_occurrences<F>(
    tokens: &[Token],
    selector: &str,
    occurrences: &[Occurrence],
    optimizer: &dyn PropertyOptimizer,
    mut skip: F,
) -> Vec<Proposal>
where
    F: FnMut(&Occurrence, usize) -> bool,
{
    let mut surviving: Vec<(Occurrence, &[Declaration])> = Vec::with_capacity(occurrences.len());
    for occurrence in occurrences.iter().rev() {
        if skip(occurrence, surviving.len()) {
            continue;
        }
        if let Some(block) = tokens.get(occurrence.position).and_then(Token::style_block) {
            surviving.push((*occurrence, &block.body));
        }
    }
    if surviving.is_empty() {
        return Vec::new();
    }

    let bodies: Vec<&[Declaration]> = surviving.iter().map(|(_, body)| *body).collect();
    let join_at = join_offsets(&bodies);
    let concatenated: Vec<Declaration> = bodies
        .iter()
        .flat_map(|body| body.iter().cloned())
        .collect();
    let mut flattened =
        optimizer.optimize(concatenated, OptimizeMode::Merge { join_at: &join_at }, selector);

    let mut proposals = Vec::with_capacity(surviving.len());
    for (slot, (occurrence, original)) in surviving.iter().enumerate().rev() {
        let body = if slot == 0 {
            take(&mut flattened)
        } else {
            take_trailing(&mut flattened, original)
        };
        proposals.push(Proposal {
            occurrence: *occurrence,
            slot,
            body,
        });
    }
    proposals
}
