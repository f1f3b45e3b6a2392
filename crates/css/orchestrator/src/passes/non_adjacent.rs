//! Non-adjacent reduction: hoisting declarations shared by every occurrence
//! of a selector into the newest occurrence that already has them.

use std::collections::HashMap;

use css_syntax::{Declaration, Token};
use log::trace;

use super::PassContext;
use crate::reducer::{Occurrence, Proposal, reduce_occurrences};

/// Where every selector and selector group occurs, collected back to front.
#[derive(Debug, Default)]
struct Candidates {
    /// Occurrences per selector key, newest first.
    by_selector: HashMap<String, Vec<Occurrence>>,
    /// Selector keys in the order they were first seen twice.
    repeated: Vec<String>,
    /// Positions of each non-special multi-selector group, newest first.
    groups: HashMap<String, Vec<usize>>,
    /// Group keys in discovery order.
    group_order: Vec<String>,
}

impl Candidates {
    fn collect(tokens: &[Token], context: PassContext<'_>) -> Self {
        let mut candidates = Self::default();
        for (position, token) in tokens.iter().enumerate().rev() {
            // At-rule blocks are independent declarations, not cascading bodies.
            let Token::Rule(block) = token else {
                continue;
            };
            let joined = block.selectors.joined();
            if block.selectors.len() > 1 && !context.compatibility.is_special(&joined) {
                for selector in &block.selectors {
                    candidates.record(selector, position, true);
                }
                candidates
                    .groups
                    .entry(joined.clone())
                    .or_insert_with(|| {
                        candidates.group_order.push(joined.clone());
                        Vec::new()
                    })
                    .push(position);
            } else {
                candidates.record(&joined, position, false);
            }
        }
        candidates
    }

    fn record(&mut self, selector: &str, position: usize, partial: bool) {
        let occurrences = self.by_selector.entry(selector.to_owned()).or_default();
        if occurrences.len() == 1 {
            self.repeated.push(selector.to_owned());
        }
        occurrences.push(Occurrence { position, partial });
    }

    fn occurrences(&self, selector: &str) -> &[Occurrence] {
        self.by_selector
            .get(selector)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Replace the body at `position` when it differs; returns true on change.
fn install(tokens: &mut [Token], position: usize, body: Vec<Declaration>) -> bool {
    match tokens.get_mut(position).and_then(Token::style_block_mut) {
        Some(block) if block.body != body => {
            block.body = body;
            true
        }
        _ => false,
    }
}

/// Reduce every selector that occurs more than once on its own.
fn reduce_simple_cases(
    tokens: &mut [Token],
    candidates: &Candidates,
    context: PassContext<'_>,
) -> bool {
    let mut reduced = false;
    for selector in &candidates.repeated {
        let occurrences = candidates.occurrences(selector);
        let proposals = reduce_occurrences(
            tokens,
            selector,
            occurrences,
            context.optimizer,
            |occurrence, collected| occurrence.partial && collected == 0,
        );
        for Proposal {
            occurrence, body, ..
        } in proposals
        {
            if !occurrence.partial && install(tokens, occurrence.position, body) {
                trace!("reduced `{selector}` at {}", occurrence.position);
                reduced = true;
            }
        }
    }
    reduced
}

/// Body every member of a group agrees should remain at `target`, if any.
fn agreed_body(
    tokens: &[Token],
    members: &[String],
    target: usize,
    candidates: &Candidates,
    context: PassContext<'_>,
) -> Option<Vec<Declaration>> {
    let mut agreed: Option<Vec<Declaration>> = None;
    for member in members {
        let occurrences = candidates.occurrences(member);
        if occurrences.len() < 2 {
            return None;
        }
        let body = reduce_occurrences(
            tokens,
            member,
            occurrences,
            context.optimizer,
            |occurrence, _| occurrence.position < target,
        )
        .into_iter()
        .find(|proposal| proposal.slot == 0)?
        .body;
        if agreed.as_ref().is_some_and(|previous| *previous != body) {
            return None;
        }
        agreed = Some(body);
    }
    agreed
}

/// Hoist into the earliest occurrence of each repeated selector group when
/// all of its members agree on the remaining body.
fn reduce_complex_cases(
    tokens: &mut [Token],
    candidates: &Candidates,
    context: PassContext<'_>,
) -> bool {
    let mut reduced = false;
    for group in &candidates.group_order {
        let Some(positions) = candidates.groups.get(group) else {
            continue;
        };
        if positions.len() < 2 {
            continue;
        }
        let Some(&target) = positions.last() else {
            continue;
        };
        let Some(members) = tokens
            .get(target)
            .and_then(Token::style_block)
            .map(|block| block.selectors.as_slice().to_vec())
        else {
            continue;
        };
        let Some(body) = agreed_body(tokens, &members, target, candidates, context) else {
            trace!("`{group}` members disagree; not hoisting");
            continue;
        };
        if install(tokens, target, body) {
            trace!("hoisted `{group}` into {target}");
            reduced = true;
        }
    }
    reduced
}

/// Run the simple then the complex reduction over one token sequence.
///
/// Returns true when any body changed.
pub fn reduce_non_adjacent(tokens: &mut [Token], context: PassContext<'_>) -> bool {
    let candidates = Candidates::collect(tokens, context);
    let simple = reduce_simple_cases(tokens, &candidates, context);
    let complex = reduce_complex_cases(tokens, &candidates, context);
    simple || complex
}
