//! Adjacent rule merging.
//!
//! "Adjacent" means consecutive among mergeable entries: comments, statements
//! and nested blocks between two rules neither merge nor reset the candidate.
//! At-rule blocks reset the candidate but never merge: two `@font-face` blocks
//! declare two fonts, not one cascading body.

use core::mem::take;

use css_cascade::OptimizeMode;
use css_selectors::clean_selectors;
use css_syntax::{SelectorGroup, Token};
use log::trace;

use super::{PassContext, retain_unmarked};

/// Try to fold `entry` into `into`. Returns true when `entry` is now redundant.
fn merge_into(into: &mut Token, entry: &Token, context: PassContext<'_>) -> bool {
    let (Token::Rule(target), Token::Rule(source)) = (into, entry) else {
        return false;
    };

    let selector = source.selectors.joined();
    let target_selector = target.selectors.joined();
    if target_selector == selector {
        let join_at = [target.body.len()];
        let mut concatenated = take(&mut target.body);
        concatenated.extend(source.body.iter().cloned());
        target.body = context.optimizer.optimize(
            concatenated,
            OptimizeMode::Append { join_at: &join_at },
            &selector,
        );
        trace!("merged adjacent bodies of `{selector}`");
        return true;
    }

    if target.body == source.body
        && !context.compatibility.is_special(&target_selector)
        && !context.compatibility.is_special(&selector)
    {
        target.selectors = SelectorGroup::new(clean_selectors(
            target.selectors.iter().chain(source.selectors.iter()),
        ));
        trace!("merged `{selector}` into `{target_selector}` by equal body");
        return true;
    }
    false
}

/// Merge each rule into the preceding mergeable entry when both are rules that
/// share a selector group or an identical body.
///
/// Returns true when anything was merged away.
pub fn merge_adjacent(tokens: &mut Vec<Token>, context: PassContext<'_>) -> bool {
    let mut marked = vec![false; tokens.len()];
    let mut candidate: Option<usize> = None;
    for position in 0..tokens.len() {
        if !tokens.get(position).is_some_and(Token::is_mergeable) {
            continue;
        }
        let Some(target) = candidate else {
            candidate = Some(position);
            continue;
        };
        let (head, tail) = tokens.split_at_mut(position);
        let merged = match (head.get_mut(target), tail.first()) {
            (Some(into), Some(entry)) => merge_into(into, entry, context),
            _ => false,
        };
        if merged {
            if let Some(flag) = marked.get_mut(position) {
                *flag = true;
            }
        } else {
            candidate = Some(position);
        }
    }
    retain_unmarked(tokens, &marked) > 0
}
