//! Conservative override collapsing.
//! Spec: <https://www.w3.org/TR/css-cascade-4/#cascade-sort>
//!
//! Within one selector's declarations the cascade reduces to importance then
//! source order, so an earlier declaration of a property is dead once a later
//! one wins, unless it is a fallback for browsers that reject the winner. That
//! holds whether or not both came from the same rule.

use core::cmp::Ordering;

use css_syntax::{Declaration, Property};
use log::trace;

use crate::optimizer::{OptimizeMode, PropertyOptimizer};

const VENDOR_PREFIXES: &[&str] = &["-webkit-", "-moz-", "-ms-", "-o-"];

/// Priority of a declaration among same-named declarations of one selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DeclPriority {
    important: bool,
    /// Position in the concatenated list; later wins.
    position: usize,
}

/// Compare two priorities; `Ordering::Greater` means `left` wins.
fn compare_priority(left: DeclPriority, right: DeclPriority) -> Ordering {
    if left.important != right.important {
        return left.important.cmp(&right.important);
    }
    left.position.cmp(&right.position)
}

fn has_vendor_prefix(property: &Property) -> bool {
    property
        .value
        .iter()
        .any(|part| VENDOR_PREFIXES.iter().any(|prefix| part.contains(prefix)))
}

fn uses_function(property: &Property) -> bool {
    property.value.iter().any(|part| part.contains('('))
}

/// Whether `earlier` may still apply in browsers that reject `winner`.
fn is_fallback(earlier: &Property, winner: &Property) -> bool {
    earlier.value != winner.value
        && (has_vendor_prefix(earlier) || has_vendor_prefix(winner) || uses_function(winner))
}

/// Drops declarations that can never win the cascade.
///
/// A non-winning declaration is dropped when a later identical declaration
/// exists, when it follows the winner, or when it is not a fallback for the
/// winner. Fallbacks survive even when they came from an earlier rule. Property
/// blocks, comments and at-rules are always kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct OverrideOptimizer;

impl OverrideOptimizer {
    /// Position of the winning declaration named `name`.
    fn winner(properties: &[(usize, &Property)], name: &str) -> Option<usize> {
        properties
            .iter()
            .filter(|(_, property)| property.name == name)
            .map(|(position, property)| DeclPriority {
                important: property.is_important(),
                position: *position,
            })
            .max_by(|left, right| compare_priority(*left, *right))
            .map(|priority| priority.position)
    }

    fn keeps(
        position: usize,
        property: &Property,
        properties: &[(usize, &Property)],
    ) -> bool {
        let Some(winner_position) = Self::winner(properties, &property.name) else {
            return true;
        };
        if winner_position == position {
            return true;
        }
        let Some(winner) = properties
            .iter()
            .find(|(candidate, _)| *candidate == winner_position)
            .map(|(_, winner)| *winner)
        else {
            return true;
        };
        let duplicated_later = properties
            .iter()
            .any(|(later, other)| *later > position && *other == property);
        if duplicated_later || position > winner_position {
            return false;
        }
        if winner.is_important() && !property.is_important() {
            return false;
        }
        is_fallback(property, winner)
    }
}

impl PropertyOptimizer for OverrideOptimizer {
    fn optimize(
        &self,
        body: Vec<Declaration>,
        mode: OptimizeMode<'_>,
        selector: &str,
    ) -> Vec<Declaration> {
        let properties: Vec<(usize, &Property)> = body
            .iter()
            .enumerate()
            .filter_map(|(position, declaration)| match declaration {
                Declaration::Property(property) => Some((position, property)),
                Declaration::PropertyBlock(_)
                | Declaration::Comment(_)
                | Declaration::AtRule(_) => None,
            })
            .collect();
        let kept: Vec<bool> = body
            .iter()
            .enumerate()
            .map(|(position, declaration)| match declaration {
                Declaration::Property(property) => {
                    Self::keeps(position, property, &properties)
                }
                Declaration::PropertyBlock(_)
                | Declaration::Comment(_)
                | Declaration::AtRule(_) => true,
            })
            .collect();
        let dropped = kept.iter().filter(|keep| !**keep).count();
        if dropped > 0 {
            trace!("{selector}: dropped {dropped} overridden declaration(s) ({mode:?})");
        }
        body.into_iter()
            .zip(kept)
            .filter_map(|(declaration, keep)| keep.then_some(declaration))
            .collect()
    }
}
