//! Duplicate rule removal.

use core::mem::{Discriminant, discriminant};
use std::collections::HashMap;

use css_syntax::{StyleBlock, Token};
use log::trace;

use super::retain_unmarked;

/// Identity of a mergeable entry: its kind plus selectors and body.
type RuleKey<'tok> = (Discriminant<Token>, &'tok StyleBlock);

/// Remove every `Rule`/`AtRuleBlock` that is structurally equal to a later
/// entry of the same kind. Other tokens are left untouched.
///
/// Returns true when anything was removed.
pub fn remove_duplicates(tokens: &mut Vec<Token>) -> bool {
    let mut marked = vec![false; tokens.len()];
    {
        let mut last_seen: HashMap<RuleKey<'_>, usize> = HashMap::new();
        for (position, token) in tokens.iter().enumerate() {
            let Some(block) = token.style_block() else {
                continue;
            };
            if let Some(previous) = last_seen.insert((discriminant(token), block), position)
                && let Some(flag) = marked.get_mut(previous)
            {
                *flag = true;
            }
        }
    }
    let removed = retain_unmarked(tokens, &marked);
    if removed > 0 {
        trace!("removed {removed} duplicate rule(s)");
    }
    removed > 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::{Declaration, NestedBlock, Property, SelectorGroup};

    fn rule(selector: &str, name: &str, value: &str) -> Token {
        Token::rule(
            SelectorGroup::new([selector]),
            vec![Declaration::Property(Property::new(name, [value]))],
        )
    }

    /// # Panics
    /// Panics if the later duplicate is not the survivor.
    #[test]
    fn keeps_last_occurrence() {
        let mut tokens = vec![
            rule("a", "color", "red"),
            rule("b", "color", "blue"),
            rule("a", "color", "red"),
        ];
        assert!(remove_duplicates(&mut tokens));
        assert_eq!(
            tokens,
            vec![rule("b", "color", "blue"), rule("a", "color", "red")]
        );
    }

    /// # Panics
    /// Panics if distinct rules or nested blocks are removed.
    #[test]
    fn leaves_distinct_entries() {
        let mut tokens = vec![
            rule("a", "color", "red"),
            Token::Block(NestedBlock::default()),
            rule("a", "color", "blue"),
            Token::Block(NestedBlock::default()),
        ];
        let expected = tokens.clone();
        assert!(!remove_duplicates(&mut tokens));
        assert_eq!(tokens, expected);
    }

    /// # Panics
    /// Panics if a rule and an at-rule block with equal contents collapse.
    #[test]
    fn kind_is_part_of_identity() {
        let block = StyleBlock::new(SelectorGroup::new(["@page"]), Vec::new());
        let mut tokens = vec![Token::AtRuleBlock(block.clone()), Token::Rule(block)];
        assert!(!remove_duplicates(&mut tokens));
        assert_eq!(tokens.len(), 2);
    }
}
