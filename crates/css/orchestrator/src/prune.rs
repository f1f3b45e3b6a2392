//! Removal of rules left without declarations by the structural passes.

use css_syntax::{Declaration, Token};

/// Anything but comments keeps a rule alive; `@apply`-style statements count.
fn has_declarations(body: &[Declaration]) -> bool {
    body.iter().any(|declaration| !declaration.is_comment())
}

/// Drop `Rule`s with no declarations and `Block`s with no children,
/// depth-first. At-rule blocks such as `@font-face` are always kept.
///
/// Returns the number of tokens removed at every depth.
pub fn prune_empty(tokens: &mut Vec<Token>) -> usize {
    let mut pruned = 0_usize;
    for token in &mut *tokens {
        if let Token::Block(block) = token {
            pruned = pruned.saturating_add(prune_empty(&mut block.children));
        }
    }
    let before = tokens.len();
    tokens.retain(|token| match token {
        Token::Rule(rule) => has_declarations(&rule.body),
        Token::Block(block) => !block.children.is_empty(),
        Token::Comment(_) | Token::AtRule(_) | Token::AtRuleBlock(_) => true,
    });
    pruned.saturating_add(before.saturating_sub(tokens.len()))
}
