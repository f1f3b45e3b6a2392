#![cfg(test)]

use core::error::Error;
use css_cascade::{OverrideOptimizer, PassThrough};
use css_orchestrator::{AdvancedOptimizer, OptimizeError};
use css_selectors::Compatibility;
use css_syntax::{Declaration, NestedBlock, Property, SelectorGroup, Token};

fn init_logging() {
    let _logger = env_logger::builder().is_test(true).try_init();
}

fn property(name: &str, value: &str) -> Declaration {
    Declaration::Property(Property::new(name, [value]))
}

fn rule(selectors: &[&str], body: Vec<Declaration>) -> Token {
    Token::rule(SelectorGroup::new(selectors.iter().copied()), body)
}

fn optimize(tokens: &mut Vec<Token>) -> Result<(), OptimizeError> {
    AdvancedOptimizer::new(Compatibility::All, &OverrideOptimizer)
        .optimize(tokens)
        .map(|_| ())
}

/// # Panics
/// Panics if a second run changes the tree.
///
/// # Errors
/// Returns an error if either run gives up.
#[test]
fn optimizing_twice_changes_nothing() -> Result<(), Box<dyn Error>> {
    init_logging();
    let mut tokens = vec![
        rule(&["a"], vec![property("color", "red"), property("top", "0")]),
        rule(&[".b"], vec![property("margin", "0")]),
        rule(&[".c"], vec![property("margin", "0")]),
        Token::Comment("/* keep */".to_owned()),
        rule(&["a", "p"], vec![property("color", "red")]),
        rule(&["a"], vec![property("color", "blue")]),
        Token::Block(NestedBlock {
            selectors: SelectorGroup::new(["@media print"]),
            children: vec![
                rule(&["a"], vec![property("color", "red")]),
                rule(&["a"], vec![property("color", "black")]),
            ],
        }),
    ];
    optimize(&mut tokens)?;
    let once = tokens.clone();
    let stats = AdvancedOptimizer::new(Compatibility::All, &OverrideOptimizer).optimize(&mut tokens)?;
    assert_eq!(tokens, once);
    assert_eq!(stats.removed, 0);
    assert_eq!(stats.pruned, 0);
    Ok(())
}

/// # Panics
/// Panics if the earlier duplicate is the one kept.
///
/// # Errors
/// Returns an error if the engine gives up.
#[test]
fn duplicate_rules_keep_the_later_entry() -> Result<(), Box<dyn Error>> {
    init_logging();
    let mut tokens = vec![
        rule(&["a"], vec![property("color", "red")]),
        rule(&["b"], vec![property("color", "blue")]),
        rule(&["a"], vec![property("color", "red")]),
    ];
    optimize(&mut tokens)?;
    assert_eq!(
        tokens,
        vec![
            rule(&["b"], vec![property("color", "blue")]),
            rule(&["a"], vec![property("color", "red")]),
        ]
    );
    Ok(())
}

/// # Panics
/// Panics if adjacent rules are not merged by selector or by body.
///
/// # Errors
/// Returns an error if the engine gives up.
#[test]
fn adjacent_rules_merge() -> Result<(), Box<dyn Error>> {
    init_logging();
    let mut by_selector = vec![
        rule(&["a"], vec![property("color", "red")]),
        rule(&["a"], vec![property("font-size", "1px")]),
    ];
    optimize(&mut by_selector)?;
    assert_eq!(
        by_selector,
        vec![rule(
            &["a"],
            vec![property("color", "red"), property("font-size", "1px")]
        )]
    );

    let mut by_body = vec![
        rule(&[".a"], vec![property("color", "red")]),
        rule(&[".b"], vec![property("color", "red")]),
    ];
    optimize(&mut by_body)?;
    assert_eq!(by_body, vec![rule(&[".a", ".b"], vec![property("color", "red")])]);
    Ok(())
}

/// # Panics
/// Panics if a vendor-prefixed selector is merged by body.
///
/// # Errors
/// Returns an error if the engine gives up.
#[test]
fn special_selectors_stay_separate() -> Result<(), Box<dyn Error>> {
    init_logging();
    let mut tokens = vec![
        rule(&[".a"], vec![property("color", "red")]),
        rule(&["input::-webkit-input-placeholder"], vec![property("color", "red")]),
    ];
    let expected = tokens.clone();
    optimize(&mut tokens)?;
    assert_eq!(tokens, expected);
    Ok(())
}

/// # Panics
/// Panics if a shared declaration is not hoisted or unrelated rules change.
///
/// # Errors
/// Returns an error if the engine gives up.
#[test]
fn non_adjacent_occurrences_are_reduced() -> Result<(), Box<dyn Error>> {
    init_logging();
    let mut tokens = vec![
        rule(&["a"], vec![property("color", "red"), property("top", "0")]),
        rule(&["b"], vec![property("color", "blue")]),
        rule(&["a"], vec![property("color", "red")]),
    ];
    optimize(&mut tokens)?;
    assert_eq!(
        tokens,
        vec![
            rule(&["a"], vec![property("top", "0")]),
            rule(&["b"], vec![property("color", "blue")]),
            rule(&["a"], vec![property("color", "red")]),
        ]
    );
    Ok(())
}

/// # Panics
/// Panics if a rule emptied by reduction is not pruned.
///
/// # Errors
/// Returns an error if the engine gives up.
#[test]
fn emptied_rules_are_pruned() -> Result<(), Box<dyn Error>> {
    init_logging();
    let mut tokens = vec![
        rule(&["a"], vec![property("color", "red")]),
        rule(&["b"], vec![property("top", "0")]),
        rule(&["a"], vec![property("color", "blue")]),
    ];
    let stats = AdvancedOptimizer::new(Compatibility::All, &OverrideOptimizer).optimize(&mut tokens)?;
    assert_eq!(stats.pruned, 1);
    assert_eq!(
        tokens,
        vec![
            rule(&["b"], vec![property("top", "0")]),
            rule(&["a"], vec![property("color", "blue")]),
        ]
    );
    Ok(())
}

/// # Panics
/// Panics if rules inside a nested block are not merged.
///
/// # Errors
/// Returns an error if the engine gives up.
#[test]
fn nested_blocks_are_optimized() -> Result<(), Box<dyn Error>> {
    init_logging();
    let mut tokens = vec![Token::Block(NestedBlock {
        selectors: SelectorGroup::new(["@media screen"]),
        children: vec![
            rule(&["a"], vec![property("color", "red")]),
            rule(&["a"], vec![property("top", "0")]),
        ],
    })];
    optimize(&mut tokens)?;
    assert_eq!(
        tokens,
        vec![Token::Block(NestedBlock {
            selectors: SelectorGroup::new(["@media screen"]),
            children: vec![rule(
                &["a"],
                vec![property("color", "red"), property("top", "0")]
            )],
        })]
    );
    Ok(())
}

/// # Panics
/// Panics if the pass ceiling does not surface as an error.
#[test]
fn low_ceiling_gives_up() {
    init_logging();
    let mut tokens = vec![rule(&["a"], vec![property("color", "red")])];
    let outcome = AdvancedOptimizer::new(Compatibility::All, &PassThrough)
        .with_max_passes(3)
        .optimize(&mut tokens);
    assert_eq!(outcome, Err(OptimizeError::GaveUp { passes: 3 }));
    assert_eq!(tokens, vec![rule(&["a"], vec![property("color", "red")])]);
}

/// # Panics
/// Panics if a nested sequence giving up stops the rest of the tree.
#[test]
fn nested_give_up_still_optimizes_the_rest() {
    init_logging();
    let media = Token::Block(NestedBlock {
        selectors: SelectorGroup::new(["@media print"]),
        children: vec![rule(&["a"], vec![property("color", "red")])],
    });
    let mut tokens = vec![
        media.clone(),
        rule(&["c"], Vec::new()),
        rule(&["b"], vec![property("top", "0")]),
        rule(&["b"], vec![property("top", "0")]),
    ];
    let outcome = AdvancedOptimizer::new(Compatibility::All, &PassThrough)
        .with_max_passes(3)
        .optimize(&mut tokens);
    assert_eq!(outcome, Err(OptimizeError::GaveUp { passes: 3 }));
    assert_eq!(tokens, vec![media, rule(&["b"], vec![property("top", "0")])]);
}
