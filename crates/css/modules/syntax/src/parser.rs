//! Stylesheet text to token tree, on top of `cssparser`'s rule list parsers.
//!
//! Invalid rules and declarations are dropped through cssparser's error
//! recovery; comments are not preserved.

use core::mem::take;

use cssparser::AtRuleParser as CssAtRuleParser;
use cssparser::BasicParseErrorKind;
use cssparser::CowRcStr;
use cssparser::DeclarationParser as CssDeclarationParser;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::ParserState;
use cssparser::QualifiedRuleParser as CssQualifiedRuleParser;
use cssparser::RuleBodyItemParser as CssRuleBodyItemParser;
use cssparser::RuleBodyParser as CssRuleBodyParser;
use cssparser::StyleSheetParser;
use cssparser::Token as CssToken;

use crate::tokens::{
    Declaration, NestedBlock, Property, PropertyBlock, SelectorGroup, StyleBlock, Token,
};

/// At-rules whose block holds full rules rather than declarations.
const NESTING_AT_RULES: &[&str] = &[
    "media",
    "supports",
    "document",
    "-moz-document",
    "container",
    "layer",
    "scope",
    "starting-style",
];

/// Consume the rest of `input` as text, collapsing whitespace between tokens
/// into single spaces and dropping comments. Strings, functions and bracket
/// blocks are copied as written.
fn collapse_whitespace(input: &mut Parser<'_, '_>) -> String {
    let mut out = String::new();
    let mut pending_space = false;
    loop {
        let start = input.position();
        let Ok(token) = input.next_including_whitespace_and_comments().cloned() else {
            break;
        };
        match token {
            CssToken::WhiteSpace(_) => pending_space = !out.is_empty(),
            CssToken::Comment(_) => {}
            CssToken::Function(_)
            | CssToken::ParenthesisBlock
            | CssToken::SquareBracketBlock
            | CssToken::CurlyBracketBlock => {
                let consumed = input.parse_nested_block(|nested| {
                    skip_to_end(nested);
                    Ok::<(), ParseError<'_, ()>>(())
                });
                if consumed.is_err() {
                    break;
                }
                push_token_text(&mut out, &mut pending_space, input.slice_from(start));
            }
            _ => push_token_text(&mut out, &mut pending_space, input.slice_from(start)),
        }
    }
    out
}

fn push_token_text(out: &mut String, pending_space: &mut bool, text: &str) {
    if take(pending_space) {
        out.push(' ');
    }
    out.push_str(text);
}

/// Property names are case-insensitive, except custom properties.
fn property_name(name: &str) -> String {
    if name.starts_with("--") {
        name.to_owned()
    } else {
        name.to_ascii_lowercase()
    }
}

/// Consume everything left in `input`.
fn skip_to_end(input: &mut Parser<'_, '_>) {
    while input.next_including_whitespace_and_comments().is_ok() {}
}

fn nests_rules(name: &str) -> bool {
    let lowered = name.to_ascii_lowercase();
    lowered.ends_with("keyframes") || NESTING_AT_RULES.contains(&lowered.as_str())
}

/// Render an at-rule head, e.g. `@media screen`.
fn at_rule_text(name: &str, prelude: &str) -> String {
    if prelude.is_empty() {
        format!("@{name}")
    } else {
        format!("@{name} {prelude}")
    }
}

fn flush_part(current: &mut String, parts: &mut Vec<String>) {
    if !current.is_empty() {
        parts.push(take(current));
    }
}

/// Split a declaration value into parts: whitespace separates parts, `,` and
/// `/` stand alone, `!` starts a new part, and function or bracket blocks are
/// kept whole.
fn parse_value_parts(input: &mut Parser<'_, '_>) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    loop {
        let start = input.position();
        let Ok(token) = input.next_including_whitespace().cloned() else {
            break;
        };
        match token {
            CssToken::WhiteSpace(_) => flush_part(&mut current, &mut parts),
            CssToken::Comma => {
                flush_part(&mut current, &mut parts);
                parts.push(",".to_owned());
            }
            CssToken::Delim('/') => {
                flush_part(&mut current, &mut parts);
                parts.push("/".to_owned());
            }
            CssToken::Delim('!') => {
                flush_part(&mut current, &mut parts);
                current.push('!');
            }
            CssToken::Function(_)
            | CssToken::ParenthesisBlock
            | CssToken::SquareBracketBlock
            | CssToken::CurlyBracketBlock => {
                let consumed = input.parse_nested_block(|nested| {
                    skip_to_end(nested);
                    Ok::<(), ParseError<'_, ()>>(())
                });
                if consumed.is_err() {
                    break;
                }
                current.push_str(input.slice_from(start));
            }
            _ => current.push_str(input.slice_from(start)),
        }
    }
    flush_part(&mut current, &mut parts);
    parts
}

/// Parse a `{ ... }` value as a nested declaration list.
fn parse_property_block<'input>(
    input: &mut Parser<'input, '_>,
) -> Result<Vec<Declaration>, ParseError<'input, ()>> {
    input.expect_curly_bracket_block()?;
    let body = input.parse_nested_block(|block| {
        Ok::<_, ParseError<'input, ()>>(parse_declarations_from_block(block))
    })?;
    input.expect_exhausted()?;
    Ok(body)
}

/// A declaration parser producing `Declaration` entries of a rule body.
struct BodyDeclParser;

impl<'input> CssDeclarationParser<'input> for BodyDeclParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, 't>,
        _decl_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'input, Self::Error>> {
        let name = property_name(&name);
        if let Ok(body) = input.try_parse(parse_property_block) {
            return Ok(Declaration::PropertyBlock(PropertyBlock { name, body }));
        }
        let value = parse_value_parts(input);
        Ok(Declaration::Property(Property { name, value }))
    }
}

impl<'input> CssAtRuleParser<'input> for BodyDeclParser {
    type Prelude = String;
    type AtRule = Declaration;
    type Error = ();

    #[inline]
    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, 't>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        Ok(at_rule_text(&name, &collapse_whitespace(input)))
    }

    #[inline]
    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, 't>,
    ) -> Result<Self::AtRule, ParseError<'input, Self::Error>> {
        // Nested at-rule blocks inside declaration bodies are not modelled.
        Err(input.new_error(BasicParseErrorKind::AtRuleBodyInvalid))
    }

    #[inline]
    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _state: &ParserState,
    ) -> Result<Self::AtRule, Self::Error> {
        Ok(Declaration::AtRule(prelude))
    }
}

impl<'input> CssQualifiedRuleParser<'input> for BodyDeclParser {
    type Prelude = ();
    type QualifiedRule = Declaration; // Not produced
    type Error = ();

    #[inline]
    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'input, 't>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
    }

    #[inline]
    fn parse_block<'t>(
        &mut self,
        _prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid))
    }
}

impl CssRuleBodyItemParser<'_, Declaration, ()> for BodyDeclParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Prelude of a top-level at-rule, classified by what its block holds.
enum AtRulePrelude {
    /// `@media` and friends: the block holds rules.
    Nesting(String),
    /// `@font-face` and friends: the block holds declarations.
    Descriptors(String),
}

impl AtRulePrelude {
    fn into_text(self) -> String {
        match self {
            Self::Nesting(text) | Self::Descriptors(text) => text,
        }
    }
}

/// Top-level parser that builds `Token` items for rules and at-rules.
struct TopLevelParser;

impl<'input> CssAtRuleParser<'input> for TopLevelParser {
    type Prelude = AtRulePrelude;
    type AtRule = Token;
    type Error = ();

    #[inline]
    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, 't>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        let text = at_rule_text(&name, &collapse_whitespace(input));
        if nests_rules(&name) {
            Ok(AtRulePrelude::Nesting(text))
        } else {
            Ok(AtRulePrelude::Descriptors(text))
        }
    }

    #[inline]
    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, 't>,
    ) -> Result<Self::AtRule, ParseError<'input, Self::Error>> {
        match prelude {
            AtRulePrelude::Nesting(text) => {
                let children = StyleSheetParser::new(input, self).flatten().collect();
                Ok(Token::Block(NestedBlock {
                    selectors: SelectorGroup::new([text]),
                    children,
                }))
            }
            AtRulePrelude::Descriptors(text) => Ok(Token::AtRuleBlock(StyleBlock::new(
                SelectorGroup::new([text]),
                parse_declarations_from_block(input),
            ))),
        }
    }

    #[inline]
    fn rule_without_block(
        &mut self,
        prelude: Self::Prelude,
        _state: &ParserState,
    ) -> Result<Self::AtRule, Self::Error> {
        Ok(Token::AtRule(prelude.into_text()))
    }
}

impl<'input> CssQualifiedRuleParser<'input> for TopLevelParser {
    type Prelude = SelectorGroup;
    type QualifiedRule = Token;
    type Error = ();

    #[inline]
    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'input, 't>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        let selectors = input.parse_comma_separated(|selector| {
            Ok::<_, ParseError<'input, ()>>(collapse_whitespace(selector))
        })?;
        Ok(SelectorGroup::new(
            selectors.into_iter().filter(|selector| !selector.is_empty()),
        ))
    }

    #[inline]
    fn parse_block<'t>(
        &mut self,
        prelude: Self::Prelude,
        _state: &ParserState,
        input: &mut Parser<'input, 't>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        Ok(Token::rule(prelude, parse_declarations_from_block(input)))
    }
}

/// Parse declarations from a rule block using `cssparser` body parser.
fn parse_declarations_from_block(block: &mut Parser<'_, '_>) -> Vec<Declaration> {
    let mut body = BodyDeclParser;
    CssRuleBodyParser::new(block, &mut body).flatten().collect()
}

/// Parse a full stylesheet into a token sequence using cssparser.
pub fn parse_stylesheet(css: &str) -> Vec<Token> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut top = TopLevelParser;
    StyleSheetParser::new(&mut parser, &mut top).flatten().collect()
}
