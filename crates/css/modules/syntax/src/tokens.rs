//! Token tree shared by the optimizer passes and the writer.

use core::slice::Iter;

/// A comma-separated selector list, kept in authored order.
///
/// Order only matters for output; the passes compare the joined text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SelectorGroup {
    /// Individual selectors, already trimmed.
    selectors: Vec<String>,
}

impl SelectorGroup {
    /// Build a group from individual selector strings.
    #[inline]
    pub fn new<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selectors: selectors.into_iter().map(Into::into).collect(),
        }
    }

    /// Selectors joined with `,`; the text the passes compare groups by.
    #[inline]
    pub fn joined(&self) -> String {
        self.selectors.join(",")
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, String> {
        self.selectors.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.selectors
    }
}

impl<'group> IntoIterator for &'group SelectorGroup {
    type Item = &'group String;
    type IntoIter = Iter<'group, String>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.selectors.iter()
    }
}

/// A `name: value` declaration with the value split into parts.
///
/// Commas and slashes are standalone parts so the writer can decide spacing
/// around them; `!important` is carried as the trailing part.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Property {
    /// Property name; the tokenizer lowercases all but custom properties.
    pub name: String,
    /// Value parts in source order.
    pub value: Vec<String>,
}

impl Property {
    #[inline]
    pub fn new<I, S>(name: impl Into<String>, value: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            value: value.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the trailing value part is an `!important` marker.
    #[inline]
    pub fn is_important(&self) -> bool {
        self.value
            .last()
            .is_some_and(|part| part.eq_ignore_ascii_case("!important"))
    }
}

/// A declaration whose value is itself a nested declaration list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyBlock {
    pub name: String,
    pub body: Vec<Declaration>,
}

/// One entry of a rule body.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Declaration {
    Property(Property),
    PropertyBlock(PropertyBlock),
    /// Comment text including its delimiters.
    Comment(String),
    /// An at-rule statement inside a body (without the trailing semicolon).
    AtRule(String),
}

impl Declaration {
    #[inline]
    pub const fn is_comment(&self) -> bool {
        matches!(self, Self::Comment(_))
    }
}

impl From<Property> for Declaration {
    #[inline]
    fn from(property: Property) -> Self {
        Self::Property(property)
    }
}

/// Selector group plus declaration body; shared by rules and at-rule blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct StyleBlock {
    pub selectors: SelectorGroup,
    pub body: Vec<Declaration>,
}

impl StyleBlock {
    #[inline]
    pub fn new(selectors: SelectorGroup, body: Vec<Declaration>) -> Self {
        Self { selectors, body }
    }
}

/// A grouping construct such as `@media` whose children are full tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NestedBlock {
    /// At-rule prelude, e.g. `@media screen`.
    pub selectors: SelectorGroup,
    pub children: Vec<Token>,
}

/// A top-level stylesheet entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
    /// Comment text including its delimiters.
    Comment(String),
    /// Non-block at-rule statement, e.g. `@import url(a.css)`.
    AtRule(String),
    /// At-rule with a declaration body, e.g. `@font-face`.
    AtRuleBlock(StyleBlock),
    /// Conditional or grouping rule holding nested tokens.
    Block(NestedBlock),
    /// Regular style rule.
    Rule(StyleBlock),
}

impl Token {
    /// Shorthand for a style rule.
    #[inline]
    pub fn rule(selectors: SelectorGroup, body: Vec<Declaration>) -> Self {
        Self::Rule(StyleBlock::new(selectors, body))
    }

    /// The selector group and body of a mergeable entry (`Rule`/`AtRuleBlock`).
    #[inline]
    pub const fn style_block(&self) -> Option<&StyleBlock> {
        match self {
            Self::Rule(block) | Self::AtRuleBlock(block) => Some(block),
            Self::Comment(_) | Self::AtRule(_) | Self::Block(_) => None,
        }
    }

    #[inline]
    pub fn style_block_mut(&mut self) -> Option<&mut StyleBlock> {
        match self {
            Self::Rule(block) | Self::AtRuleBlock(block) => Some(block),
            Self::Comment(_) | Self::AtRule(_) | Self::Block(_) => None,
        }
    }

    #[inline]
    pub const fn is_mergeable(&self) -> bool {
        matches!(self, Self::Rule(_) | Self::AtRuleBlock(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// # Panics
    /// Panics if the joined text does not use a bare comma.
    #[test]
    fn joined_uses_bare_comma() {
        let group = SelectorGroup::new([".a", "div > p"]);
        assert_eq!(group.joined(), ".a,div > p");
        assert_eq!(group.len(), 2);
    }

    /// # Panics
    /// Panics if `!important` detection is wrong.
    #[test]
    fn important_is_trailing_part() {
        assert!(Property::new("color", ["red", "!important"]).is_important());
        assert!(!Property::new("color", ["red"]).is_important());
        assert!(!Property::new("color", Vec::<String>::new()).is_important());
    }

    /// # Panics
    /// Panics if mergeable detection disagrees with the token kind.
    #[test]
    fn only_rules_and_at_rule_blocks_are_mergeable() {
        let rule = Token::rule(SelectorGroup::new(["a"]), Vec::new());
        let block = Token::Block(NestedBlock::default());
        assert!(rule.is_mergeable());
        assert!(rule.style_block().is_some());
        assert!(!block.is_mergeable());
        assert!(!Token::Comment("/* x */".to_owned()).is_mergeable());
    }
}
