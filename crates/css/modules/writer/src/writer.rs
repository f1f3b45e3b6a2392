//! Recursive descent over the token tree.

use css_syntax::{Declaration, Property, SelectorGroup, Token};

use crate::{INDENT_BY, LINE_BREAK, WriterOptions};

/// Value parts that never get a space on either side.
#[inline]
fn is_separator(part: &str) -> bool {
    matches!(part, "," | "/")
}

/// Index of the last entry that is not a comment.
#[inline]
fn last_declaration(body: &[Declaration]) -> Option<usize> {
    body.iter().rposition(|declaration| !declaration.is_comment())
}

/// Serializer state: options, current indentation and the output buffer.
#[derive(Debug, Default)]
pub struct Writer {
    options: WriterOptions,
    indent: usize,
    indent_spaces: String,
    out: String,
}

impl Writer {
    #[inline]
    pub fn new(options: WriterOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Consume the writer, returning everything written so far.
    #[inline]
    pub fn finish(self) -> String {
        self.out
    }

    /// Write a token sequence, top level or the children of a block.
    pub fn all(&mut self, tokens: &[Token]) {
        let join = if self.options.keep_breaks && !self.options.beautify {
            LINE_BREAK
        } else {
            ""
        };
        for (position, token) in tokens.iter().enumerate() {
            let is_last = position.saturating_add(1) == tokens.len();
            match token {
                Token::AtRule(text) => {
                    self.out.push_str(text);
                    if !is_last {
                        self.semicolon(false);
                    }
                }
                Token::AtRuleBlock(block) | Token::Rule(block) => {
                    self.selectors(&block.selectors);
                    self.open_brace(true);
                    self.body(&block.body);
                    self.close_brace(is_last);
                }
                Token::Block(nested) => {
                    self.selectors(&nested.selectors);
                    self.open_brace(true);
                    self.out.push_str(join);
                    self.all(&nested.children);
                    self.out.push_str(join);
                    self.close_brace(is_last);
                }
                Token::Comment(text) => self.out.push_str(text),
            }
            if !is_last {
                self.out.push_str(join);
            }
        }
    }

    /// Write a selector group, comma separated.
    pub fn selectors(&mut self, group: &SelectorGroup) {
        for (position, selector) in group.iter().enumerate() {
            if position > 0 {
                self.comma();
            }
            self.out.push_str(selector);
        }
    }

    /// Write a declaration list.
    pub fn body(&mut self, body: &[Declaration]) {
        let last = last_declaration(body);
        for position in 0..body.len() {
            self.property(body, position, last);
        }
    }

    /// Write the entry at `position` of `body`; `last` is the index of the
    /// final non-comment entry.
    pub fn property(&mut self, body: &[Declaration], position: usize, last: Option<usize>) {
        let Some(declaration) = body.get(position) else {
            return;
        };
        let before_last = last.is_some_and(|last_position| position < last_position);
        let is_last = last == Some(position);
        match declaration {
            Declaration::AtRule(text) => {
                self.out.push_str(text);
                if before_last {
                    self.semicolon(false);
                }
            }
            Declaration::Comment(text) => self.out.push_str(text),
            Declaration::Property(property) => {
                self.out.push_str(&property.name);
                self.colon();
                self.value(property);
                if before_last || self.options.beautify {
                    self.semicolon(is_last);
                }
            }
            Declaration::PropertyBlock(block) => {
                self.out.push_str(&block.name);
                self.colon();
                self.open_brace(false);
                self.body(&block.body);
                self.close_brace(true);
                self.semicolon(is_last);
            }
        }
    }

    /// Write value parts, space separated except around separators and,
    /// unless configured otherwise, after `)` in a few properties.
    pub fn value(&mut self, property: &Property) {
        let always_spaced = matches!(property.name.as_str(), "filter" | "-ms-filter");
        let tight_after_paren = !self.options.space_after_closing_brace
            && matches!(property.name.as_str(), "background" | "transform" | "src");
        let mut parts = property.value.iter().peekable();
        while let Some(part) = parts.next() {
            self.out.push_str(part);
            let Some(next) = parts.peek() else {
                break;
            };
            let tight = is_separator(part)
                || is_separator(next)
                || (tight_after_paren && part.ends_with(')'));
            if always_spaced || !tight {
                self.out.push(' ');
            }
        }
    }

    fn set_indent(&mut self, indent: usize) {
        self.indent = indent;
        self.indent_spaces = " ".repeat(indent);
    }

    fn open_brace(&mut self, prefix_space: bool) {
        if !self.options.beautify {
            self.out.push('{');
            return;
        }
        self.set_indent(self.indent.saturating_add(INDENT_BY));
        if prefix_space {
            self.out.push(' ');
        }
        self.out.push('{');
        self.out.push_str(LINE_BREAK);
        self.out.push_str(&self.indent_spaces);
    }

    fn close_brace(&mut self, is_last: bool) {
        if !self.options.beautify {
            self.out.push('}');
            return;
        }
        self.set_indent(self.indent.saturating_sub(INDENT_BY));
        self.out.push_str(LINE_BREAK);
        self.out.push_str(&self.indent_spaces);
        self.out.push('}');
        if !is_last {
            self.out.push_str(LINE_BREAK);
            self.out.push_str(&self.indent_spaces);
        }
    }

    fn colon(&mut self) {
        self.out
            .push_str(if self.options.beautify { ": " } else { ":" });
    }

    fn semicolon(&mut self, is_last: bool) {
        self.out.push(';');
        if self.options.beautify && !is_last {
            self.out.push_str(LINE_BREAK);
            self.out.push_str(&self.indent_spaces);
        }
    }

    fn comma(&mut self) {
        self.out.push(',');
        if self.options.beautify {
            self.out.push_str(LINE_BREAK);
            self.out.push_str(&self.indent_spaces);
        }
    }
}
