//! Token tree serializer with compact and beautified output.
//!
//! The writer only reads the tree; it never creates or reorders tokens.

mod writer;

use css_syntax::{Declaration, Token};

pub use writer::Writer;

/// Platform line break used by beautified output and kept breaks.
pub const LINE_BREAK: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Columns added per nesting level in beautified output.
pub const INDENT_BY: usize = 2;

/// Output switches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WriterOptions {
    /// Human-readable output: line breaks, indentation, `": "` separators.
    pub beautify: bool,
    /// Put a line break between top-level tokens in compact mode.
    pub keep_breaks: bool,
    /// Keep the space after `)` in `background`, `transform` and `src` values.
    pub space_after_closing_brace: bool,
}

/// Serialize a token sequence.
#[inline]
pub fn write_all(tokens: &[Token], options: WriterOptions) -> String {
    let mut writer = Writer::new(options);
    writer.all(tokens);
    writer.finish()
}

/// Serialize a lone declaration list, as found inside a rule's braces.
#[inline]
pub fn write_body(body: &[Declaration], options: WriterOptions) -> String {
    let mut writer = Writer::new(options);
    writer.body(body);
    writer.finish()
}
