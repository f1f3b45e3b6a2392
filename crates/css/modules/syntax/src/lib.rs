//! CSS Syntax Module Level 3: token tree and tokenization.
//! Spec: <https://www.w3.org/TR/css-syntax-3/>
//!
//! The token tree is the shape both the optimizer passes and the writer work
//! on. `parse_stylesheet` builds it from text using `cssparser`.

mod parser;
mod tokens;

pub use parser::parse_stylesheet;
pub use tokens::{
    Declaration, NestedBlock, Property, PropertyBlock, SelectorGroup, StyleBlock, Token,
};
