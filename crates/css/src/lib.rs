//! Stylesheet minifier: tokenize, optimize the rule structure, write back out.
//!
//! Each stage lives in its own crate; this one wires them together behind a
//! single [`minify()`] call driven by serde-configurable [`Options`].

mod minify;
mod options;

pub use minify::{Minified, minify};
pub use options::Options;

pub use css_selectors::Compatibility;
pub use css_writer::WriterOptions;
