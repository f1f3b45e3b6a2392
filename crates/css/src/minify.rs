//! The tokenize, optimize and write pipeline.

use css_cascade::OverrideOptimizer;
use css_orchestrator::AdvancedOptimizer;
use css_syntax::parse_stylesheet;
use css_writer::write_all;
use log::debug;
use serde::Serialize;

use crate::options::Options;

/// Output of [`minify`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Minified {
    pub styles: String,
    /// Non-fatal problems, such as the optimizer giving up early.
    pub warnings: Vec<String>,
}

/// Minify `source` according to `options`.
///
/// Never fails: unparseable constructs are dropped by the tokenizer and an
/// optimizer that stops early is reported through [`Minified::warnings`].
pub fn minify(source: &str, options: &Options) -> Minified {
    let mut tokens = parse_stylesheet(source);
    let mut warnings = Vec::new();
    if options.advanced {
        let optimizer = AdvancedOptimizer::new(options.compatibility, &OverrideOptimizer)
            .with_max_passes(options.max_passes);
        match optimizer.optimize(&mut tokens) {
            Ok(stats) => debug!("{stats:?}"),
            Err(error) => warnings.push(error.to_string()),
        }
    }
    Minified {
        styles: write_all(&tokens, options.writer_options()),
        warnings,
    }
}
